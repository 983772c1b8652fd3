//! Display formatting for times, weights and sets

use crate::workout::ExerciseSet;

/// Format seconds as `HH:MM:SS`
pub fn format_elapsed(total_secs: i64) -> String {
    let total = total_secs.max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Fixed-decimal kilograms, e.g. `1234.5 kg`
pub fn format_kg(value: f64, decimals: usize) -> String {
    format!("{:.*} kg", decimals, value)
}

/// Weight without trailing zeros: 100 -> "100", 22.5 -> "22.5"
pub fn format_weight(weight: f64) -> String {
    format!("{}", weight)
}

/// `Set N @ W kg x R reps` with a 0-based index
pub fn format_set(index: usize, set: &ExerciseSet) -> String {
    format!("Set {} @ {} kg x {} reps", index + 1, format_weight(set.weight), set.reps)
}

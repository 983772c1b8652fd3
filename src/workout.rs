//! Workout session model - sets, exercises and the session itself

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Exercises offered in the tracker selector
pub const KNOWN_EXERCISES: &[&str] = &["Squats", "Bench Press", "Deadlift", "Overhead Press", "Rows"];

/// Exercise count that fills the summary progress bar
pub const TARGET_EXERCISES: usize = 5;

/// Domain rule violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkoutError {
    #[error("exercise name is empty")]
    MissingName,

    #[error("exercise has no sets")]
    NoSets,

    #[error("workout already finished")]
    AlreadyFinished,

    #[error("workout type already chosen: {0}")]
    TypeAlreadyChosen(WorkoutType),

    #[error("no set at index {0}")]
    SetOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Push,
    Pull,
    Legs,
    #[serde(rename = "Full Body")]
    FullBody,
    Cardio,
}

impl WorkoutType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Push => "Push",
            WorkoutType::Pull => "Pull",
            WorkoutType::Legs => "Legs",
            WorkoutType::FullBody => "Full Body",
            WorkoutType::Cardio => "Cardio",
        }
    }

    /// All workout types in selector order
    pub fn all() -> &'static [WorkoutType] {
        &[
            WorkoutType::Push,
            WorkoutType::Pull,
            WorkoutType::Legs,
            WorkoutType::FullBody,
            WorkoutType::Cardio,
        ]
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One performed set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub weight: f64, // kg
    pub reps: u32,
}

impl ExerciseSet {
    pub fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

impl Exercise {
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(ExerciseSet::volume).fold(0.0, |acc, v| acc + v)
    }
}

/// Workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
}

impl Workout {
    /// Start an empty, unnamed workout
    pub fn start(now: DateTime<Utc>) -> Self {
        info!("Workout started at {}", now.to_rfc3339());
        Self {
            name: String::new(),
            exercises: Vec::new(),
            started_at: now,
            finished_at: None,
            workout_type: None,
        }
    }

    /// Name the workout `DD-MM-YYYY-<Type>` after the chosen type.
    /// A type can only be chosen once.
    pub fn choose_type(&mut self, workout_type: WorkoutType, today: DateTime<Local>) -> Result<(), WorkoutError> {
        if let Some(current) = self.workout_type {
            return Err(WorkoutError::TypeAlreadyChosen(current));
        }
        self.workout_type = Some(workout_type);
        self.name = workout_name(workout_type, today);
        info!("Workout named {}", self.name);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Append a completed exercise
    pub fn add_exercise(&mut self, exercise: Exercise) -> Result<(), WorkoutError> {
        if self.is_finished() {
            return Err(WorkoutError::AlreadyFinished);
        }
        if exercise.name.trim().is_empty() {
            return Err(WorkoutError::MissingName);
        }
        if exercise.sets.is_empty() {
            return Err(WorkoutError::NoSets);
        }
        info!("Exercise added: {} ({} sets)", exercise.name, exercise.sets.len());
        self.exercises.push(exercise);
        Ok(())
    }

    /// Mark the workout finished. Never cleared afterwards.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), WorkoutError> {
        if self.is_finished() {
            return Err(WorkoutError::AlreadyFinished);
        }
        self.finished_at = Some(now);
        info!("Workout finished: {} exercises, {:.1} kg", self.exercises.len(), self.total_volume());
        Ok(())
    }

    /// Sum of weight x reps over all sets
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).fold(0.0, |acc, v| acc + v)
    }

    /// Whole seconds since start, frozen at the finish time
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        let end = self.finished_at.unwrap_or(now);
        (end - self.started_at).num_seconds().max(0)
    }

    /// Duration rounded to whole minutes
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.finished_at.unwrap_or(now);
        let millis = (end - self.started_at).num_milliseconds().max(0);
        (millis as f64 / 60_000.0).round() as i64
    }

    /// Duration in fractional minutes, 0 if not finished
    pub fn finished_minutes(&self) -> f64 {
        match self.finished_at {
            Some(end) => (end - self.started_at).num_milliseconds() as f64 / 60_000.0,
            None => 0.0,
        }
    }

    /// Progress towards the target exercise count, may exceed 100
    pub fn progress_percent(&self) -> f64 {
        self.exercises.len() as f64 / TARGET_EXERCISES as f64 * 100.0
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

fn workout_name(workout_type: WorkoutType, today: DateTime<Local>) -> String {
    format!(
        "{:02}-{:02}-{}-{}",
        today.day(),
        today.month(),
        today.year(),
        workout_type.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()
    }

    fn create_exercise(name: &str, sets: &[(f64, u32)]) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: sets.iter().map(|&(weight, reps)| ExerciseSet { weight, reps }).collect(),
        }
    }

    #[test]
    fn test_start_is_empty() {
        let workout = Workout::start(start_time());
        assert!(workout.name.is_empty());
        assert!(workout.exercises.is_empty());
        assert!(!workout.is_finished());
        assert_eq!(workout.total_volume(), 0.0);
    }

    #[test]
    fn test_empty_volume_is_positive_zero() {
        let workout = Workout::start(start_time());
        assert_eq!(crate::format::format_kg(workout.total_volume(), 1), "0.0 kg");
        assert_eq!(crate::format::format_kg(create_exercise("Squats", &[]).volume(), 1), "0.0 kg");
    }

    #[test]
    fn test_choose_type_names_workout() {
        let mut workout = Workout::start(start_time());
        let today = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        workout.choose_type(WorkoutType::FullBody, today).unwrap();
        assert_eq!(workout.name, "05-03-2024-Full Body");
    }

    #[test]
    fn test_choose_type_only_once() {
        let mut workout = Workout::start(start_time());
        let today = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        workout.choose_type(WorkoutType::Push, today).unwrap();
        let err = workout.choose_type(WorkoutType::Legs, today).unwrap_err();
        assert_eq!(err, WorkoutError::TypeAlreadyChosen(WorkoutType::Push));
        assert_eq!(workout.name, "05-03-2024-Push");
    }

    #[test]
    fn test_add_exercise_requires_name_and_sets() {
        let mut workout = Workout::start(start_time());
        assert_eq!(
            workout.add_exercise(create_exercise("  ", &[(50.0, 5)])),
            Err(WorkoutError::MissingName)
        );
        assert_eq!(
            workout.add_exercise(create_exercise("Squats", &[])),
            Err(WorkoutError::NoSets)
        );
        assert!(workout.exercises.is_empty());

        workout.add_exercise(create_exercise("Squats", &[(50.0, 5)])).unwrap();
        assert_eq!(workout.exercises.len(), 1);
    }

    #[test]
    fn test_total_volume() {
        let mut workout = Workout::start(start_time());
        workout.add_exercise(create_exercise("Squats", &[(100.0, 10), (110.0, 8)])).unwrap(); // 1880
        workout.add_exercise(create_exercise("Rows", &[(22.5, 10)])).unwrap(); // 225
        assert_eq!(workout.total_volume(), 2105.0);
        assert_eq!(workout.total_sets(), 3);
    }

    #[test]
    fn test_finish_is_permanent() {
        let mut workout = Workout::start(start_time());
        let end = start_time() + Duration::minutes(45);
        workout.finish(end).unwrap();
        assert_eq!(workout.finish(end + Duration::minutes(5)), Err(WorkoutError::AlreadyFinished));
        assert_eq!(workout.finished_at, Some(end));
        assert_eq!(
            workout.add_exercise(create_exercise("Rows", &[(40.0, 10)])),
            Err(WorkoutError::AlreadyFinished)
        );
    }

    #[test]
    fn test_duration_minutes_rounds() {
        let workout = Workout::start(start_time());
        assert_eq!(workout.duration_minutes(start_time() + Duration::seconds(89)), 1);
        assert_eq!(workout.duration_minutes(start_time() + Duration::seconds(90)), 2);
        assert_eq!(workout.duration_minutes(start_time() + Duration::seconds(29)), 0);
    }

    #[test]
    fn test_duration_uses_finish_time() {
        let mut workout = Workout::start(start_time());
        workout.finish(start_time() + Duration::minutes(90)).unwrap();
        let much_later = start_time() + Duration::hours(10);
        assert_eq!(workout.duration_minutes(much_later), 90);
        assert_eq!(workout.elapsed_secs(much_later), 90 * 60);
        assert_eq!(workout.finished_minutes(), 90.0);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let workout = Workout::start(start_time());
        assert_eq!(workout.elapsed_secs(start_time() - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_progress_percent() {
        let mut workout = Workout::start(start_time());
        assert_eq!(workout.progress_percent(), 0.0);
        for i in 0..6 {
            workout.add_exercise(create_exercise(&format!("ex{}", i), &[(10.0, 1)])).unwrap();
        }
        assert_eq!(workout.progress_percent(), 120.0);
    }

    #[test]
    fn test_workout_json_shape() {
        let workout = Workout::start(start_time());
        let json = serde_json::to_value(&workout).unwrap();
        assert!(json.get("startedAt").is_some());
        assert!(json.get("finishedAt").unwrap().is_null());
        assert!(json.get("workoutType").is_none());
    }
}

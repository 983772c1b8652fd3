//! Exercise draft - the exercise being built before it joins the workout

use crate::workout::{Exercise, ExerciseSet, WorkoutError, KNOWN_EXERCISES};

/// What the exercise selector points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseChoice {
    Known(&'static str),
    Custom,
}

impl ExerciseChoice {
    /// Selector entries: known exercises followed by Custom
    pub fn all() -> Vec<ExerciseChoice> {
        KNOWN_EXERCISES
            .iter()
            .map(|&name| ExerciseChoice::Known(name))
            .chain(std::iter::once(ExerciseChoice::Custom))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseChoice::Known(name) => name,
            ExerciseChoice::Custom => "Custom Exercise",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseDraft {
    pub choice: Option<ExerciseChoice>,
    pub custom_name: String,
    pub sets: Vec<ExerciseSet>,
}

impl ExerciseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick an exercise; starts over with no sets
    pub fn select(&mut self, choice: ExerciseChoice) {
        self.choice = Some(choice);
        self.sets.clear();
    }

    pub fn is_custom(&self) -> bool {
        self.choice == Some(ExerciseChoice::Custom)
    }

    /// Name the exercise would be saved under
    pub fn name(&self) -> &str {
        match self.choice {
            Some(ExerciseChoice::Known(name)) => name,
            Some(ExerciseChoice::Custom) => self.custom_name.trim(),
            None => "",
        }
    }

    /// Append a set copying the previous one, or an empty set
    pub fn add_set(&mut self) {
        let next = self.sets.last().copied().unwrap_or_default();
        self.sets.push(next);
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), WorkoutError> {
        let set = self.sets.get_mut(index).ok_or(WorkoutError::SetOutOfRange(index))?;
        set.weight = weight.max(0.0);
        Ok(())
    }

    pub fn set_reps(&mut self, index: usize, reps: u32) -> Result<(), WorkoutError> {
        let set = self.sets.get_mut(index).ok_or(WorkoutError::SetOutOfRange(index))?;
        set.reps = reps;
        Ok(())
    }

    pub fn remove_set(&mut self, index: usize) -> Result<ExerciseSet, WorkoutError> {
        if index >= self.sets.len() {
            return Err(WorkoutError::SetOutOfRange(index));
        }
        Ok(self.sets.remove(index))
    }

    /// Validate and take the exercise, leaving an empty draft behind
    pub fn commit(&mut self) -> Result<Exercise, WorkoutError> {
        let name = self.name().to_string();
        if name.is_empty() {
            return Err(WorkoutError::MissingName);
        }
        if self.sets.is_empty() {
            return Err(WorkoutError::NoSets);
        }
        let sets = std::mem::take(&mut self.sets);
        *self = Self::default();
        Ok(Exercise { name, sets })
    }
}

/// Parse weight input; anything unparsable or negative is 0
pub fn parse_weight(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => w,
        _ => 0.0,
    }
}

/// Parse reps input from its leading digits; anything else is 0
pub fn parse_reps(input: &str) -> u32 {
    let digits: String = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

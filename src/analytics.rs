//! Analytics over workout history - stat cards and chart series

use serde::{Deserialize, Serialize};

use crate::workout::Workout;

/// A user's workout history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWorkouts {
    pub user_id: String,
    pub workouts: Vec<Workout>,
}

/// One bar of the duration chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationPoint {
    pub name: String,
    pub minutes: f64,
}

/// One slice of the exercise frequency chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencySlice {
    pub name: String,
    pub count: usize,
    /// Whole-number share of all appearances
    pub percent: u32,
}

impl FrequencySlice {
    /// Pie label, e.g. `Squats 17%`
    pub fn label(&self) -> String {
        format!("{} {}%", self.name, self.percent)
    }
}

/// Everything the Analyze screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub user_id: String,
    pub total_workouts: usize,
    pub average_duration_minutes: f64,
    pub total_weight_lifted: f64,
    pub durations: Vec<DurationPoint>,
    pub exercise_frequency: Vec<FrequencySlice>,
}

/// Training analytics
pub struct Analytics<'a> {
    workouts: &'a [Workout],
}

impl<'a> Analytics<'a> {
    pub fn new(workouts: &'a [Workout]) -> Self {
        Self { workouts }
    }

    pub fn total_workouts(&self) -> usize {
        self.workouts.len()
    }

    /// Finished time summed, divided by all workouts (unfinished count as 0)
    pub fn average_duration_minutes(&self) -> f64 {
        if self.workouts.is_empty() {
            return 0.0;
        }
        let total = self.workouts.iter().map(Workout::finished_minutes).fold(0.0, |acc, v| acc + v);
        total / self.workouts.len() as f64
    }

    /// Sum of weight x reps over every set in the history
    pub fn total_weight_lifted(&self) -> f64 {
        self.workouts.iter().map(Workout::total_volume).fold(0.0, |acc, v| acc + v)
    }

    pub fn duration_series(&self) -> Vec<DurationPoint> {
        self.workouts
            .iter()
            .map(|w| DurationPoint {
                name: w.name.clone(),
                minutes: w.finished_minutes(),
            })
            .collect()
    }

    /// Appearances per exercise name, in order of first appearance
    pub fn exercise_frequency(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for exercise in self.workouts.iter().flat_map(|w| &w.exercises) {
            match counts.iter_mut().find(|(name, _)| *name == exercise.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((exercise.name.clone(), 1)),
            }
        }
        counts
    }

    pub fn frequency_shares(&self) -> Vec<FrequencySlice> {
        let counts = self.exercise_frequency();
        let total: usize = counts.iter().map(|(_, c)| c).sum();

        counts
            .into_iter()
            .map(|(name, count)| {
                let percent = if total == 0 {
                    0
                } else {
                    (count as f64 / total as f64 * 100.0).round() as u32
                };
                FrequencySlice { name, count, percent }
            })
            .collect()
    }

    pub fn report(&self, user_id: &str) -> Report {
        Report {
            user_id: user_id.to_string(),
            total_workouts: self.total_workouts(),
            average_duration_minutes: self.average_duration_minutes(),
            total_weight_lifted: self.total_weight_lifted(),
            durations: self.duration_series(),
            exercise_frequency: self.frequency_shares(),
        }
    }
}

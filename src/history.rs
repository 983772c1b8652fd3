//! Workout history - in-memory only, seeded from mock data or a JSON file

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::analytics::{Analytics, UserWorkouts};
use crate::workout::Workout;

const MOCK_WORKOUTS: &str = include_str!("../data/mock_workouts.json");

/// History wrapper, never written back to disk
#[derive(Debug, Clone)]
pub struct History {
    data: UserWorkouts,
}

impl History {
    /// Built-in demo history
    pub fn mock() -> Result<Self> {
        let data: UserWorkouts =
            serde_json::from_str(MOCK_WORKOUTS).context("embedded mock workouts are invalid")?;
        Ok(Self { data })
    }

    /// Read a history file with the same shape as the mock data
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read history {}", path.display()))?;
        let data: UserWorkouts = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse history {}", path.display()))?;
        info!("Loaded {} workouts for {} from {}", data.workouts.len(), data.user_id, path.display());
        Ok(Self { data })
    }

    /// Load from `path` when given, otherwise the mock
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::mock(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.data.user_id
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.data.workouts
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics::new(&self.data.workouts)
    }

    /// Add a finished session; unfinished ones are ignored
    pub fn record(&mut self, workout: &Workout) -> bool {
        if !workout.is_finished() {
            warn!("Ignoring unfinished workout {:?}", workout.name);
            return false;
        }
        self.data.workouts.push(workout.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_mock_history() {
        let history = History::mock().unwrap();
        assert_eq!(history.user_id(), "user123");
        assert_eq!(history.workouts().len(), 2);
        assert_eq!(history.workouts()[0].name, "Full Body Workout");
        assert_eq!(history.workouts()[1].exercises[2].sets[1].weight, 22.5);
    }

    #[test]
    fn test_mock_analytics() {
        let history = History::mock().unwrap();
        let analytics = history.analytics();
        assert_eq!(analytics.total_workouts(), 2);
        assert_eq!(analytics.average_duration_minutes(), 82.5);
        assert_eq!(analytics.total_weight_lifted(), 9125.0);
        assert_eq!(analytics.exercise_frequency().len(), 6);
    }

    #[test]
    fn test_record_only_finished() {
        let mut history = History::mock().unwrap();
        let mut workout = Workout::start(Utc::now());
        assert!(!history.record(&workout));
        assert_eq!(history.workouts().len(), 2);

        workout.finish(Utc::now() + Duration::minutes(1)).unwrap();
        assert!(history.record(&workout));
        assert_eq!(history.workouts().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = History::load(Path::new("/nonexistent/history.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read history"));
    }

    #[test]
    fn test_load_roundtrip_file() {
        let history = History::mock().unwrap();
        let path = std::env::temp_dir().join(format!("ironlog-history-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string_pretty(&history.data).unwrap()).unwrap();

        let loaded = History::open(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.workouts(), history.workouts());
    }
}

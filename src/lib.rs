//! ironlog - Gym workout tracker
//!
//! Log a session's exercises and sets, watch the running summary, and browse
//! analytics over past workouts. Everything lives in memory.

pub mod analytics;
pub mod config;
pub mod draft;
pub mod format;
pub mod history;
pub mod tui;
pub mod workout;

pub use history::History;
pub use workout::{Exercise, ExerciseSet, Workout, WorkoutError, WorkoutType};

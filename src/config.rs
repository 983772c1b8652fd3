//! Runtime configuration and logging setup

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Settings gathered from CLI flags and environment
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// History JSON to load instead of the built-in mock
    pub history: Option<PathBuf>,
    /// Log file for TUI sessions
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Set up tracing. Interactive sessions log to the file when one is
    /// configured and otherwise only emit warnings, so the screen stays clean.
    pub fn init_logging(&self, interactive: bool) -> Result<()> {
        let default_level = if interactive && self.log_file.is_none() { "warn" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        match &self.log_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
        Ok(())
    }
}

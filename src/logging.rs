//! `tracing` subscriber setup.
//!
//! Scripting commands log to stderr. The form owns the terminal (raw mode +
//! alternate screen), so it only logs when a log file is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::{AppError, EXIT_INPUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    FileOnly,
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(config: &AppConfig, sink: LogSink) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Invalid log filter '{}': {e}", config.log_filter))
    })?;

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open log file '{}': {e}", path.display())))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        return Ok(());
    }

    if sink == LogSink::Stderr {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

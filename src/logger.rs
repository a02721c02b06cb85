//! Logging utilities: an in-memory session log for the logs overlay, plus
//! optional file logging for the `log` macros.

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::constants::DEFAULT_LOG_FILE;

/// How many session log entries are retained.
const LOG_CAPACITY: usize = 200;

/// Shared session logger that can be cloned across the application.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a log entry, dropping the oldest once the capacity is reached.
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= LOG_CAPACITY {
                logs.remove(0);
            }
            logs.push(formatted_message);
        }
    }

    /// Get all log entries, newest first.
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Route `log` macro output to a file when file logging is enabled.
/// Terminal output would corrupt the TUI, so stdout is never a target.
pub fn setup_file_logging(config: &Config) -> Result<()> {
    if !config.logging.enabled {
        return Ok(());
    }

    let path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(&path).with_context(|| format!("Failed to open log file: {path}"))?)
        .apply()
        .context("Failed to install file logger")?;

    Ok(())
}

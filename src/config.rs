//! Configuration management for the TaskView client
//!
//! This module handles loading, parsing, and validation of configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;
use crate::service::rest::DEFAULT_BASE_URL;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL all REST paths are resolved against
    pub base_url: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support
    pub mouse_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable file logging
    pub enabled: bool,
    /// Log file path; defaults to taskview.log in the working directory
    pub file: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { mouse_enabled: false }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        match Self::find_config_file()? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("taskview").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            anyhow::bail!("service.base_url cannot be empty");
        }
        if !self.service.base_url.starts_with("http://") && !self.service.base_url.starts_with("https://") {
            anyhow::bail!(
                "service.base_url must be an absolute http(s) URL, got '{}'",
                self.service.base_url
            );
        }

        if let Some(file) = &self.logging.file {
            if file.trim().is_empty() {
                anyhow::bail!("logging.file cannot be empty when set");
            }
        }

        Ok(())
    }
}

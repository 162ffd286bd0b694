//! Configuration settings for pomowork.
//!
//! Settings are loaded from `~/.pomowork/config.yaml`.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::PomoworkError;
use crate::session::durations::{
    break_seconds, work_seconds, DEFAULT_BREAK_COUNT, DEFAULT_BREAK_LABEL, DEFAULT_WORK_LABEL,
};
use crate::session::SessionSettings;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default timer selections.
    pub session: SessionConfig,
    /// Persistence settings.
    pub storage: StorageConfig,
    /// Log settings.
    pub logging: LoggingConfig,
}

/// Default timer selections, restored on every reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Work interval label, e.g. `25m`.
    #[serde(default = "default_work_duration")]
    pub work_duration: String,
    /// Break interval label, e.g. `5m`.
    #[serde(default = "default_break_duration")]
    pub break_duration: String,
    /// Breaks per cycle.
    #[serde(default = "default_break_count")]
    pub break_count: u32,
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key of the to-do blob in the database.
    #[serde(default = "default_todo_key")]
    pub todo_key: String,
}

/// Log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
fn default_work_duration() -> String {
    DEFAULT_WORK_LABEL.to_string()
}

fn default_break_duration() -> String {
    DEFAULT_BREAK_LABEL.to_string()
}

const fn default_break_count() -> u32 {
    DEFAULT_BREAK_COUNT
}

fn default_todo_key() -> String {
    "todos".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            break_duration: default_break_duration(),
            break_count: default_break_count(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            todo_key: default_todo_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SessionConfig {
    /// Resolve labels into session settings.
    ///
    /// Unknown labels resolve to zero seconds; a zero break count falls
    /// back to the default.
    #[must_use]
    pub fn to_settings(&self) -> SessionSettings {
        let target_break_count = if self.break_count == 0 {
            warn!("break_count must be positive, using {DEFAULT_BREAK_COUNT}");
            DEFAULT_BREAK_COUNT
        } else {
            self.break_count
        };

        SessionSettings {
            work_seconds: work_seconds(&self.work_duration),
            break_seconds: break_seconds(&self.break_duration),
            target_break_count,
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter, `Info` when unrecognized.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from `paths`, writing the defaults on first run.
    ///
    /// The written file lists every setting so it can be edited by hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be parsed or created.
    pub fn load_or_create(paths: &Paths) -> Result<Self, PomoworkError> {
        if paths.config_file.exists() {
            return Self::load_from_path(&paths.config_file);
        }

        let config = Self::default();
        config.save_to_path(&paths.config_file)?;
        info!("Wrote default config to {}", paths.config_file.display());
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomoworkError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoworkError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomoworkError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomoworkError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoworkError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomoworkError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

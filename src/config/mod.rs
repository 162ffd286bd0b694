//! Configuration management for pomowork.
//!
//! This module handles loading configuration from `~/.pomowork/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, LoggingConfig, SessionConfig, StorageConfig};

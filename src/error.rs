//! Error types for pomowork.

use thiserror::Error;

/// Errors that can occur in pomowork.
#[derive(Debug, Error)]
pub enum PomoworkError {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The terminal UI could not be set up or drawn.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// User input was rejected (for example an empty to-do text).
    #[error("{0}")]
    Validation(String),

    /// The referenced item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl PomoworkError {
    /// Whether the error is a recoverable input problem to show to the user.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<serde_json::Error> for PomoworkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for PomoworkError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

//! Error types for pomodoro.

use thiserror::Error;

/// Errors surfaced by the pomodoro library.
///
/// Timer operations themselves never fail; these cover the ambient layers
/// around them (configuration, storage, the terminal, notifications).
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// Configuration or path resolution failed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The key-value store could not be read or written.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization or parsing failed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The terminal could not be set up or drawn.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A notification could not be delivered.
    #[error("notification error: {0}")]
    Notification(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PomodoroError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for PomodoroError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for PomodoroError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

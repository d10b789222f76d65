//! Log setup.
//!
//! Logs go to `~/.pomodoro/logs/pomodoro.log`, never to the terminal: the
//! TUI owns the screen. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, Paths};
use crate::error::PomodoroError;

/// Build the filter from `RUST_LOG`, else from the config.
#[must_use]
pub fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to the log file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(paths: &Paths, config: &LoggingConfig) -> Result<(), PomodoroError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())?;

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();

        init(&paths, &LoggingConfig::default()).unwrap();
        assert!(paths.log_file().exists());
    }

    #[test]
    fn test_bad_level_falls_back() {
        let config = LoggingConfig {
            level: "not a [valid filter".to_string(),
        };
        // Must not panic.
        let _ = filter(&config);
    }
}

//! Path resolution for pomodoro configuration and data files.
//!
//! All pomodoro data is stored in `~/.pomodoro/`:
//! - `config.yaml` - Application configuration
//! - `store.db` - `SQLite` key-value store holding the timer settings
//! - `logs/` - Log files
//! - `cache/` - Generated files (the rendered chime)

use std::path::PathBuf;

use crate::error::PomodoroError;

/// Paths to pomodoro configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomodoro/`
    pub root: PathBuf,
    /// Config file: `~/.pomodoro/config.yaml`
    pub config_file: PathBuf,
    /// Key-value store: `~/.pomodoro/store.db`
    pub database: PathBuf,
    /// Logs directory: `~/.pomodoro/logs/`
    pub logs: PathBuf,
    /// Cache directory: `~/.pomodoro/cache/`
    pub cache: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomodoroError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomodoroError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomodoro")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("store.db"),
            logs: root.join("logs"),
            cache: root.join("cache"),
            root,
        }
    }

    /// Resolve paths from an optional override, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory cannot be determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, PomodoroError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r)))
    }

    /// Log file: `~/.pomodoro/logs/pomodoro.log`
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("pomodoro.log")
    }

    /// Rendered chime: `~/.pomodoro/cache/chime.wav`
    #[must_use]
    pub fn chime_file(&self) -> PathBuf {
        self.cache.join("chime.wav")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomodoroError> {
        for dir in [&self.root, &self.logs, &self.cache] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    PomodoroError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".pomodoro"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-pomodoro");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("store.db"));
        assert_eq!(paths.log_file(), root.join("logs").join("pomodoro.log"));
        assert_eq!(paths.chime_file(), root.join("cache").join("chime.wav"));
    }

    #[test]
    fn test_resolve_override() {
        let root = PathBuf::from("/tmp/elsewhere");
        let paths = Paths::resolve(Some(root.clone())).unwrap();
        assert_eq!(paths.root, root);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.logs.exists());
        assert!(paths.cache.exists());
    }
}

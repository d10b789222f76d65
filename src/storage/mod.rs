//! Storage layer for pomodoro.
//!
//! Settings are the only durable record. They are kept in a string key-value
//! store, either `SQLite` on disk or a map in memory.

mod database;
mod migrations;

use std::collections::HashMap;

use crate::error::PomodoroError;

pub use database::Database;

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PomodoroError>;
}

/// In-memory store, used by tests and when the database cannot be opened.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PomodoroError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

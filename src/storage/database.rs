//! `SQLite`-backed key-value store.
//!
//! The database lives at `~/.pomodoro/store.db` and holds a single `kv`
//! table. It plays the role of browser local storage: string keys, string
//! values, overwritten wholesale.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::PomodoroError;

use super::migrations;
use super::KeyValueStore;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, PomodoroError> {
        let conn = Connection::open(path).map_err(|e| {
            PomodoroError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn migrate(&self) -> Result<(), PomodoroError> {
        migrations::run(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| PomodoroError::Database(format!("Failed to read {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PomodoroError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| PomodoroError::Database(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

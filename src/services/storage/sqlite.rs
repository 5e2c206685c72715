// SQLite-backed event store
// Key-value table holding the serialized event list

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use super::{EventStore, STORAGE_KEY};
use crate::models::countdown_event::CountdownEvent;

pub const DATABASE_FILE: &str = "countdown.db";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database and make sure the schema exists.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use rust_countdown::services::storage::{EventStore, SqliteStore};
    /// let store = SqliteStore::open(":memory:").unwrap();
    /// assert!(!store.is_initialized().unwrap());
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// `<dir>/countdown.db`, creating `dir` when missing
    pub fn open_in_dir(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Self::open(dir.join(DATABASE_FILE))
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS key_value_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create key_value_store table")?;
        Ok(())
    }

    fn read_value(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key {}", key))
    }

    fn write_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO key_value_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = CURRENT_TIMESTAMP",
                (key, value),
            )
            .with_context(|| format!("Failed to write key {}", key))?;
        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl EventStore for SqliteStore {
    fn load_all(&self) -> Result<Vec<CountdownEvent>> {
        match self.read_value(STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .context("Failed to deserialize events stored in database"),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&self, events: &[CountdownEvent]) -> Result<()> {
        let json = serde_json::to_string(events)?;
        self.write_value(STORAGE_KEY, &json)?;
        log::debug!("Saved {} events to database", events.len());
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.read_value(STORAGE_KEY)?.is_some())
    }
}

//! SQLite-backed key/value storage for locally persisted state.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::favorites::{StoragePort, Versioned};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn init(&self) -> Result<(), StorageError> {
        let conn = self.conn();
        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS local_storage (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    revision INTEGER NOT NULL DEFAULT 1
                );",
            )?;
            conn.pragma_update(None, "user_version", 1)?;
        }

        Ok(())
    }

}

impl StoragePort for Db {
    fn read(&self, key: &str) -> Result<Option<Versioned>, StorageError> {
        self.conn()
            .query_row(
                "SELECT value, revision FROM local_storage WHERE key = ?1",
                params![key],
                |row| {
                    Ok(Versioned {
                        value: row.get(0)?,
                        revision: row.get::<_, i64>(1)? as u64,
                    })
                },
            )
            .optional()
            .map_err(StorageError::from)
    }

    fn write(&self, key: &str, value: &str, expected: Option<u64>) -> Result<bool, StorageError> {
        let conn = self.conn();
        let changed = match expected {
            None => conn.execute(
                "INSERT INTO local_storage (key, value, revision) VALUES (?1, ?2, 1)
                 ON CONFLICT(key) DO NOTHING",
                params![key, value],
            )?,
            Some(revision) => conn.execute(
                "UPDATE local_storage SET value = ?2, revision = revision + 1
                 WHERE key = ?1 AND revision = ?3",
                params![key, value, revision as i64],
            )?,
        };
        Ok(changed == 1)
    }
}

//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Wrapped connections are migrated to `latest_version()`.
//! - Writes upsert one row per key and refresh `updated_at`.

use super::{KvError, KvResult, PersistenceStore};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Persistence store over the `kv_entries` table.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> KvResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn try_new(conn: Connection) -> KvResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(&conn)?;
        if actual_version != expected_version {
            return Err(KvError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Gives the connection back, e.g. for inspection in tests.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl PersistenceStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value
                 FROM kv_entries
                 WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        let result = self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value,
                 updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        );
        if let Err(err) = &result {
            error!("event=kv_set module=persist status=error key={key} error={err}");
        }
        result?;
        Ok(())
    }
}

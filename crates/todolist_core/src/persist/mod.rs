//! Key-value persistence store contracts.
//!
//! # Responsibility
//! - Define the get/set contract the mutation pipeline writes through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - A missing key is reported as `Ok(None)`, never as an error.
//! - `set` replaces the previous value for the key wholesale.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

/// Key under which the serialized task sequence is stored.
pub const TODOS_KEY: &str = "todos";

/// Result type used by persistence store operations.
pub type KvResult<T> = Result<T, KvError>;

/// Persistence store failures.
#[derive(Debug)]
pub enum KvError {
    /// SQLite rejected a statement or the connection.
    Sqlite(rusqlite::Error),
    /// Database file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection is not migrated to the expected schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backend refused the operation.
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "todo database schema {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key-value store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Unavailable(message) => write!(f, "key-value store unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::UninitializedConnection { .. }
            | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous key-value store holding serialized blobs.
pub trait PersistenceStore {
    /// Loads the value for `key`, if any.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Writes `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
}

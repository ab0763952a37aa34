//! SQLite bootstrap for the key-value persistence backend.
//!
//! Connections come back migrated or not at all; failures surface as
//! `KvError` so the store has one error type end to end.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

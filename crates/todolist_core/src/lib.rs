//! Core domain logic for the TodoList app.
//! This crate is the single source of truth for list order and persistence.

pub mod codec;
pub mod db;
pub mod drag;
pub mod logging;
pub mod model;
pub mod persist;
pub mod render;
pub mod service;
pub mod store;
pub mod transfer;

pub use codec::{deserialize, serialize, serialize_pretty, CodecError, CodecResult};
pub use drag::{find_drop_candidate, visual_order, DragController, DragState};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::form::TaskForm;
pub use model::task::{Task, TaskValidationError};
pub use persist::{
    KvError, KvResult, MemoryKvStore, PersistenceStore, SqliteKvStore, TODOS_KEY,
};
pub use render::{
    render, DropSlot, EntryAction, EntryBox, EntryView, LayoutMetrics, ListView, VisualRow,
    DUE_PREFIX,
};
pub use service::todo_service::{ImportNotice, PipelineError, PipelineResult, TodoListService};
pub use store::{RecordStore, StoreError, StoreResult};
pub use transfer::{
    DirectoryTransfer, ExportFile, FileTransfer, TransferError, TransferResult, EXPORT_FILE_NAME,
    EXPORT_MIME_TYPE,
};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

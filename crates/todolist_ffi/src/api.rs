//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list, add, delete, drag, export and import to the UI shell.
//! - Keep one task list session per process behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutating call returns the freshly rendered list.
//! - Indexes crossing the boundary are render-time tags from the last
//!   snapshot the shell received.

use log::warn;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Mutex;
use todolist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DirectoryTransfer, DropSlot, EntryBox, ImportNotice, ListView, SqliteKvStore, TaskForm,
    TodoListService,
};

const DB_FILE_NAME: &str = "todolist.sqlite3";
const DB_PATH_ENV: &str = "TODOLIST_DB_PATH";
const NOTHING_DROPPED: &str = "Nothing to reorder; order unchanged.";
static SESSION: OnceCell<Mutex<TodoListService<SqliteKvStore>>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Render-time position; pass back for delete and drag calls.
    pub index: u32,
    pub title: String,
    pub description: Option<String>,
    /// Ready-to-display due row.
    pub due: Option<String>,
    /// Whether this entry is the active drag source.
    pub dragging: bool,
}

/// Rendered list snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoListSnapshot {
    pub items: Vec<TodoItem>,
    /// Tag of the entry the drop indicator sits before.
    pub indicator_before: Option<u32>,
    /// Whether the drop indicator sits after the last entry.
    pub indicator_at_end: bool,
}

/// Measured entry box supplied by the shell during drag-over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodoItemBox {
    pub index: u32,
    pub top: f64,
    pub height: f64,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    /// List after the operation (unchanged on failure).
    pub snapshot: TodoListSnapshot,
}

/// Returns the current list.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListSnapshot {
    with_session(|service| to_snapshot(service.view()))
        .and_then(|snapshot| snapshot)
        .unwrap_or_else(|err| {
            warn!("event=todo_list module=ffi status=error error={err}");
            TodoListSnapshot::default()
        })
}

/// Appends a task from raw form values.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String, description: String, date: String) -> TodoActionResponse {
    run_action("Task added.", |service| {
        service
            .add_from_form(TaskForm::new(title, description, date))
            .map_err(|err| err.to_string())
    })
}

/// Deletes the entry tagged `index`; stale indexes succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(index: u32) -> TodoActionResponse {
    run_action("Task deleted.", |service| {
        service
            .delete(from_ffi_index(index))
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

/// Begins a drag gesture on the entry tagged `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drag_start(index: u32) -> TodoListSnapshot {
    gesture(|service| {
        service.drag_start(from_ffi_index(index));
    })
}

/// Moves the drop indicator for a pointer at `pointer_y`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drag_over(pointer_y: f64, boxes: Vec<TodoItemBox>) -> TodoListSnapshot {
    let layout = boxes
        .into_iter()
        .map(|item| EntryBox {
            index: from_ffi_index(item.index),
            top: item.top,
            height: item.height,
        })
        .collect::<Vec<_>>();
    gesture(|service| {
        service.drag_over(pointer_y, &layout);
    })
}

/// Pointer left the list container.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drag_leave() -> TodoListSnapshot {
    gesture(|service| service.drag_leave())
}

/// Gesture ended without a drop.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drag_end() -> TodoListSnapshot {
    gesture(|service| service.drag_end())
}

/// Drops the dragged entry and commits the new order.
///
/// `ok` is `false` with an explanatory message when the drop committed
/// nothing (no gesture, no indicator, or the list changed mid-drag).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drop() -> TodoActionResponse {
    run_action("Order saved.", |service| match service.drop_entry() {
        Ok(true) => Ok(()),
        Ok(false) => Err(NOTHING_DROPPED.to_string()),
        Err(err) => Err(err.to_string()),
    })
}

/// Writes `todos.json` into `target_dir`; the message carries the path.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_export(target_dir: String) -> TodoActionResponse {
    let transfer = DirectoryTransfer::new(target_dir.trim());
    let mut exported_to = PathBuf::new();
    let mut response = run_action("", |service| {
        exported_to = service.export(&transfer).map_err(|err| err.to_string())?;
        Ok(())
    });
    if response.ok {
        response.message = exported_to.display().to_string();
    }
    response
}

/// Replaces the list with the JSON text of a user-selected file.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_import(text: String) -> TodoActionResponse {
    let outcome = with_session(|service| {
        let notice = ImportNotice::from_result(&service.import_text(&text));
        to_snapshot(service.view()).map(|snapshot| (notice, snapshot))
    })
    .and_then(|outcome| outcome);
    match outcome {
        Ok((notice, snapshot)) => TodoActionResponse {
            ok: notice.is_success(),
            message: notice.message(),
            snapshot,
        },
        Err(err) => failure(err),
    }
}

fn run_action(
    success_message: &str,
    f: impl FnOnce(&mut TodoListService<SqliteKvStore>) -> Result<(), String>,
) -> TodoActionResponse {
    let outcome = with_session(|service| {
        let result = f(service);
        to_snapshot(service.view()).map(|snapshot| (result, snapshot))
    })
    .and_then(|outcome| outcome);
    match outcome {
        Ok((Ok(()), snapshot)) => TodoActionResponse {
            ok: true,
            message: success_message.to_string(),
            snapshot,
        },
        Ok((Err(err), snapshot)) => TodoActionResponse {
            ok: false,
            message: err,
            snapshot,
        },
        Err(err) => failure(err),
    }
}

fn gesture(f: impl FnOnce(&mut TodoListService<SqliteKvStore>)) -> TodoListSnapshot {
    with_session(|service| {
        f(service);
        to_snapshot(service.view())
    })
    .and_then(|snapshot| snapshot)
    .unwrap_or_else(|err| {
        warn!("event=drag_gesture module=ffi status=error error={err}");
        TodoListSnapshot::default()
    })
}

fn failure(message: String) -> TodoActionResponse {
    TodoActionResponse {
        ok: false,
        message,
        snapshot: TodoListSnapshot::default(),
    }
}

fn with_session<T>(f: impl FnOnce(&mut TodoListService<SqliteKvStore>) -> T) -> Result<T, String> {
    let session = SESSION.get_or_try_init(|| -> Result<_, String> {
        let db_path = resolve_db_path();
        let store = SqliteKvStore::open(&db_path)
            .map_err(|err| format!("todo DB open failed: {err}"))?;
        let service =
            TodoListService::open(store).map_err(|err| format!("todo list load failed: {err}"))?;
        Ok(Mutex::new(service))
    })?;
    let mut service = session
        .lock()
        .map_err(|_| "todo session is poisoned".to_string())?;
    Ok(f(&mut service))
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

fn to_snapshot(view: &ListView) -> Result<TodoListSnapshot, String> {
    let items = view
        .entries
        .iter()
        .map(|entry| {
            Ok(TodoItem {
                index: to_ffi_index(entry.index)?,
                title: entry.title.clone(),
                description: entry.description.clone(),
                due: entry.due.clone(),
                dragging: entry.dragging,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;
    let indicator_before = match view.indicator {
        Some(DropSlot::Before(index)) => Some(to_ffi_index(index)?),
        _ => None,
    };
    Ok(TodoListSnapshot {
        items,
        indicator_before,
        indicator_at_end: view.indicator == Some(DropSlot::End),
    })
}

fn to_ffi_index(index: usize) -> Result<u32, String> {
    u32::try_from(index).map_err(|_| format!("entry index {index} exceeds the FFI index range"))
}

fn from_ffi_index(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

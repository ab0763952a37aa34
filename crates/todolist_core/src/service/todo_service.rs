//! Task list use-case service (the mutation pipeline).
//!
//! # Responsibility
//! - Own the record store, the drag controller and the current view.
//! - Run every mutation through mutate -> persist -> render.
//! - Translate drag gestures into reorder commits.
//!
//! # Invariants
//! - Add, delete, reorder and import are the only paths that change tasks.
//! - A failed persist write rolls the in-memory sequence back.
//! - Import decodes fully before touching the record store.
//! - Structural mutations cancel any in-flight drag gesture.
//! - Log lines carry counts and indexes only, never task text.

use crate::codec::{self, CodecError};
use crate::drag::{DragController, DragState};
use crate::model::form::TaskForm;
use crate::model::task::{Task, TaskValidationError};
use crate::persist::{KvError, PersistenceStore, TODOS_KEY};
use crate::render::{render, DropSlot, EntryAction, EntryBox, ListView};
use crate::store::RecordStore;
use crate::transfer::{ExportFile, FileTransfer, TransferError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Result type used by pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by the mutation pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// New task failed validation.
    Validation(TaskValidationError),
    /// Serialized text could not be encoded or decoded.
    Codec(CodecError),
    /// Persistence store read/write failed.
    Persist(KvError),
    /// Export/import file plumbing failed.
    Transfer(TransferError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::Transfer(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for PipelineError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CodecError> for PipelineError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<KvError> for PipelineError {
    fn from(value: KvError) -> Self {
        Self::Persist(value)
    }
}

impl From<TransferError> for PipelineError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// User-facing outcome of an import attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportNotice {
    /// Store was replaced with `count` tasks.
    Imported { count: usize },
    /// File parsed but is not a list of tasks.
    InvalidShape,
    /// File is not valid JSON.
    ParseError,
    /// Reading the file or persisting the result failed.
    Failed(String),
}

impl ImportNotice {
    /// Classifies an import result for display.
    pub fn from_result(result: &PipelineResult<usize>) -> Self {
        match result {
            Ok(count) => Self::Imported { count: *count },
            Err(PipelineError::Codec(CodecError::ShapeMismatch(_))) => Self::InvalidShape,
            Err(PipelineError::Codec(CodecError::MalformedInput(_))) => Self::ParseError,
            Err(other) => Self::Failed(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Imported { .. })
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Imported { .. } => "Todos imported!".to_string(),
            Self::InvalidShape => "Invalid JSON file.".to_string(),
            Self::ParseError => "Error parsing JSON file.".to_string(),
            Self::Failed(details) => format!("Import failed: {details}"),
        }
    }
}

/// Task list facade over a persistence store.
pub struct TodoListService<S: PersistenceStore> {
    store: S,
    records: RecordStore,
    drag: DragController,
    view: ListView,
}

impl<S: PersistenceStore> TodoListService<S> {
    /// Loads the persisted list (missing key means empty) and renders it.
    ///
    /// A persisted value that no longer decodes is logged and replaced by an
    /// empty list on the next write.
    ///
    /// # Errors
    /// - Returns `Persist` when the store cannot be read.
    pub fn open(store: S) -> PipelineResult<Self> {
        let tasks = match store.get(TODOS_KEY)? {
            None => Vec::new(),
            Some(text) => codec::deserialize(&text).unwrap_or_else(|err| {
                warn!("event=load module=pipeline status=discarded error={err}");
                Vec::new()
            }),
        };
        info!("event=load module=pipeline status=ok count={}", tasks.len());

        let records = RecordStore::from_tasks(tasks);
        let view = render(records.snapshot());
        Ok(Self {
            store,
            records,
            drag: DragController::new(),
            view,
        })
    }

    /// Current ordered tasks.
    pub fn tasks(&self) -> &[Task] {
        self.records.snapshot()
    }

    /// Current rendered view, including drag decorations.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn persistence(&self) -> &S {
        &self.store
    }

    /// Appends one task.
    pub fn add(&mut self, task: Task) -> PipelineResult<()> {
        task.validate()?;
        self.mutate("task_add", |records| {
            records.add(task);
            true
        })?;
        Ok(())
    }

    /// Collects form fields into a task and appends it.
    pub fn add_from_form(&mut self, form: TaskForm) -> PipelineResult<()> {
        let task = form.into_task()?;
        self.add(task)
    }

    /// Removes the task at `index`. Returns `false` for stale positions.
    pub fn delete(&mut self, index: usize) -> PipelineResult<bool> {
        self.mutate("task_delete", |records| records.remove_at(index).is_some())
    }

    /// Runs the action of a rendered entry control.
    pub fn apply(&mut self, action: EntryAction) -> PipelineResult<bool> {
        match action {
            EntryAction::Delete { index } => self.delete(index),
        }
    }

    /// Replaces the sequence with `order`, a list of current positions.
    ///
    /// Returns `false` without touching anything when `order` is not a
    /// permutation of the current positions.
    pub fn commit_order(&mut self, order: &[usize]) -> PipelineResult<bool> {
        let reordered = match self.records.reordered(order) {
            Ok(tasks) => tasks,
            Err(err) => {
                debug!("event=task_reorder module=pipeline status=ignored reason={err}");
                return Ok(false);
            }
        };
        self.mutate("task_reorder", |records| {
            records.replace_all(reordered);
            true
        })
    }

    /// Replaces the whole sequence with decoded `text`.
    ///
    /// # Errors
    /// - `Codec(MalformedInput)` or `Codec(ShapeMismatch)` with no state
    ///   change when `text` does not decode.
    pub fn import_text(&mut self, text: &str) -> PipelineResult<usize> {
        let tasks = codec::deserialize(text).inspect_err(|err| {
            warn!("event=task_import module=pipeline status=rejected error={err}");
        })?;
        let count = tasks.len();
        self.mutate("task_import", |records| {
            records.replace_all(tasks);
            true
        })?;
        Ok(count)
    }

    /// Reads a user-selected file and imports its contents.
    pub fn import_file(
        &mut self,
        transfer: &impl FileTransfer,
        source: &Path,
    ) -> PipelineResult<usize> {
        let text = transfer.read_text(source)?;
        self.import_text(&text)
    }

    /// Builds the `todos.json` export blob.
    pub fn export_file(&self) -> PipelineResult<ExportFile> {
        let contents = codec::serialize_pretty(self.records.snapshot())?;
        Ok(ExportFile::json(contents))
    }

    /// Hands the export blob to `transfer`.
    pub fn export(&self, transfer: &impl FileTransfer) -> PipelineResult<PathBuf> {
        let file = self.export_file()?;
        let path = transfer.offer_download(&file)?;
        info!(
            "event=task_export module=pipeline status=ok count={}",
            self.records.len()
        );
        Ok(path)
    }

    /// Starts dragging the entry tagged `index`.
    pub fn drag_start(&mut self, index: usize) -> bool {
        let started =
            self.drag
                .drag_start(index, self.view.entries.len(), self.records.revision());
        self.view.decorate(self.drag.state());
        started
    }

    /// Updates the drop indicator for a pointer at `pointer_y`.
    pub fn drag_over(&mut self, pointer_y: f64, layout: &[EntryBox]) -> Option<DropSlot> {
        let slot = self.drag.drag_over(pointer_y, layout);
        self.view.decorate(self.drag.state());
        slot
    }

    /// Pointer left the list container.
    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
        self.view.decorate(self.drag.state());
    }

    /// Drops the dragged entry at the indicator. Returns `true` when the new
    /// order was committed.
    pub fn drop_entry(&mut self) -> PipelineResult<bool> {
        let order = self
            .drag
            .drop_entry(&self.view.tags(), self.records.revision());
        self.view.decorate(self.drag.state());
        match order {
            Some(order) => self.commit_order(&order),
            None => Ok(false),
        }
    }

    /// Gesture ended without a drop.
    pub fn drag_end(&mut self) {
        self.drag.drag_end();
        self.view.decorate(self.drag.state());
    }

    /// Mutates, persists, then re-renders. `apply` returns `false` for a
    /// no-op, in which case nothing is written.
    fn mutate(
        &mut self,
        event: &'static str,
        apply: impl FnOnce(&mut RecordStore) -> bool,
    ) -> PipelineResult<bool> {
        let previous = self.records.clone();
        if !apply(&mut self.records) {
            debug!("event={event} module=pipeline status=noop");
            return Ok(false);
        }

        if let Err(err) = self.persist() {
            error!("event={event} module=pipeline status=error error={err}");
            self.records = previous;
            return Err(err);
        }

        self.drag.drag_end();
        self.view = render(self.records.snapshot());
        info!(
            "event={event} module=pipeline status=ok count={}",
            self.records.len()
        );
        Ok(true)
    }

    fn persist(&mut self) -> PipelineResult<()> {
        let text = codec::serialize(self.records.snapshot())?;
        self.store.set(TODOS_KEY, &text)?;
        Ok(())
    }
}

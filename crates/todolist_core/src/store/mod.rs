//! In-memory record store.
//!
//! # Responsibility
//! - Own the authoritative ordered sequence of tasks.
//! - Express reordering as "compute a new full order, then replace all".
//!
//! # Invariants
//! - Out-of-range removal is a no-op, never a panic.
//! - `revision` strictly increases on every structural mutation.
//! - A reorder only applies when the order is a permutation of `0..len`.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors for positional operations against the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Position does not exist in the current sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// Reorder references one position more than once.
    DuplicateIndex(usize),
    /// Reorder does not cover every current position.
    LengthMismatch { expected: usize, actual: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} task(s)")
            }
            Self::DuplicateIndex(index) => write!(f, "index {index} appears more than once"),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "order must list {expected} position(s), got {actual}"
            ),
        }
    }
}

impl Error for StoreError {}

/// Authoritative ordered task sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    tasks: Vec<Task>,
    revision: u64,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks` in the given order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, revision: 0 }
    }

    /// Appends one task to the end.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
        self.bump();
    }

    /// Removes the task at `index`; returns `None` when the position is stale.
    pub fn remove_at(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            return None;
        }
        let removed = self.tasks.remove(index);
        self.bump();
        Some(removed)
    }

    /// Swaps the whole sequence at once.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.bump();
    }

    /// Current ordered sequence.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Structural mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Builds the sequence described by `order`, where `order[n]` is the
    /// current position of the task that should land at position `n`.
    ///
    /// # Errors
    /// - `LengthMismatch` when `order` does not list every task.
    /// - `IndexOutOfRange` or `DuplicateIndex` when it is not a permutation.
    pub fn reordered(&self, order: &[usize]) -> StoreResult<Vec<Task>> {
        let len = self.tasks.len();
        if order.len() != len {
            return Err(StoreError::LengthMismatch {
                expected: len,
                actual: order.len(),
            });
        }

        let mut seen = vec![false; len];
        for &index in order {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
            if seen[index] {
                return Err(StoreError::DuplicateIndex(index));
            }
            seen[index] = true;
        }

        Ok(order.iter().map(|&index| self.tasks[index].clone()).collect())
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, StoreError};
    use crate::model::task::Task;

    fn abc() -> RecordStore {
        RecordStore::from_tasks(vec![Task::new("A"), Task::new("B"), Task::new("C")])
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut store = RecordStore::new();
        store.add(Task::new("A"));
        store.add(Task::new("B"));
        assert_eq!(titles(store.snapshot()), vec!["A", "B"]);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn remove_at_middle() {
        let mut store = abc();
        let removed = store.remove_at(1).expect("index 1 exists");
        assert_eq!(removed.title, "B");
        assert_eq!(titles(store.snapshot()), vec!["A", "C"]);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let mut store = abc();
        let before = store.revision();
        assert!(store.remove_at(3).is_none());
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn reordered_maps_positions() {
        let store = abc();
        let tasks = store.reordered(&[2, 0, 1]).unwrap();
        assert_eq!(titles(&tasks), vec!["C", "A", "B"]);
    }

    #[test]
    fn reordered_rejects_non_permutations() {
        let store = abc();
        assert_eq!(
            store.reordered(&[0, 1]).unwrap_err(),
            StoreError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            store.reordered(&[0, 1, 5]).unwrap_err(),
            StoreError::IndexOutOfRange { index: 5, len: 3 }
        );
        assert_eq!(
            store.reordered(&[0, 0, 1]).unwrap_err(),
            StoreError::DuplicateIndex(0)
        );
    }
}

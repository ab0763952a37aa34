//! Task domain model.
//!
//! # Responsibility
//! - Define the record owned by the record store and written to storage.
//! - Keep the wire shape compatible with exported `todos.json` files.
//!
//! # Invariants
//! - A task has no identity field; its identity is its position.
//! - Absent optional fields are omitted on write, never written as
//!   placeholder text.
//! - `title` must not be blank for tasks created through the add path.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Headline shown on every rendered entry.
    pub title: String,
    /// Free-form body; `None` and blank values render no row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date kept as free text, usually `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Task {
    /// Creates a task with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Checks the add-path invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Description text when it carries visible content.
    pub fn visible_description(&self) -> Option<&str> {
        visible(self.description.as_deref())
    }

    /// Due date text when it carries visible content.
    pub fn visible_date(&self) -> Option<&str> {
        visible(self.date.as_deref())
    }
}

fn visible(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};

    #[test]
    fn validate_rejects_whitespace_title() {
        let err = Task::new("   ").validate().unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }

    #[test]
    fn blank_optionals_are_not_visible() {
        let task = Task::new("a").with_description("  ").with_date("");
        assert_eq!(task.visible_description(), None);
        assert_eq!(task.visible_date(), None);
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let json = serde_json::to_value(Task::new("only title")).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "only title" }));
    }
}

//! Raw entry-form input collection.
//!
//! # Responsibility
//! - Turn raw field values from an entry form into a `Task`.
//!
//! # Invariants
//! - All fields are trimmed.
//! - Blank optional fields become `None`.
//! - A blank title is rejected before anything reaches the record store.

use crate::model::task::{Task, TaskValidationError};

/// Raw values of the add-task form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub date: String,
}

impl TaskForm {
    /// Creates a form snapshot from the three field values.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
        }
    }

    /// Converts the collected fields into a validated task.
    pub fn into_task(self) -> Result<Task, TaskValidationError> {
        let task = Task {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            date: non_blank(self.date),
        };
        task.validate()?;
        Ok(task)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::TaskForm;
    use crate::model::task::TaskValidationError;

    #[test]
    fn blank_optional_fields_become_absent() {
        let task = TaskForm::new(" Buy milk ", "   ", "")
            .into_task()
            .expect("title is present");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert_eq!(task.date, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = TaskForm::new("", "desc", "2024-05-01")
            .into_task()
            .unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }
}

//! JSON serializer for the task sequence.
//!
//! # Responsibility
//! - Encode the ordered sequence for the persistence store and for export.
//! - Decode persisted or imported text with shape checking.
//!
//! # Invariants
//! - Order and optional-field absence survive a round trip.
//! - Decoding is all-or-nothing: one bad element rejects the whole input.

use crate::model::task::Task;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by serializer operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Serializer failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Text is not syntactically valid JSON.
    MalformedInput(String),
    /// Parsed value is not an ordered sequence of task objects.
    ShapeMismatch(String),
    /// Encoding failed; not expected for well-formed tasks.
    Encode(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput(details) => write!(f, "malformed input: {details}"),
            Self::ShapeMismatch(details) => write!(f, "shape mismatch: {details}"),
            Self::Encode(details) => write!(f, "failed to encode tasks: {details}"),
        }
    }
}

impl Error for CodecError {}

/// Encodes tasks as compact JSON for the persistence store.
pub fn serialize(tasks: &[Task]) -> CodecResult<String> {
    serde_json::to_string(tasks).map_err(|err| CodecError::Encode(err.to_string()))
}

/// Encodes tasks as two-space indented JSON for file export.
pub fn serialize_pretty(tasks: &[Task]) -> CodecResult<String> {
    serde_json::to_string_pretty(tasks).map_err(|err| CodecError::Encode(err.to_string()))
}

/// Decodes text into an ordered task sequence.
///
/// # Errors
/// - `MalformedInput` when `text` is not valid JSON.
/// - `ShapeMismatch` when the top-level value is not an array, or when any
///   element is not a task object.
pub fn deserialize(text: &str) -> CodecResult<Vec<Task>> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| CodecError::MalformedInput(err.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CodecError::ShapeMismatch(format!(
                "expected an array of tasks, found {}",
                value_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            serde_json::from_value::<Task>(item).map_err(|err| {
                CodecError::ShapeMismatch(format!("element {position}: {err}"))
            })
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::{deserialize, serialize_pretty, value_kind, CodecError};
    use crate::model::task::Task;
    use serde_json::json;

    #[test]
    fn value_kind_names_object() {
        assert_eq!(value_kind(&json!({ "title": "x" })), "an object");
    }

    #[test]
    fn null_optionals_decode_as_absent() {
        let tasks = deserialize(r#"[{"title":"a","description":null}]"#).unwrap();
        assert_eq!(tasks, vec![Task::new("a")]);
    }

    #[test]
    fn element_without_title_is_shape_mismatch() {
        let err = deserialize(r#"[{"title":"ok"},{"description":"no title"}]"#).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch(ref details) if details.contains("element 1")));
    }

    #[test]
    fn pretty_output_is_indented() {
        let text = serialize_pretty(&[Task::new("a")]).unwrap();
        assert!(text.contains("\n  {"));
    }
}

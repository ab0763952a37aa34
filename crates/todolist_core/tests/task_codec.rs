use todolist_core::{deserialize, serialize, serialize_pretty, CodecError, Task};

fn sample() -> Vec<Task> {
    vec![
        Task::new("Write report")
            .with_description("Quarterly numbers")
            .with_date("2024-05-01"),
        Task::new("Call plumber"),
        Task::new("Pay rent").with_date("2024-06-01"),
    ]
}

#[test]
fn roundtrip_preserves_order_and_absent_fields() {
    let tasks = sample();
    let text = serialize(&tasks).unwrap();
    let decoded = deserialize(&text).unwrap();
    assert_eq!(decoded, tasks);
    assert_eq!(decoded[1].description, None);
    assert_eq!(decoded[1].date, None);
}

#[test]
fn roundtrip_keeps_empty_strings_as_given() {
    let tasks = vec![Task::new("from old export").with_description("").with_date("")];
    let decoded = deserialize(&serialize(&tasks).unwrap()).unwrap();
    assert_eq!(decoded, tasks);
}

#[test]
fn missing_fields_are_not_written_as_placeholders() {
    let text = serialize(&[Task::new("bare")]).unwrap();
    assert_eq!(text, r#"[{"title":"bare"}]"#);
    assert!(!text.contains("undefined"));
    assert!(!text.contains("null"));
}

#[test]
fn pretty_export_decodes_to_same_sequence() {
    let tasks = sample();
    let pretty = serialize_pretty(&tasks).unwrap();
    assert!(pretty.starts_with("[\n  {"));
    assert_eq!(deserialize(&pretty).unwrap(), tasks);
}

#[test]
fn empty_array_decodes_to_empty_sequence() {
    assert!(deserialize("[]").unwrap().is_empty());
}

#[test]
fn single_object_is_shape_mismatch() {
    let err = deserialize(r#"{"title":"x"}"#).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)), "unexpected: {err}");
}

#[test]
fn scalars_are_shape_mismatch() {
    for text in ["42", "\"text\"", "true", "null"] {
        let err = deserialize(text).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch(_)), "{text}: {err}");
    }
}

#[test]
fn non_json_is_malformed_input() {
    let err = deserialize("not json").unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput(_)), "unexpected: {err}");
}

#[test]
fn wrongly_typed_field_rejects_whole_input() {
    let err = deserialize(r#"[{"title":"ok"},{"title":"bad","date":20240501}]"#).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch(_)));
}

#[test]
fn unknown_keys_are_ignored() {
    let tasks = deserialize(r#"[{"title":"a","done":true}]"#).unwrap();
    assert_eq!(tasks, vec![Task::new("a")]);
}

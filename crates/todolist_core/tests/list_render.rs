use todolist_core::{render, DropSlot, DragState, EntryAction, Task, VisualRow, DUE_PREFIX};

#[test]
fn render_is_idempotent() {
    let tasks = vec![
        Task::new("A").with_description("first"),
        Task::new("B").with_date("2024-02-02"),
    ];
    assert_eq!(render(&tasks), render(&tasks));
}

#[test]
fn entries_follow_store_order_with_index_tags() {
    let view = render(&[Task::new("A"), Task::new("B")]);
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].title, "A");
    assert_eq!(view.entries[1].title, "B");
    assert_eq!(view.tags(), vec![0, 1]);
    assert!(view.entries.iter().all(|entry| entry.draggable));
    assert!(view.indicator.is_none());
}

#[test]
fn task_without_optionals_has_no_extra_rows() {
    let view = render(&[Task::new("bare")]);
    let entry = &view.entries[0];
    assert_eq!(entry.description, None);
    assert_eq!(entry.due, None);
    assert_eq!(entry.optional_rows(), 0);
}

#[test]
fn blank_optionals_render_no_rows() {
    let view = render(&[Task::new("blank").with_description("").with_date("  ")]);
    assert_eq!(view.entries[0].optional_rows(), 0);
}

#[test]
fn due_row_uses_prefix() {
    let view = render(&[Task::new("rent").with_date("2024-06-01")]);
    assert_eq!(
        view.entries[0].due.as_deref(),
        Some(format!("{DUE_PREFIX}2024-06-01").as_str())
    );
}

#[test]
fn delete_control_targets_render_index() {
    let view = render(&[Task::new("A"), Task::new("B"), Task::new("C")]);
    assert_eq!(
        view.entries[2].delete_action(),
        EntryAction::Delete { index: 2 }
    );
}

#[test]
fn decorate_marks_source_and_indicator() {
    let mut view = render(&[Task::new("A"), Task::new("B")]);
    view.decorate(&DragState::Dragging {
        source: 1,
        indicator: Some(DropSlot::End),
        revision: 0,
    });
    assert_eq!(view.dragging_entry().map(|entry| entry.index), Some(1));
    assert_eq!(view.rows().last(), Some(&VisualRow::DropIndicator));

    view.decorate(&DragState::Idle);
    assert!(view.dragging_entry().is_none());
    assert!(view.rows().iter().all(|row| matches!(row, VisualRow::Entry(_))));
}

//! List view projection.
//!
//! # Responsibility
//! - Project the record store into a disposable `ListView` for UI shells.
//! - Carry drag decorations (source marker, drop indicator) on top of it.
//!
//! # Invariants
//! - `render` always rebuilds every entry; nothing is reused between calls.
//! - Rendering the same sequence twice yields equal views.
//! - Blank optional fields never produce a row.
//! - Each entry's `index` is its position at render time.

use crate::drag::DragState;
use crate::model::task::Task;

/// Prefix of the due-date row.
pub const DUE_PREFIX: &str = "Due: ";

/// Action exposed by one rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Remove the entry at its render-time position.
    Delete { index: usize },
}

/// Where the drop indicator sits in the visual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSlot {
    /// Immediately before the entry tagged with this index.
    Before(usize),
    /// After the last entry.
    End,
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Position of the originating task at render time.
    pub index: usize,
    pub title: String,
    pub description: Option<String>,
    /// Ready-to-display due row, e.g. `Due: 2024-05-01`.
    pub due: Option<String>,
    pub draggable: bool,
    /// Set while this entry is the source of an active drag gesture.
    pub dragging: bool,
}

impl EntryView {
    /// Delete control bound to this entry.
    pub fn delete_action(&self) -> EntryAction {
        EntryAction::Delete { index: self.index }
    }

    /// Number of optional rows below the header.
    pub fn optional_rows(&self) -> usize {
        usize::from(self.description.is_some()) + usize::from(self.due.is_some())
    }
}

/// Item of the linear visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualRow<'a> {
    Entry(&'a EntryView),
    DropIndicator,
}

/// Vertical box of one entry, measured top-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryBox {
    /// Tag of the entry this box belongs to.
    pub index: usize,
    pub top: f64,
    pub height: f64,
}

impl EntryBox {
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Fixed sizes used to lay out entries without a native layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub header_height: f64,
    pub row_height: f64,
    pub gap: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            header_height: 32.0,
            row_height: 20.0,
            gap: 8.0,
        }
    }
}

/// Rendered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub entries: Vec<EntryView>,
    pub indicator: Option<DropSlot>,
}

impl ListView {
    /// Entry tags in visual order.
    pub fn tags(&self) -> Vec<usize> {
        self.entries.iter().map(|entry| entry.index).collect()
    }

    /// Entry currently marked as drag source.
    pub fn dragging_entry(&self) -> Option<&EntryView> {
        self.entries.iter().find(|entry| entry.dragging)
    }

    /// Entries interleaved with the drop indicator, top to bottom.
    pub fn rows(&self) -> Vec<VisualRow<'_>> {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        for entry in &self.entries {
            if self.indicator == Some(DropSlot::Before(entry.index)) {
                rows.push(VisualRow::DropIndicator);
            }
            rows.push(VisualRow::Entry(entry));
        }
        if self.indicator == Some(DropSlot::End) {
            rows.push(VisualRow::DropIndicator);
        }
        rows
    }

    /// Stacks entries top-down using `metrics`; the indicator takes no space.
    pub fn layout(&self, metrics: &LayoutMetrics) -> Vec<EntryBox> {
        let mut top = 0.0;
        self.entries
            .iter()
            .map(|entry| {
                let height =
                    metrics.header_height + metrics.row_height * entry.optional_rows() as f64;
                let entry_box = EntryBox {
                    index: entry.index,
                    top,
                    height,
                };
                top += height + metrics.gap;
                entry_box
            })
            .collect()
    }

    /// Applies the drag markers of `state` without rebuilding entries.
    pub fn decorate(&mut self, state: &DragState) {
        let (source, indicator) = match state {
            DragState::Idle => (None, None),
            DragState::Dragging {
                source, indicator, ..
            } => (Some(*source), *indicator),
        };
        for entry in &mut self.entries {
            entry.dragging = Some(entry.index) == source;
        }
        self.indicator = indicator;
    }
}

/// Rebuilds the whole view from `tasks`.
pub fn render(tasks: &[Task]) -> ListView {
    let entries = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| EntryView {
            index,
            title: task.title.clone(),
            description: task.visible_description().map(str::to_string),
            due: task.visible_date().map(|date| format!("{DUE_PREFIX}{date}")),
            draggable: true,
            dragging: false,
        })
        .collect();

    ListView {
        entries,
        indicator: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{render, DropSlot, LayoutMetrics, VisualRow};
    use crate::model::task::Task;

    #[test]
    fn rows_place_indicator_before_target() {
        let mut view = render(&[Task::new("A"), Task::new("B")]);
        view.indicator = Some(DropSlot::Before(1));
        let rows = view.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], VisualRow::DropIndicator);
    }

    #[test]
    fn layout_grows_with_optional_rows() {
        let view = render(&[
            Task::new("A").with_description("d").with_date("2024-01-01"),
            Task::new("B"),
        ]);
        let boxes = view.layout(&LayoutMetrics::default());
        assert_eq!(boxes[0].top, 0.0);
        assert_eq!(boxes[0].height, 72.0);
        assert_eq!(boxes[1].top, 80.0);
        assert_eq!(boxes[1].height, 32.0);
    }
}

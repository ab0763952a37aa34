//! Drag-and-drop reorder controller.
//!
//! # Responsibility
//! - Track one pointer-drag gesture over the rendered list.
//! - Compute the drop slot on every drag-over.
//! - Produce the visual order at drop time for the mutation pipeline.
//!
//! # Invariants
//! - The drag source never qualifies as a drop candidate.
//! - Out-of-order events (drop without start, over while idle) are no-ops.
//! - A gesture started at one store revision never commits at another.

use crate::render::{DropSlot, EntryBox};
use log::debug;

/// Gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Render-time tag of the dragged entry.
        source: usize,
        /// Current drop slot; `None` while the pointer is outside the list.
        indicator: Option<DropSlot>,
        /// Store revision captured at drag start.
        revision: u64,
    },
}

/// State machine for one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Idle -> Dragging. Returns `false` when `index` is not a rendered entry.
    ///
    /// A new start while already dragging replaces the previous gesture.
    pub fn drag_start(&mut self, index: usize, len: usize, revision: u64) -> bool {
        if index >= len {
            debug!("event=drag_start module=drag status=ignored reason=unknown_entry");
            return false;
        }
        self.state = DragState::Dragging {
            source: index,
            indicator: None,
            revision,
        };
        true
    }

    /// Moves the indicator for a pointer at `pointer_y` over `layout`.
    ///
    /// Returns the new slot, or `None` when no gesture is active.
    pub fn drag_over(&mut self, pointer_y: f64, layout: &[EntryBox]) -> Option<DropSlot> {
        let DragState::Dragging {
            source, indicator, ..
        } = &mut self.state
        else {
            return None;
        };

        let slot = match find_drop_candidate(pointer_y, layout, *source) {
            Some(tag) => DropSlot::Before(tag),
            None => DropSlot::End,
        };
        *indicator = Some(slot);
        Some(slot)
    }

    /// Pointer left the list: hide the indicator, keep the gesture.
    pub fn drag_leave(&mut self) {
        if let DragState::Dragging { indicator, .. } = &mut self.state {
            *indicator = None;
        }
    }

    /// Dragging -> Idle via drop.
    ///
    /// `rendered` lists entry tags in their current visual order. Returns the
    /// visual order with the source moved into the indicator slot, or `None`
    /// when there is nothing to commit (idle, hidden indicator, stale
    /// revision, or a slot that no longer matches the rendered entries).
    pub fn drop_entry(&mut self, rendered: &[usize], revision: u64) -> Option<Vec<usize>> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging {
            source,
            indicator,
            revision: started_at,
        } = state
        else {
            debug!("event=drop module=drag status=ignored reason=no_gesture");
            return None;
        };

        if started_at != revision {
            debug!(
                "event=drop module=drag status=ignored reason=stale_revision started_at={} current={}",
                started_at, revision
            );
            return None;
        }

        let Some(slot) = indicator else {
            debug!("event=drop module=drag status=ignored reason=no_indicator");
            return None;
        };

        let order = visual_order(rendered, source, slot);
        if order.is_none() {
            debug!("event=drop module=drag status=ignored reason=slot_mismatch");
        }
        order
    }

    /// Dragging -> Idle without drop.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Picks the entry the pointer has least overshot from above.
///
/// Among boxes other than `exclude`, chooses the one whose midpoint lies
/// below the pointer by the smallest distance. Ties keep the first box in
/// scan order. `None` means the pointer is below every midpoint.
pub fn find_drop_candidate(pointer_y: f64, layout: &[EntryBox], exclude: usize) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for entry_box in layout.iter().filter(|entry_box| entry_box.index != exclude) {
        let offset = pointer_y - entry_box.midpoint();
        if offset >= 0.0 {
            continue;
        }
        match best {
            Some((best_offset, _)) if offset <= best_offset => {}
            _ => best = Some((offset, entry_box.index)),
        }
    }
    best.map(|(_, index)| index)
}

/// Applies a drop: removes `source` from `rendered` and re-inserts it at
/// `slot`. Returns `None` if either tag is missing from `rendered`.
pub fn visual_order(rendered: &[usize], source: usize, slot: DropSlot) -> Option<Vec<usize>> {
    if !rendered.contains(&source) {
        return None;
    }
    let mut order: Vec<usize> = rendered.iter().copied().filter(|&tag| tag != source).collect();
    match slot {
        DropSlot::End => order.push(source),
        DropSlot::Before(target) => {
            let position = order.iter().position(|&tag| tag == target)?;
            order.insert(position, source);
        }
    }
    Some(order)
}

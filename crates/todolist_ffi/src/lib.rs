//! Flutter-facing bindings for the TodoList core.

pub mod api;

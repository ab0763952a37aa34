//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record and the form input that produces it.
//!
//! # Invariants
//! - Order, not identity, distinguishes tasks.

pub mod form;
pub mod task;

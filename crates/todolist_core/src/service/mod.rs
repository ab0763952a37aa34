//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, serializer, renderer and drag controller into
//!   use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod todo_service;

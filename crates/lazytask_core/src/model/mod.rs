//! Domain model for the task variants tracked by LazyTask.
//!
//! # Responsibility
//! - Define the canonical task record shared by every command path.
//! - Keep render and completion semantics in one place.
//!
//! # Invariants
//! - A task's user-facing identity is its position in the list, never an id.
//! - Completion is a one-way transition; there is no un-complete operation.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod task;

//! Core domain logic for LazyTask.
//! This crate is the single source of truth for business invariants.

pub mod command;
pub mod interpreter;
pub mod list;
pub mod logging;
pub mod model;
pub mod responses;
pub mod store;

pub use command::{parse_command, Command, CommandError, Marker, MissingPart};
pub use interpreter::{Interpreter, InterpreterError, Reply};
pub use list::{Mutated, TaskList, TaskListError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskKind, TaskValidationError};
pub use store::{FileTaskStore, StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

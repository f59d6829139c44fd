//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by todo/deadline/event variants.
//! - Produce the canonical render used by every response message.
//!
//! # Invariants
//! - `description` only changes through [`Task::rename`]; no command exposes
//!   that operation, it exists for outer layers and import paths.
//! - `done` transitions false -> true exactly once; marking a finished task
//!   again is a no-op.
//! - `schedule` is `Some` exactly when `kind` is deadline or event.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unified category for all task variants.
///
/// The variant decides which fields are required and how the task renders,
/// but every variant keeps one canonical record shape in core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain actionable item with no time attached.
    Todo,
    /// Item that must be finished by some free-form point in time.
    Deadline,
    /// Item that happens at some free-form point in time.
    Event,
}

impl TaskKind {
    /// Returns the command-word form (`todo`/`deadline`/`event`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Deadline => "deadline",
            Self::Event => "event",
        }
    }

    /// Returns the one-letter tag used by the canonical render and the
    /// persisted record format.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }
}

/// Validation error for task records.
///
/// Construction paths driven by the command interpreter never hit these
/// because fields are validated before a task is built; the storage read
/// path uses them to reject invalid persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty or whitespace-only.
    EmptyDescription,
    /// A deadline/event record carries no schedule text.
    MissingSchedule { kind: TaskKind },
    /// A todo record carries schedule text it cannot render.
    UnexpectedSchedule,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
            Self::MissingSchedule { kind } => {
                write!(f, "a {} task is missing its schedule text", kind.as_str())
            }
            Self::UnexpectedSchedule => write!(f, "a todo task cannot carry schedule text"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical record for one tracked task.
///
/// Fields are private so the false -> true completion invariant and the
/// rename-only description mutation cannot be bypassed by outer layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    kind: TaskKind,
    description: String,
    done: bool,
    /// The free-form `by`/`at` text. Meaningful only for deadline/event.
    schedule: Option<String>,
}

impl Task {
    /// Creates a not-yet-done todo.
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Todo,
            description: description.into(),
            done: false,
            schedule: None,
        }
    }

    /// Creates a not-yet-done deadline with its free-form `by` text.
    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Deadline,
            description: description.into(),
            done: false,
            schedule: Some(by.into()),
        }
    }

    /// Creates a not-yet-done event with its free-form `at` text.
    pub fn event(description: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            kind: TaskKind::Event,
            description: description.into(),
            done: false,
            schedule: Some(at.into()),
        }
    }

    /// Restores a task from already-persisted state.
    ///
    /// Used by storage and import paths where the done flag already exists.
    /// This constructor does not validate; callers on untrusted input must
    /// follow up with [`Task::validate`].
    pub fn from_parts(
        kind: TaskKind,
        done: bool,
        description: impl Into<String>,
        schedule: Option<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            done,
            schedule,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the `by`/`at` text for deadline/event tasks.
    pub fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }

    /// Marks this task as done.
    ///
    /// One-way transition: calling it on an already-done task changes
    /// nothing and is not an error.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Replaces the description.
    ///
    /// No command in the interpreter grammar reaches this; it exists for
    /// outer layers. Callers keep the non-empty invariant.
    pub fn rename(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Returns the derived status symbol: `✓` when done, `x` otherwise.
    pub fn status_symbol(&self) -> &'static str {
        if self.done {
            "✓"
        } else {
            "x"
        }
    }

    /// Renders the canonical single-line form, e.g. `[T][x] read book` or
    /// `[D][✓] submit report (by: Friday)`.
    pub fn render(&self) -> String {
        match self.kind {
            TaskKind::Todo => {
                format!("[{}][{}] {}", self.kind.tag(), self.status_symbol(), self.description)
            }
            TaskKind::Deadline => format!(
                "[{}][{}] {} (by: {})",
                self.kind.tag(),
                self.status_symbol(),
                self.description,
                self.schedule.as_deref().unwrap_or_default()
            ),
            TaskKind::Event => format!(
                "[{}][{}] {} (at: {})",
                self.kind.tag(),
                self.status_symbol(),
                self.description,
                self.schedule.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    /// - [`TaskValidationError::EmptyDescription`] when the description is
    ///   blank.
    /// - [`TaskValidationError::MissingSchedule`] when a deadline/event has
    ///   no usable schedule text.
    /// - [`TaskValidationError::UnexpectedSchedule`] when a todo carries
    ///   schedule text.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }

        match (self.kind, self.schedule.as_deref()) {
            (TaskKind::Todo, None) => Ok(()),
            (TaskKind::Todo, Some(_)) => Err(TaskValidationError::UnexpectedSchedule),
            (kind, None) => Err(TaskValidationError::MissingSchedule { kind }),
            (kind, Some(text)) if text.trim().is_empty() => {
                Err(TaskValidationError::MissingSchedule { kind })
            }
            (_, Some(_)) => Ok(()),
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

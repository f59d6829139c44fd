//! Command interpreter: the session's parse-validate-dispatch boundary.
//!
//! # Responsibility
//! - Own the one long-lived task list of a session.
//! - Turn every input line into exactly one response string.
//!
//! # Invariants
//! - No failure escapes `execute`; command and list errors become their
//!   user-facing sentence, sync failures become appended warnings.
//! - Executing a command has no effect on the list unless the command
//!   validates; a rejected command leaves the list byte-identical.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::command::{parse_command, Command, CommandError};
use crate::list::{TaskList, TaskListError};
use crate::model::task::Task;
use crate::responses;
use crate::store::{StoreError, TaskStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one dispatched command.
///
/// Wraps the layer-specific errors so the dispatch boundary has a single
/// type to render. The `Display` text is the reply sentence.
#[derive(Debug)]
pub enum InterpreterError {
    Command(CommandError),
    List(TaskListError),
}

impl InterpreterError {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Command(err) => err.code(),
            Self::List(err) => err.code(),
        }
    }
}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(err) => write!(f, "{err}"),
            Self::List(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InterpreterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Command(err) => Some(err),
            Self::List(err) => Some(err),
        }
    }
}

impl From<CommandError> for InterpreterError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

impl From<TaskListError> for InterpreterError {
    fn from(value: TaskListError) -> Self {
        Self::List(value)
    }
}

/// One response handed back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text the shell renders verbatim.
    pub text: String,
    /// Set by `bye`; tells the shell the session is over.
    pub is_farewell: bool,
}

impl Reply {
    fn text(text: String) -> Self {
        Self {
            text,
            is_farewell: false,
        }
    }
}

/// Session interpreter owning the authoritative task list.
pub struct Interpreter<S: TaskStore> {
    list: TaskList<S>,
}

impl<S: TaskStore> Interpreter<S> {
    /// Builds a session over an already-constructed list.
    pub fn new(list: TaskList<S>) -> Self {
        Self { list }
    }

    /// Loads the persisted tasks into a fresh session.
    ///
    /// A load failure starts the session over an empty list; the error is
    /// returned so the shell can surface the warning.
    pub fn load(store: S) -> (Self, Option<StoreError>) {
        let (list, load_error) = TaskList::load(store);
        (Self { list }, load_error)
    }

    /// Read access to the session's list.
    pub fn task_list(&self) -> &TaskList<S> {
        &self.list
    }

    /// Executes one input line and always produces a response.
    ///
    /// This is the uniform boundary: parse or list failures come back as
    /// their user-facing sentence, never as an `Err` the shell must handle.
    pub fn execute(&mut self, line: &str) -> Reply {
        match self.dispatch(line) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    "event=command_rejected module=interpreter status=error error_code={}",
                    err.code()
                );
                Reply::text(err.to_string())
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Reply, InterpreterError> {
        let command = parse_command(line)?;
        let name = command.name();

        let reply = match command {
            Command::List => Reply::text(responses::listing(self.list.tasks())),
            Command::Done { index } => {
                let outcome = self.list.mark_as_done(index)?;
                Reply::text(responses::marked_done(&outcome))
            }
            Command::Delete { index } => {
                let outcome = self.list.delete_task(index)?;
                Reply::text(responses::deleted(&outcome))
            }
            Command::Find { keyword } => {
                let found = self.list.find_matching_tasks(&keyword);
                Reply::text(responses::matches(&found))
            }
            Command::AddTodo { description } => self.add(Task::todo(description)),
            Command::AddDeadline { description, by } => self.add(Task::deadline(description, by)),
            Command::AddEvent { description, at } => self.add(Task::event(description, at)),
            Command::Bye => {
                let sync_error = self.list.overwrite().err();
                Reply {
                    text: responses::farewell(sync_error.as_ref()),
                    is_farewell: true,
                }
            }
        };

        info!(
            "event=command_executed module=interpreter status=ok command={} tasks={}",
            name,
            self.list.len()
        );
        Ok(reply)
    }

    fn add(&mut self, task: Task) -> Reply {
        let outcome = self.list.add_task(task);
        Reply::text(responses::added(&outcome))
    }
}

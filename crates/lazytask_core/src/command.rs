//! Command grammar: one input line into one typed command.
//!
//! # Responsibility
//! - Split the command word from its arguments and validate required
//!   fields before any task is constructed.
//! - Report every malformed input as a typed, non-fatal failure.
//!
//! # Invariants
//! - Marker splits and argument access use explicit presence checks
//!   (`split_once`, token iteration), never index panics.
//! - Parsing is stateless; one call inspects one line.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::task::TaskKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Marker token separating a description from its auxiliary time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `/by`, used by `deadline`.
    By,
    /// `/at`, used by `event`.
    At,
}

impl Marker {
    /// The literal token looked up in the input.
    pub fn token(self) -> &'static str {
        match self {
            Self::By => "/by",
            Self::At => "/at",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::By => "deadline",
            Self::At => "event date and time",
        }
    }
}

/// Which half of a marker-split field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPart {
    /// The marker token itself never appears in the input.
    Marker,
    /// The marker appears but nothing usable follows it.
    Value,
}

/// Parse/validation failure for one input line.
///
/// Every variant is fatal to the command, never to the session. The
/// `Display` text is the user-facing sentence the interpreter replies with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// First word does not match any recognized command.
    Unknown { word: String },
    /// `todo`/`deadline`/`event` with a blank description.
    MissingDescription { kind: TaskKind },
    /// `deadline`/`event` missing its marker token or the text after it.
    MissingField { marker: Marker, part: MissingPart },
    /// `done`/`delete` argument is absent or not an integer.
    InvalidIndex { raw: String },
    /// `find` with no keyword.
    MissingKeyword,
}

impl CommandError {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unknown { .. } => "unknown_command",
            Self::MissingDescription { .. } => "missing_description",
            Self::MissingField { .. } => "missing_field",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::MissingKeyword => "missing_keyword",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown { word } if word.is_empty() => {
                write!(f, "I'm sorry, but I don't know what that means.")
            }
            Self::Unknown { word } => {
                write!(f, "I'm sorry, but I don't know what `{word}` means.")
            }
            Self::MissingDescription { kind } => {
                write!(f, "The description of a {} cannot be empty.", kind.as_str())
            }
            Self::MissingField { marker, part } => match part {
                MissingPart::Marker => write!(
                    f,
                    "The {} cannot be found because {} is missing.",
                    marker.noun(),
                    marker.token()
                ),
                MissingPart::Value => {
                    write!(f, "The {} cannot be found after {}.", marker.noun(), marker.token())
                }
            },
            Self::InvalidIndex { raw } if raw.is_empty() => {
                write!(f, "A task number is required.")
            }
            Self::InvalidIndex { raw } => {
                write!(f, "`{raw}` is not a task number.")
            }
            Self::MissingKeyword => {
                write!(f, "The find command needs a keyword to search for.")
            }
        }
    }
}

impl Error for CommandError {}

/// One recognized, validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Done { index: i64 },
    Delete { index: i64 },
    Find { keyword: String },
    AddTodo { description: String },
    AddDeadline { description: String, by: String },
    AddEvent { description: String, at: String },
    Bye,
}

impl Command {
    /// The command word, for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Done { .. } => "done",
            Self::Delete { .. } => "delete",
            Self::Find { .. } => "find",
            Self::AddTodo { .. } => "todo",
            Self::AddDeadline { .. } => "deadline",
            Self::AddEvent { .. } => "event",
            Self::Bye => "bye",
        }
    }
}

/// Parses one raw input line into a command.
///
/// The first whitespace-separated word selects the command; the rest of
/// the line is its argument text. `done`, `delete` and `find` read one
/// token from that text and ignore anything after it; `list` and `bye`
/// ignore argument text entirely.
///
/// # Errors
/// One [`CommandError`] per failure mode; the list stays untouched because
/// nothing is dispatched on a parse failure.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "list" => Ok(Command::List),
        "bye" => Ok(Command::Bye),
        "done" => parse_index(rest).map(|index| Command::Done { index }),
        "delete" => parse_index(rest).map(|index| Command::Delete { index }),
        "find" => match rest.split_whitespace().next() {
            Some(keyword) => Ok(Command::Find {
                keyword: keyword.to_string(),
            }),
            None => Err(CommandError::MissingKeyword),
        },
        "todo" => {
            if rest.is_empty() {
                return Err(CommandError::MissingDescription {
                    kind: TaskKind::Todo,
                });
            }
            Ok(Command::AddTodo {
                description: rest.to_string(),
            })
        }
        "deadline" => {
            let (description, by) = split_scheduled(TaskKind::Deadline, Marker::By, rest)?;
            Ok(Command::AddDeadline { description, by })
        }
        "event" => {
            let (description, at) = split_scheduled(TaskKind::Event, Marker::At, rest)?;
            Ok(Command::AddEvent { description, at })
        }
        other => Err(CommandError::Unknown {
            word: other.to_string(),
        }),
    }
}

/// Splits `<description> <marker> <value>` with explicit presence checks.
fn split_scheduled(
    kind: TaskKind,
    marker: Marker,
    rest: &str,
) -> Result<(String, String), CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingDescription { kind });
    }

    let Some((before, after)) = rest.split_once(marker.token()) else {
        return Err(CommandError::MissingField {
            marker,
            part: MissingPart::Marker,
        });
    };

    let description = before.trim();
    let value = after.trim();
    if description.is_empty() {
        return Err(CommandError::MissingDescription { kind });
    }
    if value.is_empty() {
        return Err(CommandError::MissingField {
            marker,
            part: MissingPart::Value,
        });
    }

    Ok((description.to_string(), value.to_string()))
}

fn parse_index(rest: &str) -> Result<i64, CommandError> {
    let Some(token) = rest.split_whitespace().next() else {
        return Err(CommandError::InvalidIndex { raw: String::new() });
    };
    token
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidIndex {
            raw: token.to_string(),
        })
}

//! Line codec for the persisted task file.
//!
//! # Responsibility
//! - Encode one task into one `tag | done | description [| schedule]` line.
//! - Decode one line back into a validated task.
//!
//! # Invariants
//! - Field order is fixed: variant tag, done flag, description, schedule.
//! - Decoding uses bounded splits, so the final field of a record may
//!   contain the delimiter; earlier fields must not.
//! - Decoded tasks are re-validated; invalid persisted state is rejected
//!   instead of masked.
//!
//! # See also
//! - docs/architecture/storage-format.md

use crate::model::task::{Task, TaskKind, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field separator of the persisted record format.
pub const FIELD_DELIMITER: &str = " | ";

/// Codec error for one persisted record.
#[derive(Debug)]
pub enum RecordError {
    /// Variant tag is not `T`, `D` or `E`.
    UnknownTag(String),
    /// Done flag is not `0` or `1`.
    InvalidDoneFlag(String),
    /// The line has fewer fields than the variant requires.
    Truncated { expected: usize, found: usize },
    /// A non-final field contains the delimiter and would shift on re-read.
    DelimiterInField(&'static str),
    /// A field contains a line break and would split the record.
    NewlineInField(&'static str),
    /// The decoded or encoded task violates model invariants.
    Invalid(TaskValidationError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTag(tag) => write!(f, "unknown variant tag `{tag}`"),
            Self::InvalidDoneFlag(value) => {
                write!(f, "invalid done flag `{value}`; expected 0 or 1")
            }
            Self::Truncated { expected, found } => {
                write!(f, "record has {found} of {expected} expected fields")
            }
            Self::DelimiterInField(field) => {
                write!(f, "the {field} contains the record delimiter `{FIELD_DELIMITER}`")
            }
            Self::NewlineInField(field) => write!(f, "the {field} contains a line break"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RecordError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Encodes one task as one persisted line (without the trailing newline).
///
/// # Errors
/// - [`RecordError::Invalid`] when the task violates model invariants.
/// - [`RecordError::NewlineInField`] when any field contains a line break.
/// - [`RecordError::DelimiterInField`] when a field other than the final
///   one contains the delimiter.
pub fn encode_record(task: &Task) -> Result<String, RecordError> {
    task.validate()?;
    ensure_storable(task)?;

    let tag = task.kind().tag();
    let done = done_flag(task.is_done());
    match task.schedule() {
        None => Ok(format!(
            "{tag}{FIELD_DELIMITER}{done}{FIELD_DELIMITER}{}",
            task.description()
        )),
        Some(schedule) => Ok(format!(
            "{tag}{FIELD_DELIMITER}{done}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{schedule}",
            task.description()
        )),
    }
}

/// Decodes one persisted line back into a task.
///
/// # Errors
/// Returns the first field-level failure, or [`RecordError::Invalid`] when
/// the fields individually parse but the record violates model invariants.
pub fn decode_record(line: &str) -> Result<Task, RecordError> {
    let (tag, rest) = line
        .split_once(FIELD_DELIMITER)
        .ok_or(RecordError::Truncated {
            expected: 3,
            found: 1,
        })?;
    let kind = parse_kind_tag(tag)?;

    let (flag, rest) = rest
        .split_once(FIELD_DELIMITER)
        .ok_or(RecordError::Truncated {
            expected: expected_fields(kind),
            found: 2,
        })?;
    let done = parse_done_flag(flag)?;

    let task = match kind {
        TaskKind::Todo => Task::from_parts(kind, done, rest, None),
        TaskKind::Deadline | TaskKind::Event => {
            let (description, schedule) =
                rest.split_once(FIELD_DELIMITER)
                    .ok_or(RecordError::Truncated {
                        expected: 4,
                        found: 3,
                    })?;
            Task::from_parts(kind, done, description, Some(schedule.to_string()))
        }
    };

    task.validate()?;
    Ok(task)
}

/// Returns the number of fields a record of this variant carries.
pub fn expected_fields(kind: TaskKind) -> usize {
    match kind {
        TaskKind::Todo => 3,
        TaskKind::Deadline | TaskKind::Event => 4,
    }
}

fn ensure_storable(task: &Task) -> Result<(), RecordError> {
    if task.description().contains('\n') || task.description().contains('\r') {
        return Err(RecordError::NewlineInField("description"));
    }
    if let Some(schedule) = task.schedule() {
        if schedule.contains('\n') || schedule.contains('\r') {
            return Err(RecordError::NewlineInField("schedule text"));
        }
        // The description is only the final field for todo records; in a
        // deadline/event record a delimiter inside it would shift the
        // schedule on re-read.
        if task.description().contains(FIELD_DELIMITER) {
            return Err(RecordError::DelimiterInField("description"));
        }
    }
    Ok(())
}

fn done_flag(done: bool) -> &'static str {
    if done {
        "1"
    } else {
        "0"
    }
}

fn parse_done_flag(value: &str) -> Result<bool, RecordError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(RecordError::InvalidDoneFlag(other.to_string())),
    }
}

fn parse_kind_tag(value: &str) -> Result<TaskKind, RecordError> {
    match value {
        "T" => Ok(TaskKind::Todo),
        "D" => Ok(TaskKind::Deadline),
        "E" => Ok(TaskKind::Event),
        other => Err(RecordError::UnknownTag(other.to_string())),
    }
}

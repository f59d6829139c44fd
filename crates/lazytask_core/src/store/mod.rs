//! File-backed persistence for the task list.
//!
//! # Responsibility
//! - Read the persisted task file into memory at session start.
//! - Rewrite the whole file on every sync; never append.
//!
//! # Invariants
//! - The persistence target is explicit constructor configuration, never
//!   process-global state.
//! - A missing file is an empty initial list, not an error.
//! - The store holds no task state of its own; the in-memory list is the
//!   authority between syncs.
//!
//! # See also
//! - docs/architecture/storage-format.md

use crate::model::task::Task;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub mod record;

use record::{decode_record, encode_record, RecordError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for task file reads and writes.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying file-system failure.
    Io(io::Error),
    /// A persisted line cannot be decoded. `line` is 1-based.
    BadRecord { line: usize, source: RecordError },
    /// An in-memory task cannot be written as a record. `position` is the
    /// task's 1-based list position.
    Unstorable { position: usize, source: RecordError },
}

impl StoreError {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "store_io_failed",
            Self::BadRecord { .. } => "store_bad_record",
            Self::Unstorable { .. } => "store_unstorable_task",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::BadRecord { line, source } => {
                write!(f, "task file line {line} is not a valid record: {source}")
            }
            Self::Unstorable { position, source } => {
                write!(f, "task {position} cannot be stored: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::BadRecord { source, .. } => Some(source),
            Self::Unstorable { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage interface between the in-memory list and its persisted form.
///
/// The seam exists so failure behavior stays testable without touching the
/// file system; production code uses [`FileTaskStore`].
pub trait TaskStore {
    /// Loads the full persisted task sequence.
    fn load(&self) -> StoreResult<Vec<Task>>;
    /// Rewrites the full persisted task sequence.
    fn save(&self, tasks: &[Task]) -> StoreResult<()>;
}

/// Task store persisting to one plain-text file, one record per line.
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    /// Creates a store targeting the given file path.
    ///
    /// The file does not have to exist yet; `save` creates the parent
    /// directory on demand.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for FileTaskStore {
    /// Loads every record from the task file.
    ///
    /// # Side effects
    /// - Emits `store_load` logging events with duration and task count.
    ///
    /// # Errors
    /// - [`StoreError::Io`] on read failures other than a missing file.
    /// - [`StoreError::BadRecord`] naming the first undecodable line; blank
    ///   lines are skipped, not rejected.
    fn load(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start");

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok tasks=0 missing_file=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=store_io_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let mut tasks = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_record(line) {
                Ok(task) => tasks.push(task),
                Err(source) => {
                    let failure = StoreError::BadRecord {
                        line: number + 1,
                        source,
                    };
                    error!(
                        "event=store_load module=store status=error duration_ms={} error_code={} error={}",
                        started_at.elapsed().as_millis(),
                        failure.code(),
                        failure
                    );
                    return Err(failure);
                }
            }
        }

        info!(
            "event=store_load module=store status=ok tasks={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    /// Rewrites the task file wholesale.
    ///
    /// # Side effects
    /// - Creates the parent directory when missing.
    /// - Emits `store_save` logging events with duration and task count.
    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=store_save module=store status=start tasks={}", tasks.len());

        let mut contents = String::new();
        for (position, task) in tasks.iter().enumerate() {
            let line = match encode_record(task) {
                Ok(line) => line,
                Err(source) => {
                    let failure = StoreError::Unstorable {
                        position: position + 1,
                        source,
                    };
                    error!(
                        "event=store_save module=store status=error duration_ms={} error_code={} error={}",
                        started_at.elapsed().as_millis(),
                        failure.code(),
                        failure
                    );
                    return Err(failure);
                }
            };
            contents.push_str(&line);
            contents.push('\n');
        }

        if let Err(err) = write_file(&self.path, &contents) {
            error!(
                "event=store_save module=store status=error duration_ms={} error_code=store_io_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StoreError::Io(err));
        }

        info!(
            "event=store_save module=store status=ok tasks={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    // Full rewrite; the record format has no append mode.
    fs::write(path, contents)
}

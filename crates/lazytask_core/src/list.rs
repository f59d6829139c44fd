//! In-memory task list and its persistence synchronization.
//!
//! # Responsibility
//! - Own the ordered task sequence for one session.
//! - Apply add/mark-done/delete/find operations and sync storage after
//!   every mutation.
//!
//! # Invariants
//! - The list is the only component that mutates the sequence or writes
//!   through the store.
//! - User-facing task numbers are 1-based positions; order is insertion
//!   order, changed only by deletion shifting later tasks down by one.
//! - A failed sync never rolls back the in-memory mutation; it is reported
//!   alongside the outcome.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::task::Task;
use crate::store::{StoreError, StoreResult, TaskStore};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// List-level operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// The given task number is outside `1..=size`.
    IndexOutOfRange { index: i64, size: usize },
}

impl TaskListError {
    /// Stable error code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, size: 0 } => {
                write!(f, "There is no task {index}; the list is empty.")
            }
            Self::IndexOutOfRange { index, size } => {
                write!(f, "There is no task {index}; valid task numbers are 1 to {size}.")
            }
        }
    }
}

impl Error for TaskListError {}

/// Outcome of one state-changing list operation.
///
/// Carries everything the response layer needs: a snapshot of the touched
/// task, the list size after the mutation, and the post-mutation sync
/// result. The mutation stands even when the sync failed.
#[derive(Debug)]
pub struct Mutated {
    /// Snapshot of the task the operation touched (added, marked, removed).
    pub task: Task,
    /// List size after the mutation.
    pub size: usize,
    /// Set when the post-mutation sync failed.
    pub sync_error: Option<StoreError>,
}

/// Ordered task collection, the single source of truth for one session.
pub struct TaskList<S: TaskStore> {
    tasks: Vec<Task>,
    store: S,
}

impl<S: TaskStore> TaskList<S> {
    /// Creates an empty list over the given store without reading it.
    pub fn new(store: S) -> Self {
        Self {
            tasks: Vec::new(),
            store,
        }
    }

    /// Loads the persisted sequence into a fresh list.
    ///
    /// A load failure is returned alongside an empty list instead of
    /// failing construction: the session proceeds and the caller decides
    /// how to surface the warning.
    pub fn load(store: S) -> (Self, Option<StoreError>) {
        match store.load() {
            Ok(tasks) => (Self { tasks, store }, None),
            Err(err) => {
                error!(
                    "event=list_load_recovered module=list status=error error_code={} error={}",
                    err.code(),
                    err
                );
                (
                    Self {
                        tasks: Vec::new(),
                        store,
                    },
                    Some(err),
                )
            }
        }
    }

    /// Returns the tasks in list order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task at the end of the list and syncs storage.
    ///
    /// Always succeeds given a constructed task; only the sync can fail,
    /// and that failure rides along in the outcome.
    pub fn add_task(&mut self, task: Task) -> Mutated {
        let snapshot = task.clone();
        self.tasks.push(task);
        Mutated {
            task: snapshot,
            size: self.tasks.len(),
            sync_error: self.sync().err(),
        }
    }

    /// Marks task number `index` as done in place and syncs storage.
    ///
    /// Idempotent: marking an already-done task again succeeds without a
    /// second transition.
    ///
    /// # Errors
    /// - [`TaskListError::IndexOutOfRange`] when `index` is outside
    ///   `1..=len()`; the list is left unchanged.
    pub fn mark_as_done(&mut self, index: i64) -> Result<Mutated, TaskListError> {
        let slot = self.position(index)?;
        self.tasks[slot].mark_done();
        Ok(Mutated {
            task: self.tasks[slot].clone(),
            size: self.tasks.len(),
            sync_error: self.sync().err(),
        })
    }

    /// Removes task number `index`, shifting later tasks down by one, and
    /// syncs storage.
    ///
    /// # Errors
    /// - [`TaskListError::IndexOutOfRange`] when `index` is outside
    ///   `1..=len()`; the list is left unchanged.
    pub fn delete_task(&mut self, index: i64) -> Result<Mutated, TaskListError> {
        let slot = self.position(index)?;
        let removed = self.tasks.remove(slot);
        Ok(Mutated {
            task: removed,
            size: self.tasks.len(),
            sync_error: self.sync().err(),
        })
    }

    /// Returns the ordered subsequence of tasks whose description contains
    /// `keyword` as a case-sensitive substring.
    pub fn find_matching_tasks(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .collect()
    }

    /// Writes the full sequence through the store.
    ///
    /// This is the terminating rewrite used by the farewell path; it is
    /// the same full-file write every mutation already triggers.
    pub fn overwrite(&self) -> StoreResult<()> {
        self.sync()
    }

    fn sync(&self) -> StoreResult<()> {
        self.store.save(&self.tasks)
    }

    fn position(&self, index: i64) -> Result<usize, TaskListError> {
        let size = self.tasks.len();
        if index < 1 || index > size as i64 {
            return Err(TaskListError::IndexOutOfRange { index, size });
        }
        Ok((index - 1) as usize)
    }
}

//! Response message templates.
//!
//! # Responsibility
//! - Build every user-facing success message from typed outcomes.
//! - Keep wording in one place so the interpreter stays a dispatch table.
//!
//! # Invariants
//! - Task lines always embed the canonical render, numbered from 1.
//! - A failed sync appends a warning line; it never replaces the success
//!   message the mutation earned.

use crate::list::Mutated;
use crate::model::task::Task;
use crate::store::StoreError;
use std::fmt::Write as _;

/// Greeting printed by the shell when a session opens.
pub fn greeting() -> String {
    "Hello! I'm LazyTask.\nWhat can I do for you?".to_string()
}

/// Farewell for the `bye` command.
///
/// A failure of the terminating overwrite is appended; it never suppresses
/// the farewell itself.
pub fn farewell(sync_error: Option<&StoreError>) -> String {
    let mut text = "Bye. Hope to see you again soon!".to_string();
    if let Some(err) = sync_error {
        push_sync_warning(&mut text, err);
    }
    text
}

/// Warning the shell prints when the saved list could not be read.
pub fn load_warning(err: &StoreError) -> String {
    format!("Warning: I couldn't read your saved tasks ({err}); starting with an empty list.")
}

/// Confirmation for a newly added task.
pub fn added(outcome: &Mutated) -> String {
    let mut text = format!(
        "Got it. I've added this task:\n  {}\nNow you have {} in the list.",
        outcome.task.render(),
        count_phrase(outcome.size)
    );
    if let Some(err) = outcome.sync_error.as_ref() {
        push_sync_warning(&mut text, err);
    }
    text
}

/// Confirmation for a task marked as done.
pub fn marked_done(outcome: &Mutated) -> String {
    let mut text = format!(
        "Nice! I've marked this task as done:\n  {}",
        outcome.task.render()
    );
    if let Some(err) = outcome.sync_error.as_ref() {
        push_sync_warning(&mut text, err);
    }
    text
}

/// Confirmation for a removed task.
pub fn deleted(outcome: &Mutated) -> String {
    let mut text = format!(
        "Noted. I've removed this task:\n  {}\nNow you have {} in the list.",
        outcome.task.render(),
        count_phrase(outcome.size)
    );
    if let Some(err) = outcome.sync_error.as_ref() {
        push_sync_warning(&mut text, err);
    }
    text
}

/// Full list enumeration; an empty list gets a dedicated sentence instead
/// of a header over nothing.
pub fn listing(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "You have no tasks in your list.".to_string();
    }
    let mut text = "Here are the tasks in your list:".to_string();
    for (position, task) in tasks.iter().enumerate() {
        let _ = write!(text, "\n{}. {}", position + 1, task.render());
    }
    text
}

/// Find result enumeration; matches are renumbered from 1, and an empty
/// result keeps the header over an empty body.
pub fn matches(tasks: &[&Task]) -> String {
    let mut text = "Here are the matching tasks in your list:".to_string();
    for (position, task) in tasks.iter().enumerate() {
        let _ = write!(text, "\n{}. {}", position + 1, task.render());
    }
    text
}

fn push_sync_warning(text: &mut String, err: &StoreError) {
    let _ = write!(text, "\nWarning: your tasks could not be saved: {err}");
}

fn count_phrase(size: usize) -> String {
    if size == 1 {
        "1 task".to_string()
    } else {
        format!("{size} tasks")
    }
}

#[cfg(test)]
mod tests {
    use super::{added, count_phrase, farewell, listing, matches};
    use crate::list::Mutated;
    use crate::model::task::{Task, TaskValidationError};
    use crate::store::record::RecordError;
    use crate::store::StoreError;

    #[test]
    fn added_message_embeds_render_and_count() {
        let outcome = Mutated {
            task: Task::todo("read book"),
            size: 1,
            sync_error: None,
        };
        let text = added(&outcome);
        assert!(text.contains("[T][x] read book"));
        assert!(text.contains("Now you have 1 task in the list."));
    }

    #[test]
    fn sync_failure_appends_a_warning_line() {
        let outcome = Mutated {
            task: Task::todo("read book"),
            size: 3,
            sync_error: Some(StoreError::Unstorable {
                position: 2,
                source: RecordError::Invalid(TaskValidationError::EmptyDescription),
            }),
        };
        let text = added(&outcome);
        assert!(text.contains("Now you have 3 tasks in the list."));
        assert!(text.contains("\nWarning: your tasks could not be saved:"));
    }

    #[test]
    fn listing_numbers_from_one_and_handles_empty() {
        assert_eq!(listing(&[]), "You have no tasks in your list.");

        let tasks = vec![Task::todo("read book"), Task::event("standup", "9am")];
        let text = listing(&tasks);
        assert!(text.starts_with("Here are the tasks in your list:"));
        assert!(text.contains("\n1. [T][x] read book"));
        assert!(text.contains("\n2. [E][x] standup (at: 9am)"));
    }

    #[test]
    fn matches_keeps_the_header_over_an_empty_body() {
        assert_eq!(matches(&[]), "Here are the matching tasks in your list:");
    }

    #[test]
    fn farewell_reports_a_failed_overwrite_without_suppressing_the_goodbye() {
        let err = StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let text = farewell(Some(&err));
        assert!(text.starts_with("Bye. Hope to see you again soon!"));
        assert!(text.contains("could not be saved"));
    }

    #[test]
    fn count_phrase_pluralizes() {
        assert_eq!(count_phrase(0), "0 tasks");
        assert_eq!(count_phrase(1), "1 task");
        assert_eq!(count_phrase(2), "2 tasks");
    }
}

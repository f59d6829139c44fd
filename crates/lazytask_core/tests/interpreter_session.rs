use lazytask_core::{
    FileTaskStore, Interpreter, StoreError, StoreResult, Task, TaskList, TaskStore,
};
use std::fs;
use std::io;

#[test]
fn adding_each_variant_confirms_with_the_render() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let reply = session.execute("todo read book");
    assert!(reply.text.contains("[T][x] read book"));
    assert!(reply.text.contains("Now you have 1 task in the list."));
    assert!(!reply.is_farewell);
    assert_eq!(session.task_list().len(), 1);

    let reply = session.execute("deadline submit report /by Friday");
    assert!(reply.text.contains("[D][x] submit report (by: Friday)"));
    assert!(reply.text.contains("Now you have 2 tasks in the list."));

    let reply = session.execute("event project meeting /at Mon 2pm");
    assert!(reply.text.contains("[E][x] project meeting (at: Mon 2pm)"));
    assert_eq!(session.task_list().len(), 3);
}

#[test]
fn done_reply_shows_the_done_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.execute("todo read book");

    let reply = session.execute("done 1");
    assert!(reply.text.contains("Nice! I've marked this task as done:"));
    assert!(reply.text.contains("[T][✓] read book"));

    // Marking again is a quiet no-op, not an error.
    let reply = session.execute("done 1");
    assert!(reply.text.contains("[T][✓] read book"));
}

#[test]
fn missing_marker_rejects_without_touching_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let reply = session.execute("deadline submit report");
    assert_eq!(
        reply.text,
        "The deadline cannot be found because /by is missing."
    );
    assert_eq!(session.task_list().len(), 0);

    session.execute("todo first");
    let reply = session.execute("event sync");
    assert_eq!(
        reply.text,
        "The event date and time cannot be found because /at is missing."
    );
    assert_eq!(session.task_list().len(), 1);
}

#[test]
fn out_of_range_delete_leaves_the_list_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.execute("todo one");
    session.execute("todo two");

    let reply = session.execute("delete 5");
    assert_eq!(
        reply.text,
        "There is no task 5; valid task numbers are 1 to 2."
    );
    assert_eq!(session.task_list().len(), 2);
}

#[test]
fn delete_renumbers_the_survivors() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.execute("todo one");
    session.execute("todo two");
    session.execute("todo three");

    let reply = session.execute("delete 2");
    assert!(reply.text.contains("Noted. I've removed this task:"));
    assert!(reply.text.contains("[T][x] two"));
    assert!(reply.text.contains("Now you have 2 tasks in the list."));

    let reply = session.execute("list");
    assert_eq!(
        reply.text,
        "Here are the tasks in your list:\n1. [T][x] one\n2. [T][x] three"
    );
}

#[test]
fn find_lists_only_matching_descriptions() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.execute("todo read book");
    session.execute("todo write essay");

    let reply = session.execute("find book");
    assert_eq!(
        reply.text,
        "Here are the matching tasks in your list:\n1. [T][x] read book"
    );

    let reply = session.execute("find nothing");
    assert_eq!(reply.text, "Here are the matching tasks in your list:");
}

#[test]
fn unknown_and_malformed_input_get_their_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    let reply = session.execute("blah blah");
    assert_eq!(reply.text, "I'm sorry, but I don't know what `blah` means.");

    let reply = session.execute("todo   ");
    assert_eq!(reply.text, "The description of a todo cannot be empty.");

    let reply = session.execute("done two");
    assert_eq!(reply.text, "`two` is not a task number.");

    let reply = session.execute("find");
    assert_eq!(reply.text, "The find command needs a keyword to search for.");

    assert_eq!(session.task_list().len(), 0);
}

#[test]
fn empty_list_replies_use_the_dedicated_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);

    assert_eq!(session.execute("list").text, "You have no tasks in your list.");
    assert_eq!(
        session.execute("done 1").text,
        "There is no task 1; the list is empty."
    );
}

#[test]
fn bye_overwrites_storage_and_signals_farewell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let (mut session, warning) = Interpreter::load(FileTaskStore::new(&path));
    assert!(warning.is_none());

    session.execute("todo read book");
    session.execute("done 1");

    let reply = session.execute("bye");
    assert_eq!(reply.text, "Bye. Hope to see you again soon!");
    assert!(reply.is_farewell);

    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 1 | read book\n");
}

#[test]
fn a_second_session_resumes_from_the_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");

    let (mut first, _) = Interpreter::load(FileTaskStore::new(&path));
    first.execute("deadline submit report /by Friday");
    first.execute("bye");

    let (mut second, warning) = Interpreter::load(FileTaskStore::new(&path));
    assert!(warning.is_none());
    let reply = second.execute("list");
    assert_eq!(
        reply.text,
        "Here are the tasks in your list:\n1. [D][x] submit report (by: Friday)"
    );
}

#[test]
fn load_failure_starts_empty_and_reports_the_cause() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "X | 0 | not a record\n").unwrap();

    let (mut session, warning) = Interpreter::load(FileTaskStore::new(&path));
    assert!(matches!(warning, Some(StoreError::BadRecord { line: 1, .. })));
    assert_eq!(session.execute("list").text, "You have no tasks in your list.");
}

#[test]
fn sync_failure_appends_a_warning_but_keeps_the_session_alive() {
    let mut session = Interpreter::new(TaskList::new(FailingStore));

    let reply = session.execute("todo kept in memory");
    assert!(reply.text.contains("Got it. I've added this task:"));
    assert!(reply.text.contains("Warning: your tasks could not be saved:"));
    assert_eq!(session.task_list().len(), 1);

    let reply = session.execute("bye");
    assert!(reply.text.starts_with("Bye. Hope to see you again soon!"));
    assert!(reply.text.contains("Warning: your tasks could not be saved:"));
    assert!(reply.is_farewell);
}

fn session_in(dir: &tempfile::TempDir) -> Interpreter<FileTaskStore> {
    Interpreter::new(TaskList::new(FileTaskStore::new(
        dir.path().join("tasks.txt"),
    )))
}

struct FailingStore;

impl TaskStore for FailingStore {
    fn load(&self) -> StoreResult<Vec<Task>> {
        Err(StoreError::Io(io::Error::new(
            io::ErrorKind::Other,
            "disk unavailable",
        )))
    }

    fn save(&self, _tasks: &[Task]) -> StoreResult<()> {
        Err(StoreError::Io(io::Error::new(
            io::ErrorKind::Other,
            "disk unavailable",
        )))
    }
}

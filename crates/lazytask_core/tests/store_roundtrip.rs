use lazytask_core::store::record::RecordError;
use lazytask_core::{FileTaskStore, StoreError, Task, TaskKind, TaskStore};
use std::fs;

#[test]
fn save_then_load_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTaskStore::new(dir.path().join("tasks.txt"));

    let mut deadline = Task::deadline("submit report", "Friday 6pm");
    deadline.mark_done();
    let tasks = vec![
        Task::todo("read book"),
        deadline,
        Task::event("team sync", "Mon 10am"),
    ];

    store.save(&tasks).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, tasks);
    assert_eq!(loaded[0].kind(), TaskKind::Todo);
    assert!(loaded[1].is_done());
    assert_eq!(loaded[2].schedule(), Some("Mon 10am"));
}

#[test]
fn missing_file_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTaskStore::new(dir.path().join("never-written.txt"));

    assert_eq!(store.load().unwrap(), Vec::new());
}

#[test]
fn save_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("nested").join("tasks.txt");
    let store = FileTaskStore::new(&path);

    store.save(&[Task::todo("first")]).unwrap();

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 0 | first\n");
}

#[test]
fn save_rewrites_instead_of_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    let store = FileTaskStore::new(&path);

    store
        .save(&[Task::todo("one"), Task::todo("two")])
        .unwrap();
    store.save(&[Task::todo("two")]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 0 | two\n");
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn blank_lines_are_skipped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T | 0 | read book\n\n   \nD | 1 | pay rent | June\n").unwrap();

    let loaded = FileTaskStore::new(&path).load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].description(), "pay rent");
}

#[test]
fn corrupt_line_fails_load_with_its_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, "T | 0 | fine\nX | 0 | what is this\nT | 1 | also fine\n").unwrap();

    let err = FileTaskStore::new(&path).load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::BadRecord {
            line: 2,
            source: RecordError::UnknownTag(_)
        }
    ));
    assert_eq!(err.code(), "store_bad_record");
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn unstorable_task_fails_save_with_its_position() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTaskStore::new(dir.path().join("tasks.txt"));

    let tasks = vec![Task::todo("fine"), Task::todo("broken\nrecord")];
    let err = store.save(&tasks).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Unstorable {
            position: 2,
            source: RecordError::NewlineInField(_)
        }
    ));
    assert_eq!(err.code(), "store_unstorable_task");
}

#[test]
fn delimiter_in_final_field_survives_the_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTaskStore::new(dir.path().join("tasks.txt"));

    let tasks = vec![
        Task::todo("read a | b listing"),
        Task::deadline("pay rent", "June | maybe July"),
    ];

    store.save(&tasks).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded[0].description(), "read a | b listing");
    assert_eq!(loaded[1].schedule(), Some("June | maybe July"));
}

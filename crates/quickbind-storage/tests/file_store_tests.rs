//! Tests for the file-backed key-value store

use quickbind_storage::{FileStore, KeyValueStore, StorageError};

#[test]
fn test_read_missing_key_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    assert_eq!(store.read("settings").unwrap(), None);
}

#[test]
fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.write("settings", r#"{"version":1}"#).unwrap();
    assert_eq!(
        store.read("settings").unwrap().as_deref(),
        Some(r#"{"version":1}"#)
    );
}

#[test]
fn test_write_replaces_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.write("settings", "first").unwrap();
    store.write("settings", "second").unwrap();
    assert_eq!(store.read("settings").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_value_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::new(dir.path()).unwrap();
        store.write("settings", "durable").unwrap();
    }

    let reopened = FileStore::new(dir.path()).unwrap();
    assert_eq!(reopened.read("settings").unwrap().as_deref(), Some("durable"));
}

#[test]
fn test_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.write("settings", "{}").unwrap();
    store.remove("settings").unwrap();
    store.remove("settings").unwrap();
    assert_eq!(store.read("settings").unwrap(), None);
}

#[test]
fn test_keys_are_sorted_and_exclude_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.write("zeta", "1").unwrap();
    store.write("alpha", "2").unwrap();
    // Stray temp file from an interrupted write must not show up as a key
    std::fs::write(dir.path().join(".alpha.tmp"), "partial").unwrap();

    assert_eq!(store.keys().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn test_rejects_path_traversal_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    for key in ["", "../escape", "a/b", ".hidden"] {
        assert!(
            matches!(store.write(key, "x"), Err(StorageError::InvalidKey(_))),
            "key {:?} should be rejected",
            key
        );
    }
}

#[test]
fn test_no_partial_record_left_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.write("settings", "{}").unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

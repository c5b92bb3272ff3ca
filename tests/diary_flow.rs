//! Persistence behavior across simulated process restarts, through the
//! real file-backed storage.

use glass_diary::clock::SystemClock;
use glass_diary::entry_store::{EntryStore, ENTRIES_KEY};
use glass_diary::storage::{FileStorage, KeyValueStorage};
use glass_diary::theme::{ThemeState, THEME_KEY};
use std::path::Path;

fn open_store(dir: &Path) -> EntryStore {
    EntryStore::load(
        Box::new(FileStorage::new(dir.to_path_buf()).unwrap()),
        Box::new(SystemClock),
    )
}

#[test]
fn entries_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let hello_id = {
        let mut store = open_store(dir.path());
        let hello_id = store.save("Hello").unwrap();
        store.save("World").unwrap();
        hello_id
    };

    let mut store = open_store(dir.path());
    let contents: Vec<_> = store.entries().iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["World", "Hello"]);

    store.delete(&hello_id);

    let store = open_store(dir.path());
    let contents: Vec<_> = store.entries().iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, ["World"]);
}

#[test]
fn reload_preserves_ids_content_timestamps_and_order() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut store = open_store(dir.path());
        store.save("first").unwrap();
        store.save("second").unwrap();
        store.save("third").unwrap();
        store.entries().to_vec()
    };

    let store = open_store(dir.path());
    assert_eq!(store.entries(), before.as_slice());
}

#[test]
fn corrupted_entry_data_starts_an_empty_diary() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    storage.set(ENTRIES_KEY, "definitely not json").unwrap();

    let store = open_store(dir.path());
    assert!(store.is_empty());
}

#[test]
fn blank_saves_leave_storage_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    assert!(store.save("   ").is_none());

    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    assert!(storage.get(ENTRIES_KEY).unwrap().is_none());
}

#[test]
fn theme_preference_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut theme = ThemeState::load(Box::new(
            FileStorage::new(dir.path().to_path_buf()).unwrap(),
        ));
        assert!(theme.is_dark());
        theme.toggle();
    }

    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));

    let theme = ThemeState::load(Box::new(
        FileStorage::new(dir.path().to_path_buf()).unwrap(),
    ));
    assert!(!theme.is_dark());
}

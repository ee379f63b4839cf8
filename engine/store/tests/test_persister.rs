use std::fs;
use std::io::{Cursor, Write};

use store::{flush, resolve, Association, PreferenceStore};
use tempfile::NamedTempFile;

fn temp_file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(content.as_bytes()).expect("Failed to seed temporary file");
    file
}

#[test]
fn test_flush_appended_entry() {
    let mut file = temp_file_with("text/plain=nano\nimage/png=feh\n");
    let mut store = PreferenceStore::from_text("text/plain=nano\nimage/png=feh\n");
    resolve(&mut store, "application/pdf", Some("zathura"));

    flush(file.as_file_mut(), &store).expect("flush should succeed");

    let contents = fs::read_to_string(file.path()).expect("Failed to read flushed file");
    assert_eq!(contents, "text/plain=nano\nimage/png=feh\napplication/pdf=zathura\n");
}

#[test]
fn test_flush_replaced_entry() {
    let mut file = temp_file_with("text/plain=nano\nimage/png=feh\n");
    let mut store = PreferenceStore::from_text("text/plain=nano\nimage/png=feh\n");
    resolve(&mut store, "text/plain", Some("vim"));

    flush(file.as_file_mut(), &store).expect("flush should succeed");

    let contents = fs::read_to_string(file.path()).expect("Failed to read flushed file");
    assert_eq!(contents, "text/plain=vim\nimage/png=feh\n");
}

#[test]
fn test_flush_shrinking_content_truncates() {
    let long_program = "a".repeat(80);
    let mut store = PreferenceStore::new();
    store.append(Association::new("application/x-long", long_program));
    let original = store.to_text();
    assert_eq!(original.len(), 100);

    let mut file = temp_file_with(&original);
    resolve(&mut store, "application/x-long", Some("vi"));
    flush(file.as_file_mut(), &store).expect("flush should succeed");

    let contents = fs::read_to_string(file.path()).expect("Failed to read flushed file");
    assert_eq!(contents, "application/x-long=vi\n");
    assert_eq!(fs::metadata(file.path()).expect("metadata").len(), contents.len() as u64);
}

#[test]
fn test_flush_empty_store_empties_file() {
    let mut file = temp_file_with("text/plain=nano\n");
    flush(file.as_file_mut(), &PreferenceStore::new()).expect("flush should succeed");
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "");
}

#[test]
fn test_flush_ignores_current_position() {
    let mut cursor = Cursor::new(b"text/plain=nano-with-a-long-name\n".to_vec());
    cursor.set_position(10);
    let store = PreferenceStore::from_text("text/plain=ed\n");

    flush(&mut cursor, &store).expect("flush should succeed");

    assert_eq!(cursor.into_inner(), b"text/plain=ed\n".to_vec());
}

#[test]
fn test_flush_failure_is_persistence_failed() {
    let file = temp_file_with("text/plain=nano\n");
    let mut read_only =
        fs::File::open(file.path()).expect("Failed to reopen temporary file read-only");
    let store = PreferenceStore::from_text("text/plain=vim\n");

    let result = flush(&mut read_only, &store);

    match result.expect_err("writing through a read-only handle must fail") {
        store::StoreError::PersistenceFailed(_) => {}
        other => panic!("Expected PersistenceFailed error, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "text/plain=nano\n");
}

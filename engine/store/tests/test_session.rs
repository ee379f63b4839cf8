use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

use store::session::{load, resolve_in, unset_in};
use store::{Association, ExclusiveLock, StoreError};
use tempfile::{tempdir, NamedTempFile};

const SAMPLE: &str = "text/plain=nano\nimage/png=feh\n";

fn temp_file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(content.as_bytes()).expect("Failed to seed temporary file");
    file
}

fn open_rw(path: &Path) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .expect("Failed to open preference file")
}

#[test]
fn test_resolve_in_lookup_leaves_file_untouched() {
    let mut file = temp_file_with(SAMPLE);
    let program = resolve_in(file.as_file_mut(), "text/plain", None).expect("lookup");
    assert_eq!(program, "nano");
    assert_eq!(fs::read_to_string(file.path()).expect("read"), SAMPLE);
}

#[test]
fn test_resolve_in_reads_from_start() {
    // The handle may arrive positioned anywhere, e.g. after a previous read.
    let mut file = temp_file_with(SAMPLE);
    let program = resolve_in(file.as_file_mut(), "image/png", None).expect("lookup");
    assert_eq!(program, "feh");
}

#[test]
fn test_resolve_in_miss_is_no_preference_found() {
    let mut file = temp_file_with(SAMPLE);
    match resolve_in(file.as_file_mut(), "application/pdf", None) {
        Err(StoreError::NoPreferenceFound { mime_type }) => {
            assert_eq!(mime_type, "application/pdf")
        }
        other => panic!("Expected NoPreferenceFound, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(file.path()).expect("read"), SAMPLE);
}

#[test]
fn test_resolve_in_sets_default_on_empty_file() {
    let mut file = temp_file_with("");
    let program = resolve_in(file.as_file_mut(), "application/pdf", Some("zathura"))
        .expect("set default");
    assert_eq!(program, "zathura");
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "application/pdf=zathura\n");
}

#[test]
fn test_resolve_in_drops_malformed_lines_on_rewrite() {
    let mut file = temp_file_with("garbage-no-equals\ntext/plain=nano\n");
    resolve_in(file.as_file_mut(), "text/plain", Some("vim")).expect("set default");
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "text/plain=vim\n");
}

#[test]
fn test_resolve_in_skips_non_utf8_line() {
    let mut file = NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(b"text/plain=nano\nimage/png=f\xffeh\n").expect("seed");

    let program = resolve_in(file.as_file_mut(), "text/plain", None).expect("valid line resolves");
    assert_eq!(program, "nano");
    match resolve_in(file.as_file_mut(), "image/png", None) {
        Err(StoreError::NoPreferenceFound { .. }) => {}
        other => panic!("Expected NoPreferenceFound, got {:?}", other),
    }

    // Setting a default still works and rewrites the file without the bad line.
    resolve_in(file.as_file_mut(), "text/plain", Some("vim")).expect("set default");
    assert_eq!(fs::read_to_string(file.path()).expect("read"), "text/plain=vim\n");
}

#[test]
fn test_unset_in_removes_first_match() {
    let mut file = temp_file_with("text/plain=nano\nimage/png=feh\ntext/plain=emacs\n");
    let removed = unset_in(file.as_file_mut(), "text/plain").expect("unset");
    assert_eq!(removed, Some(Association::new("text/plain", "nano")));
    assert_eq!(
        fs::read_to_string(file.path()).expect("read"),
        "image/png=feh\ntext/plain=emacs\n"
    );

    let missing = unset_in(file.as_file_mut(), "application/pdf").expect("unset");
    assert_eq!(missing, None);
}

#[test]
fn test_load_returns_all_entries() {
    let mut file = temp_file_with(SAMPLE);
    let store = load(file.as_file_mut()).expect("load");
    assert_eq!(store.len(), 2);
    assert_eq!(store.program_for("image/png"), Some("feh"));
}

#[test]
fn test_lock_excludes_second_handle() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("associations");
    let first = open_rw(&path);
    let second = open_rw(&path);

    let guard = ExclusiveLock::acquire(&first).expect("first lock");
    match ExclusiveLock::try_acquire(&second) {
        Err(StoreError::Locked) => {}
        other => panic!("Expected Locked, got {:?}", other),
    }

    drop(guard);
    ExclusiveLock::try_acquire(&second).expect("lock should be free after drop");
}

#[test]
fn test_locked_concurrent_upserts_are_all_kept() {
    const WRITERS: usize = 8;
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = Arc::new(dir.path().join("associations"));
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|n| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut file = open_rw(&path);
                barrier.wait();
                let _lock = ExclusiveLock::acquire(&file).expect("lock");
                let mime_type = format!("application/x-test-{}", n);
                resolve_in(&mut file, &mime_type, Some("cat")).expect("set default")
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("writer thread panicked"), "cat");
    }

    let mut file = open_rw(&path);
    let store = load(&mut file).expect("load");
    assert_eq!(store.len(), WRITERS);
    for n in 0..WRITERS {
        assert_eq!(store.program_for(&format!("application/x-test-{}", n)), Some("cat"));
    }
}

//! Prebuilt file managers: memory-mapped bytes and UTF-8 text.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use resourceful::prebuilt::{load_mapped, load_text, MAPPED_FILES, TEXT_FILES};
use resourceful::{get_path_manager, mapped_file_manager, text_manager, MappedFile, ResourceError};

#[test]
fn mapped_file_exposes_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, [1u8, 2, 3, 4]).unwrap();

    let mapped = MappedFile::open(&path).unwrap();
    assert_eq!(mapped.as_bytes(), &[1, 2, 3, 4]);
    assert_eq!(mapped.len(), 4);
    assert!(!mapped.is_empty());
    assert_eq!(mapped.path(), path.as_path());
}

#[test]
fn loaders_report_missing_files_as_absent() {
    let missing = PathBuf::from("/no/such/file.bin");
    assert!(load_mapped(&missing).is_none());
    assert!(load_text(&missing).is_none());
}

#[test]
fn text_loader_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, [0xffu8, 0xfe]).unwrap();
    assert!(load_text(&path).is_none());
}

#[test]
fn prebuilt_managers_are_configured_singletons() {
    let mapped = mapped_file_manager();
    assert!(Arc::ptr_eq(&mapped, &mapped_file_manager()));
    assert!(mapped.is_configured());
    assert_eq!(mapped.handle(), MAPPED_FILES);

    let text = text_manager();
    assert!(Arc::ptr_eq(&text, &text_manager()));
    assert_eq!(text.handle(), TEXT_FILES);
}

#[test]
fn prebuilt_managers_are_not_tracked_by_registry() {
    let tracked = get_path_manager::<String>(TEXT_FILES);
    assert!(!Arc::ptr_eq(&tracked, &text_manager()));
    assert!(!tracked.is_configured());
}

#[test]
fn text_manager_loads_and_caches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greeting.txt");
    fs::write(&path, "hello").unwrap();

    let manager = text_manager();
    let handle = "prebuilt_test/greeting";
    manager.register(handle, path);

    let first = manager.get(handle).unwrap();
    assert_eq!(first.as_str(), "hello");
    assert!(Arc::ptr_eq(&first, &manager.get(handle).unwrap()));
}

#[test]
fn mapped_file_manager_reports_load_failure() {
    let manager = mapped_file_manager();
    let handle = "prebuilt_test/missing";
    manager.register(handle, PathBuf::from("/no/such/file.bin"));
    assert!(matches!(manager.get(handle), Err(ResourceError::LoadFailed { .. })));
}

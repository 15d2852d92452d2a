// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn json_file_store_missing_key_is_none() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    assert!(store.load("filters").unwrap().is_none());
}

#[test]
fn json_file_store_round_trips() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.save("filters", b"hello").unwrap();
    assert_eq!(store.load("filters").unwrap(), Some(b"hello".to_vec()));
}

#[test]
fn json_file_store_overwrite_replaces_contents() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.save("filters", b"first").unwrap();
    store.save("filters", b"second").unwrap();
    assert_eq!(store.load("filters").unwrap(), Some(b"second".to_vec()));
}

#[test]
fn json_file_store_leaves_no_tmp_file_behind_on_success() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    store.save("filters", b"hello").unwrap();
    assert!(!dir.path().join("filters.json.tmp").exists());
    assert!(dir.path().join("filters.json").exists());
}

#[test]
fn json_file_store_creates_root_dir_on_save() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested/deeper");
    let store = JsonFileStore::new(&nested);
    store.save("filters", b"hello").unwrap();
    assert!(nested.join("filters.json").exists());
}

#[test]
fn in_memory_store_missing_key_is_none() {
    let store = InMemoryStore::new();
    assert!(store.load("filters").unwrap().is_none());
}

#[test]
fn in_memory_store_round_trips() {
    let store = InMemoryStore::new();
    store.save("filters", b"hello").unwrap();
    assert_eq!(store.load("filters").unwrap(), Some(b"hello".to_vec()));
}

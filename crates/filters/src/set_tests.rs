// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use pm_core::FakeClock;
use pm_persist::InMemoryStore;

use super::*;

fn fixture() -> FilterSet {
    FilterSet::new(
        FilterKind::Filesystem,
        "filters.filesystem",
        Arc::new(FakeClock::default()),
        Arc::new(InMemoryStore::new()),
    )
}

#[test]
fn add_rejects_empty_pattern() {
    let set = fixture();
    assert_eq!(
        set.add("", Ops::DELETE).unwrap_err(),
        FilterSetError::Entry(FilterEntryError::EmptyPattern)
    );
}

#[test]
fn add_lowercases_and_assigns_nonzero_id() {
    let set = fixture();
    let id = set.add("ProgramData", Ops::WRITE).unwrap();
    assert_ne!(id.get(), 0);
    let listed = set.list(0, 10);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pattern, "programdata");
}

#[test]
fn successive_adds_get_distinct_ids() {
    let set = fixture();
    let a = set.add("alpha", Ops::WRITE).unwrap();
    let b = set.add("beta", Ops::WRITE).unwrap();
    assert_ne!(a, b);
}

#[test]
fn list_preserves_insertion_order_and_is_paged() {
    let set = fixture();
    set.add("first", Ops::WRITE).unwrap();
    set.add("second", Ops::WRITE).unwrap();
    set.add("third", Ops::WRITE).unwrap();

    let page = set.list(1, 1);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].pattern, "second");
}

#[test]
fn remove_by_id_returns_whether_anything_removed() {
    let set = fixture();
    let id = set.add("alpha", Ops::WRITE).unwrap();
    assert!(set.remove(id));
    assert!(!set.remove(id));
    assert!(set.list(0, 10).is_empty());
}

#[test]
fn matches_is_case_insensitive_substring_with_ops_overlap() {
    let set = fixture();
    set.add("secret.db", Ops::DELETE).unwrap();

    assert!(set.matches("C:\\data\\SECRET.DB", Ops::DELETE));
    assert!(!set.matches("C:\\data\\secret.db", Ops::WRITE));
    assert!(!set.matches("C:\\data\\other.db", Ops::DELETE));
}

#[test]
fn save_and_restore_round_trip_through_store() {
    let clock = Arc::new(FakeClock::default());
    let store: Arc<dyn ConfigStore> = Arc::new(InMemoryStore::new());

    let first = FilterSet::new(FilterKind::Filesystem, "filters.filesystem", clock.clone(), store.clone());
    first.add("alpha", Ops::EXECUTE).unwrap();

    let second = FilterSet::new(FilterKind::Filesystem, "filters.filesystem", clock, store);
    second.restore();
    let entries = second.list(0, 10);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].pattern, "alpha");
}

#[test]
fn count_reflects_adds_and_removes() {
    let set = fixture();
    assert_eq!(set.count(), 0);
    let id = set.add("alpha", Ops::WRITE).unwrap();
    set.add("beta", Ops::WRITE).unwrap();
    assert_eq!(set.count(), 2);
    set.remove(id);
    assert_eq!(set.count(), 1);
}

#[test]
fn teardown_makes_every_operation_a_noop() {
    let set = fixture();
    set.add("alpha", Ops::WRITE).unwrap();
    set.teardown();

    assert!(set.list(0, 10).is_empty());
    assert!(!set.matches("alpha", Ops::WRITE));
    assert_eq!(
        set.add("beta", Ops::WRITE).unwrap_err(),
        FilterSetError::TornDown
    );
}

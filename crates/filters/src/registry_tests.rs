// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use pm_core::FakeClock;
use pm_persist::InMemoryStore;

use super::*;

fn fixture() -> FilterRegistry {
    FilterRegistry::new(Arc::new(FakeClock::default()), Arc::new(InMemoryStore::new()))
}

#[test]
fn kinds_are_independent() {
    let registry = fixture();
    registry.add(FilterKind::Filesystem, "alpha", Ops::WRITE).unwrap();
    registry.add(FilterKind::Registry, "hklm\\software", Ops::WRITE).unwrap();

    assert_eq!(registry.list(FilterKind::Filesystem, 0, 10).len(), 1);
    assert_eq!(registry.list(FilterKind::Registry, 0, 10).len(), 1);
    assert!(!registry.matches(FilterKind::Registry, "alpha", Ops::WRITE));
}

#[test]
fn remove_only_affects_its_own_kind() {
    let registry = fixture();
    let fs_id = registry.add(FilterKind::Filesystem, "alpha", Ops::WRITE).unwrap();
    registry.add(FilterKind::Registry, "alpha", Ops::WRITE).unwrap();

    assert!(registry.remove(FilterKind::Filesystem, fs_id));
    assert!(registry.list(FilterKind::Filesystem, 0, 10).is_empty());
    assert_eq!(registry.list(FilterKind::Registry, 0, 10).len(), 1);
}

#[test]
fn count_is_tracked_independently_per_kind() {
    let registry = fixture();
    registry.add(FilterKind::Filesystem, "alpha", Ops::WRITE).unwrap();
    registry.add(FilterKind::Filesystem, "beta", Ops::WRITE).unwrap();
    registry.add(FilterKind::Registry, "gamma", Ops::WRITE).unwrap();

    assert_eq!(registry.count(FilterKind::Filesystem), 2);
    assert_eq!(registry.count(FilterKind::Registry), 1);
}

#[test]
fn teardown_drains_every_kind() {
    let registry = fixture();
    registry.add(FilterKind::Filesystem, "alpha", Ops::WRITE).unwrap();
    registry.add(FilterKind::Registry, "beta", Ops::WRITE).unwrap();

    registry.teardown();

    assert!(registry.list(FilterKind::Filesystem, 0, 10).is_empty());
    assert!(registry.list(FilterKind::Registry, 0, 10).is_empty());
}

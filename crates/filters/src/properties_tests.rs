// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use pm_core::FakeClock;
use pm_persist::InMemoryStore;
use proptest::prelude::*;

use crate::FilterRegistry;
use pm_core::{FilterKind, Ops};

fn registry() -> FilterRegistry {
    FilterRegistry::new(Arc::new(FakeClock::default()), Arc::new(InMemoryStore::new()))
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.\\\\/]{1,40}"
}

proptest! {
    // Property 1: filter idempotence under match.
    #[test]
    fn matches_iff_lowercased_substring(pattern in pattern_strategy(), haystack in pattern_strategy()) {
        let registry = registry();
        registry.add(FilterKind::Filesystem, &pattern, Ops::DELETE).unwrap();

        let expected = haystack.to_lowercase().contains(&pattern.to_lowercase());
        let actual = registry.matches(FilterKind::Filesystem, &haystack, Ops::DELETE);
        prop_assert_eq!(actual, expected);
    }

    // Property 2: removal completeness.
    #[test]
    fn remove_is_exactly_once(pattern in pattern_strategy()) {
        let registry = registry();
        let id = registry.add(FilterKind::Filesystem, &pattern, Ops::WRITE).unwrap();

        prop_assert!(registry.remove(FilterKind::Filesystem, id));
        prop_assert!(!registry.remove(FilterKind::Filesystem, id));
        prop_assert!(!registry.matches(FilterKind::Filesystem, &pattern, Ops::WRITE));
    }

    // Property 7: persistence round-trip.
    #[test]
    fn restore_after_save_reproduces_the_set(patterns in prop::collection::vec(pattern_strategy(), 0..8)) {
        let clock = Arc::new(FakeClock::default());
        let store: Arc<dyn pm_persist::ConfigStore> = Arc::new(InMemoryStore::new());

        let before = FilterRegistry::new(clock.clone(), store.clone());
        for pattern in &patterns {
            before.add(FilterKind::Filesystem, pattern, Ops::WRITE).unwrap();
        }
        let expected = before.list(FilterKind::Filesystem, 0, usize::MAX);

        let after = FilterRegistry::new(clock, store);
        after.restore_all();
        let actual = after.list(FilterKind::Filesystem, 0, usize::MAX);

        prop_assert_eq!(actual, expected);
    }
}

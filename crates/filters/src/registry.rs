// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Groups a [`FilterSet`] per [`FilterKind`], the shape (F)'s adapters
//! and (H)'s control surface actually depend on.

use std::collections::HashMap;
use std::sync::Arc;

use pm_core::{Clock, FilterEntry, FilterId, FilterKind, Ops};
use pm_persist::ConfigStore;

use crate::set::{FilterSet, FilterSetError};

/// One [`FilterSet`] per [`FilterKind`], each persisted under its own
/// well-known key (`"filters.filesystem"`, `"filters.registry"`).
pub struct FilterRegistry {
    sets: HashMap<FilterKind, FilterSet>,
}

impl FilterRegistry {
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn ConfigStore>) -> Self {
        let mut sets = HashMap::new();
        for kind in [FilterKind::Filesystem, FilterKind::Registry] {
            let key = format!("filters.{}", kind_key(kind));
            sets.insert(kind, FilterSet::new(kind, key, clock.clone(), store.clone()));
        }
        Self { sets }
    }

    fn set(&self, kind: FilterKind) -> &FilterSet {
        self.sets
            .get(&kind)
            .unwrap_or_else(|| unreachable!("every FilterKind has a registered FilterSet"))
    }

    pub fn add(&self, kind: FilterKind, pattern: &str, ops: Ops) -> Result<FilterId, FilterSetError> {
        self.set(kind).add(pattern, ops)
    }

    pub fn remove(&self, kind: FilterKind, id: FilterId) -> bool {
        self.set(kind).remove(id)
    }

    pub fn list(&self, kind: FilterKind, skip: usize, max: usize) -> Vec<FilterEntry> {
        self.set(kind).list(skip, max)
    }

    pub fn matches(&self, kind: FilterKind, subject: &str, requested_ops: Ops) -> bool {
        self.set(kind).matches(subject, requested_ops)
    }

    pub fn count(&self, kind: FilterKind) -> usize {
        self.set(kind).count()
    }

    /// Loads every kind's persisted entries, replacing in-memory state.
    pub fn restore_all(&self) {
        for set in self.sets.values() {
            set.restore();
        }
    }

    /// Tears down every kind's set. Idempotent.
    pub fn teardown(&self) {
        for set in self.sets.values() {
            set.teardown();
        }
    }
}

fn kind_key(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Filesystem => "filesystem",
        FilterKind::Registry => "registry",
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

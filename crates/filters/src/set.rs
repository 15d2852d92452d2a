// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single kind's ordered, lock-protected filter list — spec.md §4.A.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::warn;

use pm_core::{normalize_pattern, Clock, FilterEntry, FilterEntryError, FilterId, FilterKind, Ops};
use pm_core::TeardownFlag;
use pm_persist::{ConfigStore, FilterPersistenceBlob};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterSetError {
    #[error(transparent)]
    Entry(#[from] FilterEntryError),
    #[error("filter set is tearing down")]
    TornDown,
}

/// One kind's filter list: insertion-ordered `Vec<FilterEntry>` behind
/// a reader/writer lock, plus a teardown flag. `matches`/`list` take
/// the lock shared; `add`/`remove`/`restore` take it exclusive.
pub struct FilterSet {
    kind: FilterKind,
    key: String,
    clock: Arc<dyn Clock>,
    store: Arc<dyn ConfigStore>,
    entries: RwLock<Vec<FilterEntry>>,
    teardown: TeardownFlag,
    /// Perturbs the id seed across successive calls within the same
    /// wall-clock second so two adds in the same second don't collide
    /// by construction.
    seed_salt: AtomicU32,
}

impl FilterSet {
    pub fn new(
        kind: FilterKind,
        key: impl Into<String>,
        clock: Arc<dyn Clock>,
        store: Arc<dyn ConfigStore>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            clock,
            store,
            entries: RwLock::new(Vec::new()),
            teardown: TeardownFlag::new(),
            seed_salt: AtomicU32::new(0),
        }
    }

    /// Appends a new entry with a pseudo-randomly chosen, non-zero,
    /// currently-unused id. Returns the assigned id.
    pub fn add(&self, pattern: &str, ops: Ops) -> Result<FilterId, FilterSetError> {
        let pattern = normalize_pattern(pattern)?;
        if self.teardown.is_set() {
            return Err(FilterSetError::TornDown);
        }

        let mut entries = self.entries.write();
        if self.teardown.is_set() {
            return Err(FilterSetError::TornDown);
        }

        let id = self.next_id(&entries);
        entries.push(FilterEntry {
            id,
            kind: self.kind,
            pattern,
            ops,
        });
        drop(entries);
        self.persist();
        Ok(id)
    }

    fn next_id(&self, entries: &[FilterEntry]) -> FilterId {
        let mut seed = self
            .clock
            .now_secs()
            .wrapping_add(self.seed_salt.fetch_add(1, Ordering::Relaxed) as u64)
            .max(1);
        loop {
            seed = xorshift64(seed);
            let candidate = (seed as u32) | 1; // never zero
            if !entries.iter().any(|e| e.id.get() == candidate) {
                if let Some(id) = FilterId::new(candidate) {
                    return id;
                }
            }
        }
    }

    /// Removes the entry with the given id. Returns whether anything
    /// was removed.
    pub fn remove(&self, id: FilterId) -> bool {
        if self.teardown.is_set() {
            return false;
        }
        let mut entries = self.entries.write();
        if self.teardown.is_set() {
            return false;
        }
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        drop(entries);
        if removed {
            self.persist();
        }
        removed
    }

    /// Up to `max` entries starting at `skip`, in insertion order.
    pub fn list(&self, skip: usize, max: usize) -> Vec<FilterEntry> {
        if self.teardown.is_set() {
            return Vec::new();
        }
        self.entries
            .read()
            .iter()
            .skip(skip)
            .take(max)
            .cloned()
            .collect()
    }

    /// Total number of entries currently held, for `GET_GLOBAL_SIZES`.
    pub fn count(&self) -> usize {
        if self.teardown.is_set() {
            return 0;
        }
        self.entries.read().len()
    }

    /// True if any entry whose ops overlap `requested_ops` has
    /// `pattern` as a case-insensitive substring of `subject`.
    ///
    /// The subject is copied into a bounded buffer before matching,
    /// truncated at `MAX_FILTER_PATTERN_LEN` code points — the same
    /// `wcsncpy_s(..., MAX_PATH)` truncation `StringFilters::MatchesFilter`
    /// applies in the original kernel source, so a subject longer than
    /// `MAX_PATH` can evade a filter the same way it does there.
    pub fn matches(&self, subject: &str, requested_ops: Ops) -> bool {
        if self.teardown.is_set() {
            return false;
        }
        let subject: String = subject
            .to_lowercase()
            .chars()
            .take(pm_core::MAX_FILTER_PATTERN_LEN)
            .collect();
        self.entries
            .read()
            .iter()
            .any(|e| e.ops.intersects(requested_ops) && subject.contains(&e.pattern))
    }

    /// Writes the full current entry list to the configured store.
    /// Logged, non-fatal on failure — the in-memory set stays
    /// authoritative either way.
    fn persist(&self) {
        let blob = FilterPersistenceBlob::new(self.entries.read().clone());
        match blob.encode() {
            Ok(bytes) => {
                if let Err(e) = self.store.save(&self.key, &bytes) {
                    warn!(key = %self.key, error = %e, "failed to persist filter set");
                }
            }
            Err(e) => warn!(key = %self.key, error = %e, "failed to encode filter set"),
        }
    }

    /// Loads entries from the configured store, replacing the
    /// in-memory list wholesale. A missing key or decode failure is
    /// logged and leaves the current in-memory set untouched.
    pub fn restore(&self) {
        if self.teardown.is_set() {
            return;
        }
        let mut entries = self.entries.write();
        if self.teardown.is_set() {
            return;
        }
        match self.store.load(&self.key) {
            Ok(Some(bytes)) => match FilterPersistenceBlob::decode(&bytes) {
                Ok(blob) => *entries = blob.entries,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "failed to decode persisted filter blob")
                }
            },
            Ok(None) => {}
            Err(e) => warn!(key = %self.key, error = %e, "failed to load persisted filter blob"),
        }
    }

    /// Marks this set as tearing down, drains outstanding readers by
    /// acquiring the writer lock once, then drops the stored entries.
    /// Every operation after this is a no-op.
    pub fn teardown(&self) {
        self.teardown.mark();
        self.entries.write().clear();
    }
}

fn xorshift64(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;

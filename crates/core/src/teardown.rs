// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The "mark tearing-down, drain, drop" pattern from spec.md §9,
//! shared by every component that owns a teardown flag (the filter
//! set, the alert queue, the process/image history).

use std::sync::atomic::{AtomicBool, Ordering};

/// One-way flag: once set, stays set. Every operation on a
/// teardown-aware component checks this at entry and short-circuits
/// to a no-op/empty result if it is set.
#[derive(Debug, Default)]
pub struct TeardownFlag(AtomicBool);

impl TeardownFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// True once `mark` has been called; never reverts to false.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the component as tearing down. Callers should follow this
    /// with one exclusive-lock acquire/release cycle to drain any
    /// reader that started before the mark, then drop storage.
    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "teardown_tests.rs"]
mod tests;

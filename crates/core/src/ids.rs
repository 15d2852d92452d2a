// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// An OS process id. Reused by the OS across process lifetimes, so it
/// is never a primary key on its own — see [`LifetimeKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pid(pub u32);

impl Pid {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Pid {
    fn from(v: u32) -> Self {
        Pid(v)
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique, non-zero identifier for a [`crate::FilterEntry`] within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterId(NonZeroU32);

impl FilterId {
    /// Wrap a raw value, rejecting zero (the spec reserves 0 for "no id").
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(FilterId)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair `(pid, epoch_seconds)` that unambiguously identifies a
/// process record across PID reuse (glossary: "lifetime key").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifetimeKey {
    pub pid: Pid,
    pub epoch_seconds: u64,
}

impl LifetimeKey {
    pub fn new(pid: Pid, epoch_seconds: u64) -> Self {
        Self { pid, epoch_seconds }
    }
}

impl std::fmt::Display for LifetimeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.pid, self.epoch_seconds)
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;

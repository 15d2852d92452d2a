// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filter data model — spec.md §3 "FilterEntry"/"FilterSet".

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::ids::FilterId;
use crate::limits::MAX_FILTER_PATTERN_LEN;

/// Subject domain a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Filesystem,
    Registry,
}

bitflags! {
    /// Operation classes a filter can be qualified for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Ops: u32 {
        const DELETE = 0b001;
        const WRITE = 0b010;
        const EXECUTE = 0b100;
    }
}

/// A single operator-supplied filter. Never mutated in place; removal
/// is by id, never by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub id: FilterId,
    pub kind: FilterKind,
    /// Lowercased at ingest time, bounded to `MAX_FILTER_PATTERN_LEN`.
    pub pattern: String,
    pub ops: Ops,
}

/// Errors constructing a [`FilterEntry`] outside of the registry that
/// owns id assignment (used by persistence restore, which reads
/// already-assigned ids back off disk).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterEntryError {
    #[error("filter pattern must not be empty")]
    EmptyPattern,
}

/// Normalize a raw pattern the way the spec requires at ingest time:
/// lowercase, truncated to `MAX_FILTER_PATTERN_LEN` code points,
/// rejected if empty.
pub fn normalize_pattern(raw: &str) -> Result<String, FilterEntryError> {
    if raw.is_empty() {
        return Err(FilterEntryError::EmptyPattern);
    }
    let lowered: String = raw.chars().take(MAX_FILTER_PATTERN_LEN).collect();
    let lowered = lowered.to_lowercase();
    if lowered.is_empty() {
        return Err(FilterEntryError::EmptyPattern);
    }
    Ok(lowered)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

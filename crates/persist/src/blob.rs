// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FilterPersistenceBlob — spec.md §3/§6.

use serde::{Deserialize, Serialize};

use pm_core::FilterEntry;

/// `{ count, entries }` — the durable representation of one kind's
/// filter set. The wire/byte layout in the original kernel source is
/// a fixed-size header plus a trailing array-of-`count`; here that's
/// just a JSON document, but the shape is kept explicit (rather than
/// serializing a bare `Vec<FilterEntry>`) so the "opaque blob keyed by
/// count" structure from spec.md §6 is visible in the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPersistenceBlob {
    pub count: u32,
    pub entries: Vec<FilterEntry>,
}

impl FilterPersistenceBlob {
    pub fn new(entries: Vec<FilterEntry>) -> Self {
        Self {
            count: entries.len() as u32,
            entries,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
#[path = "blob_tests.rs"]
mod tests;

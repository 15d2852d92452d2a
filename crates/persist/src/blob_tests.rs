// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pm_core::{FilterId, FilterKind, Ops};

fn sample_entry(id: u32) -> FilterEntry {
    FilterEntry {
        id: FilterId::new(id).unwrap(),
        kind: FilterKind::Filesystem,
        pattern: "preventdelete".into(),
        ops: Ops::DELETE,
    }
}

#[test]
fn count_tracks_entries_len() {
    let blob = FilterPersistenceBlob::new(vec![sample_entry(1), sample_entry(2)]);
    assert_eq!(blob.count, 2);
}

#[test]
fn round_trips_through_encode_decode() {
    let blob = FilterPersistenceBlob::new(vec![sample_entry(7)]);
    let bytes = blob.encode().unwrap();
    let restored = FilterPersistenceBlob::decode(&bytes).unwrap();
    assert_eq!(blob, restored);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn normalize_lowercases() {
    assert_eq!(normalize_pattern("PreventDelete").unwrap(), "preventdelete");
}

#[test]
fn normalize_rejects_empty() {
    assert_eq!(normalize_pattern(""), Err(FilterEntryError::EmptyPattern));
}

#[test]
fn normalize_truncates_to_bound() {
    let long = "a".repeat(MAX_FILTER_PATTERN_LEN + 50);
    let normalized = normalize_pattern(&long).unwrap();
    assert_eq!(normalized.chars().count(), MAX_FILTER_PATTERN_LEN);
}

#[test]
fn ops_union_selects_either_class() {
    let ops = Ops::DELETE | Ops::WRITE;
    assert!(ops.contains(Ops::DELETE));
    assert!(ops.contains(Ops::WRITE));
    assert!(!ops.contains(Ops::EXECUTE));
}

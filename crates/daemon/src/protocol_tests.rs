// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pm_core::{FilterId, FilterKind, Ops};

use super::*;

#[test]
fn request_round_trips_through_json() {
    let request = Request::AddFilter { kind: FilterKind::Filesystem, ops: Ops::WRITE, pattern: "secret.db".to_string() };
    let json = serde_json::to_string(&request).unwrap();
    let decoded: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(request, decoded);
}

#[test]
fn tagged_request_uses_the_type_field() {
    let json = serde_json::to_string(&Request::AlertsQueued).unwrap();
    assert!(json.contains("\"type\":\"AlertsQueued\""));
}

#[test]
fn error_kind_serializes_snake_case() {
    let json = serde_json::to_string(&ErrorKind::InsufficientResources).unwrap();
    assert_eq!(json, "\"insufficient_resources\"");
}

#[test]
fn lifetime_key_combines_pid_and_epoch() {
    let key = Request::lifetime_key(200, 1_700_000_000);
    assert_eq!(key.pid.get(), 200);
    assert_eq!(key.epoch_seconds, 1_700_000_000);
}

#[test]
fn filter_id_rejects_the_reserved_zero_sentinel() {
    assert!(filter_id(0).is_err());
    assert_eq!(filter_id(42).unwrap(), FilterId::new(42).unwrap());
}

#[test]
fn max_filter_list_page_matches_the_spec_bound() {
    assert_eq!(MAX_FILTER_LIST_PAGE, 10);
}

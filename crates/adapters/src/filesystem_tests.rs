// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use pm_alerts::AlertQueue;
use pm_core::{FakeClock, FilterKind, Ops};
use pm_filters::FilterRegistry;
use pm_persist::InMemoryStore;
use pm_stackwalk::{FakeFrameSource, FakeMemoryQuery};

use super::*;

fn build() -> (
    FilesystemAdapter<FakeFrameSource, FakeMemoryQuery>,
    Arc<FilterRegistry>,
    Arc<AlertQueue>,
) {
    let clock = Arc::new(FakeClock::new(1_000));
    let store = Arc::new(InMemoryStore::new());
    let filters = Arc::new(FilterRegistry::new(clock, store));
    let walker = Arc::new(StackWalker::new(FakeFrameSource::new(vec![0x1000]), FakeMemoryQuery::new()));
    let queue = Arc::new(AlertQueue::new());
    let detection = Arc::new(DetectionLogic::new(queue.clone(), FakeMemoryQuery::new()));
    let adapter = FilesystemAdapter::new(filters.clone(), walker, detection);
    (adapter, filters, queue)
}

#[test]
fn allows_kernel_originated_writes_unconditionally() {
    let (adapter, filters, queue) = build();
    filters.add(FilterKind::Filesystem, "c:\\secrets\\", Ops::WRITE).unwrap();
    let decision = adapter.on_write(OperationContext::kernel_mode(), Pid(1), "caller.exe", "C:\\secrets\\a.txt");
    assert_eq!(decision, AdapterDecision::Allow);
    assert!(queue.is_empty());
}

#[test]
fn allows_non_matching_writes() {
    let (adapter, _filters, queue) = build();
    let decision = adapter.on_write(OperationContext::user_mode(), Pid(1), "caller.exe", "C:\\other\\a.txt");
    assert_eq!(decision, AdapterDecision::Allow);
    assert!(queue.is_empty());
}

#[test]
fn denies_and_alerts_on_matching_write() {
    let (adapter, filters, queue) = build();
    filters.add(FilterKind::Filesystem, "c:\\secrets\\", Ops::WRITE).unwrap();
    let decision = adapter.on_write(OperationContext::user_mode(), Pid(7), "caller.exe", "C:\\secrets\\a.txt");
    assert_eq!(decision, AdapterDecision::Deny);
    assert_eq!(queue.len(), 1);
}

#[test]
fn create_execute_checks_execute_ops_not_write() {
    let (adapter, filters, queue) = build();
    filters.add(FilterKind::Filesystem, "c:\\secrets\\", Ops::WRITE).unwrap();
    let decision = adapter.on_create_execute(OperationContext::user_mode(), Pid(7), "caller.exe", "C:\\secrets\\a.exe");
    assert_eq!(decision, AdapterDecision::Allow);
    assert!(queue.is_empty());
}

#[test]
fn delete_on_close_matches_delete_ops() {
    let (adapter, filters, queue) = build();
    filters.add(FilterKind::Filesystem, "c:\\secrets\\", Ops::DELETE).unwrap();
    let decision = adapter.on_create_delete_on_close(OperationContext::user_mode(), Pid(7), "caller.exe", "C:\\secrets\\a.txt");
    assert_eq!(decision, AdapterDecision::Deny);
    assert_eq!(queue.len(), 1);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The top-level engine value — spec.md §9's re-architecture guidance
//! for the source's class-static filter driver, registry driver,
//! history, and guard: one owned value instead of global state.

use std::sync::Arc;

use pm_adapters::{AdapterDecision, FilesystemAdapter, ImageAdapter, OperationContext, ProcessAdapter, RegistryAdapter, ThreadAdapter};
use pm_alerts::{AlertQueue, DetectionLogic};
use pm_core::{Alert, Clock, FilterEntry, FilterId, FilterKind, LifetimeKey, Ops, Pid, StackFrame};
use pm_filters::FilterRegistry;
use pm_guard::{AccessMask, ProtectedProcessGuard};
use pm_history::{History, ImageDetailed, ImageResolver, ParentInfoResolver, ProcessDetailed, ProcessSizes, ProcessSummary};
use pm_persist::ConfigStore;
use pm_stackwalk::{FrameSource, MemoryQuery, StackWalker};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

type SharedFrames = Arc<dyn FrameSource>;
type SharedMemory = Arc<dyn MemoryQuery>;

/// `GET_GLOBAL_SIZES`'s response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSizes {
    pub process_count: usize,
    pub fs_filter_count: usize,
    pub reg_filter_count: usize,
}

/// Owns one instance each of (A)/(B)/(C)/(E)/(G), wired into (F)'s
/// adapters, and exposes the operations (H)'s control surface
/// dispatches against.
pub struct Engine {
    filters: Arc<FilterRegistry>,
    history: Arc<History>,
    alerts: Arc<AlertQueue>,
    guard: Arc<ProtectedProcessGuard>,
    filesystem: FilesystemAdapter<SharedFrames, SharedMemory>,
    registry: RegistryAdapter<SharedFrames, SharedMemory>,
    process: ProcessAdapter<SharedMemory>,
    image: ImageAdapter,
    thread: ThreadAdapter<SharedFrames, SharedMemory>,
}

impl Engine {
    pub fn new(
        clock: Arc<dyn Clock>,
        store: Arc<dyn ConfigStore>,
        frames: SharedFrames,
        memory: SharedMemory,
        image_resolver: Arc<dyn ImageResolver>,
        parent_info: Arc<dyn ParentInfoResolver>,
    ) -> Self {
        let filters = Arc::new(FilterRegistry::new(clock.clone(), store));
        let history = Arc::new(History::new(clock, image_resolver, parent_info));
        let alerts = Arc::new(AlertQueue::new());
        let guard = Arc::new(ProtectedProcessGuard::new());
        let walker = Arc::new(StackWalker::new(frames, memory.clone()));
        let detection = Arc::new(DetectionLogic::new(alerts.clone(), memory));

        let filesystem = FilesystemAdapter::new(filters.clone(), walker.clone(), detection.clone());
        let registry = RegistryAdapter::new(filters.clone(), walker.clone(), detection.clone());
        let process = ProcessAdapter::new(history.clone(), detection.clone());
        let image = ImageAdapter::new(history.clone());
        let thread = ThreadAdapter::new(walker, detection);

        Self {
            filters,
            history,
            alerts,
            guard,
            filesystem,
            registry,
            process,
            image,
            thread,
        }
    }

    /// Loads every kind's persisted filters, replacing in-memory
    /// state — the startup half of spec.md §6's persistent filter
    /// store layout.
    pub fn restore_filters(&self) {
        self.filters.restore_all();
    }

    /// Wires every collaborator's canned double together for
    /// deterministic end-to-end tests — the one-call constructor the
    /// workspace's `tests/specs.rs` scenarios use instead of hand-
    /// assembling a fake `Engine::new` call each time.
    #[cfg(any(test, feature = "test-support"))]
    pub fn for_testing(
        image_resolver: pm_history::FakeImageResolver,
        parent_info: pm_history::FakeParentInfoResolver,
        frame_source: pm_stackwalk::FakeFrameSource,
        memory_query: pm_stackwalk::FakeMemoryQuery,
    ) -> Self {
        Self::new(
            Arc::new(pm_core::FakeClock::default()),
            Arc::new(pm_persist::InMemoryStore::new()),
            Arc::new(frame_source),
            Arc::new(memory_query),
            Arc::new(image_resolver),
            Arc::new(parent_info),
        )
    }

    // ---- (F) event adapters ----

    pub fn on_filesystem_create_delete_on_close(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.filesystem.on_create_delete_on_close(ctx, caller_pid, caller_path, subject_path)
    }

    pub fn on_filesystem_create_execute(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.filesystem.on_create_execute(ctx, caller_pid, caller_path, subject_path)
    }

    pub fn on_filesystem_write(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.filesystem.on_write(ctx, caller_pid, caller_path, subject_path)
    }

    pub fn on_filesystem_set_disposition(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.filesystem.on_set_disposition(ctx, caller_pid, caller_path, subject_path)
    }

    pub fn on_registry_pre_set_value(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, key_name: &str, value_name: &str) -> AdapterDecision {
        self.registry.on_pre_set_value(ctx, caller_pid, caller_path, key_name, value_name)
    }

    pub fn on_registry_pre_delete_value(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, key_name: &str, value_name: &str) -> AdapterDecision {
        self.registry.on_pre_delete_value(ctx, caller_pid, caller_path, key_name, value_name)
    }

    pub fn on_process_create(&self, pid: Pid, parent_pid: Pid, caller_pid: Pid, caller_path: &str, creation_stack: Vec<StackFrame>) -> bool {
        self.process.on_process_create(pid, parent_pid, caller_pid, caller_path, creation_stack)
    }

    pub fn on_process_exit(&self, pid: Pid) -> bool {
        self.process.on_process_exit(pid)
    }

    pub fn on_image_load(&self, pid: Pid, full_path: String, load_stack: Vec<StackFrame>) -> bool {
        self.image.on_image_load(pid, full_path, load_stack)
    }

    pub fn on_thread_create(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, target_pid: Pid, target_path: &str, start_address: u64) {
        self.thread.on_thread_create(ctx, caller_pid, caller_path, target_pid, target_path, start_address)
    }

    // ---- (G) protected-process guard ----

    pub fn update_protected_process(&self, pid: Pid) {
        self.guard.update(pid);
    }

    pub fn strip_terminate_if_needed(&self, object_owner: Pid, caller: Pid, desired_access: AccessMask) -> AccessMask {
        self.guard.strip_terminate_if_needed(object_owner, caller, desired_access)
    }

    // ---- (H) control surface ----

    pub fn alerts_queued(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn pop_alert(&self) -> Option<Alert> {
        self.alerts.pop()
    }

    pub fn get_processes(&self, skip: usize, max: usize) -> Vec<ProcessSummary> {
        self.history.history_summary(skip, max)
    }

    pub fn get_process_detailed(&self, key: LifetimeKey) -> Option<ProcessDetailed> {
        self.history.detailed(key)
    }

    pub fn get_image_detailed(&self, key: LifetimeKey, index: usize) -> Option<ImageDetailed> {
        self.history.image_detailed(key, index)
    }

    pub fn get_process_sizes(&self, key: LifetimeKey) -> Option<ProcessSizes> {
        self.history.sizes(key)
    }

    pub fn add_filter(&self, kind: FilterKind, pattern: &str, ops: Ops) -> Result<FilterId, EngineError> {
        self.filters.add(kind, pattern, ops).map_err(EngineError::from)
    }

    pub fn list_filters(&self, kind: FilterKind, skip: usize, max: usize) -> Vec<FilterEntry> {
        self.filters.list(kind, skip, max)
    }

    pub fn delete_filter(&self, kind: FilterKind, id: FilterId) -> bool {
        self.filters.remove(kind, id)
    }

    pub fn get_global_sizes(&self) -> GlobalSizes {
        GlobalSizes {
            process_count: self.history.process_count(),
            fs_filter_count: self.filters.count(FilterKind::Filesystem),
            reg_filter_count: self.filters.count(FilterKind::Registry),
        }
    }

    /// One-way teardown of every owned component. The guard carries
    /// no internal lock to drain — it is a single atomic and needs no
    /// teardown step of its own.
    pub fn teardown(&self) {
        self.filters.teardown();
        self.history.teardown();
        self.alerts.teardown();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

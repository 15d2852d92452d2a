// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `History` — global process list plus the lookup/query operations
//! (H)'s control surface depends on. Spec.md §4.E and the lock
//! hierarchy from §5.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use pm_core::{Clock, LifetimeKey, Pid, StackFrame, TeardownFlag};

use crate::entry::{ImageRecord, ProcessEntry};
use crate::resolver::{ImageResolver, ParentInfoResolver};

/// Newest-first summary row for `history_summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub image_path: String,
    pub epoch_seconds: u64,
    pub terminated: bool,
}

/// One image, summarized by stack size rather than full frames — the
/// "truncated image list" `detailed` returns alongside the process's
/// own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub image_path: String,
    pub stack_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDetailed {
    pub pid: Pid,
    pub parent_pid: Pid,
    pub caller_pid: Pid,
    pub caller_path: Option<String>,
    pub parent_path: Option<String>,
    pub image_path: String,
    pub epoch_seconds: u64,
    pub terminated: bool,
    pub creation_stack: Vec<StackFrame>,
    pub images: Vec<ImageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetailed {
    pub image_path: String,
    pub load_stack: Vec<StackFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSizes {
    pub image_count: usize,
    pub stack_count: usize,
}

#[derive(Default)]
struct HistoryInner {
    records: Vec<Arc<ProcessEntry>>,
    by_pid: HashMap<Pid, Vec<usize>>,
}

impl HistoryInner {
    /// The index of the "most recent" record for a pid: the
    /// highest-index non-terminated record, else the highest index
    /// overall. Spec.md §3 "lookups by pid alone return the most
    /// recent non-terminated record".
    fn most_recent_index(&self, pid: Pid) -> Option<usize> {
        let indices = self.by_pid.get(&pid)?;
        indices
            .iter()
            .rev()
            .find(|&&i| !self.records[i].terminated())
            .or_else(|| indices.last())
            .copied()
    }

    fn exact_index(&self, key: LifetimeKey) -> Option<usize> {
        let indices = self.by_pid.get(&key.pid)?;
        indices
            .iter()
            .copied()
            .find(|&i| self.records[i].epoch_seconds == key.epoch_seconds)
    }
}

/// Owns the process list and every per-process image sub-list.
/// `history_lock` (this struct's internal `RwLock`) is always acquired
/// before any `ProcessEntry`'s own image lock, and released before it
/// — the per-process lock is taken only inside the narrow scope that
/// mutates that process's own images.
pub struct History {
    inner: RwLock<HistoryInner>,
    teardown: TeardownFlag,
    clock: Arc<dyn Clock>,
    image_resolver: Arc<dyn ImageResolver>,
    parent_info: Arc<dyn ParentInfoResolver>,
}

impl History {
    pub fn new(
        clock: Arc<dyn Clock>,
        image_resolver: Arc<dyn ImageResolver>,
        parent_info: Arc<dyn ParentInfoResolver>,
    ) -> Self {
        Self {
            inner: RwLock::new(HistoryInner::default()),
            teardown: TeardownFlag::new(),
            clock,
            image_resolver,
            parent_info,
        }
    }

    /// Records a new process. Drops the insert entirely (no partial
    /// record) if the new process's own image path can't be resolved.
    /// Parent/caller paths are best-effort and may be absent.
    pub fn on_process_create(
        &self,
        pid: Pid,
        parent_pid: Pid,
        caller_pid: Pid,
        creation_stack: Vec<StackFrame>,
    ) -> bool {
        if self.teardown.is_set() {
            return false;
        }
        let Some(image_path) = self.image_resolver.resolve_image_path(pid) else {
            return false;
        };
        let parent_path = self.parent_info.resolve_path(parent_pid);
        let caller_path = self.parent_info.resolve_path(caller_pid);
        let epoch_seconds = self.clock.now_secs();

        let entry = Arc::new(ProcessEntry::new(
            pid,
            parent_pid,
            caller_pid,
            caller_path,
            parent_path,
            image_path,
            epoch_seconds,
            creation_stack,
        ));

        let mut inner = self.inner.write();
        if self.teardown.is_set() {
            return false;
        }
        let index = inner.records.len();
        inner.records.push(entry);
        inner.by_pid.entry(pid).or_default().push(index);
        true
    }

    /// Marks the most recent non-terminated record for `pid` as
    /// terminated. Returns whether a record was found.
    pub fn on_process_exit(&self, pid: Pid) -> bool {
        if self.teardown.is_set() {
            return false;
        }
        let inner = self.inner.read();
        if self.teardown.is_set() {
            return false;
        }
        match inner.most_recent_index(pid).map(|i| inner.records[i].clone()) {
            Some(entry) if !entry.terminated() => entry.mark_terminated(),
            _ => false,
        }
    }

    /// Appends a newly-loaded image to the most recent non-terminated
    /// record for `pid`. Returns whether a record was found; a missing
    /// record drops just the image, the process entry is untouched.
    pub fn on_image_load(&self, pid: Pid, full_path: String, load_stack: Vec<StackFrame>) -> bool {
        if self.teardown.is_set() {
            return false;
        }
        let inner = self.inner.read();
        if self.teardown.is_set() {
            return false;
        }
        let Some(entry) = inner
            .most_recent_index(pid)
            .map(|i| inner.records[i].clone())
            .filter(|e| !e.terminated())
        else {
            return false;
        };
        drop(inner);
        entry.push_image(ImageRecord { image_path: full_path, load_stack });
        true
    }

    /// Total number of process records ever inserted, terminated or
    /// not — the `process_count` field of `GET_GLOBAL_SIZES`.
    pub fn process_count(&self) -> usize {
        if self.teardown.is_set() {
            return 0;
        }
        self.inner.read().records.len()
    }

    /// Newest-first page of process summaries.
    pub fn history_summary(&self, skip: usize, max: usize) -> Vec<ProcessSummary> {
        if self.teardown.is_set() {
            return Vec::new();
        }
        self.inner
            .read()
            .records
            .iter()
            .rev()
            .skip(skip)
            .take(max)
            .map(|e| ProcessSummary {
                pid: e.pid,
                image_path: e.image_path.clone(),
                epoch_seconds: e.epoch_seconds,
                terminated: e.terminated(),
            })
            .collect()
    }

    /// Exact-match lookup by lifetime key.
    pub fn detailed(&self, key: LifetimeKey) -> Option<ProcessDetailed> {
        if self.teardown.is_set() {
            return None;
        }
        let inner = self.inner.read();
        if self.teardown.is_set() {
            return None;
        }
        let entry = inner.exact_index(key).map(|i| inner.records[i].clone())?;
        drop(inner);

        let images = entry
            .image_paths()
            .into_iter()
            .zip(entry.image_stack_counts())
            .map(|(image_path, stack_count)| ImageSummary { image_path, stack_count })
            .collect();

        Some(ProcessDetailed {
            pid: entry.pid,
            parent_pid: entry.parent_pid,
            caller_pid: entry.caller_pid,
            caller_path: entry.caller_path.clone(),
            parent_path: entry.parent_path.clone(),
            image_path: entry.image_path.clone(),
            epoch_seconds: entry.epoch_seconds,
            terminated: entry.terminated(),
            creation_stack: entry.creation_stack.clone(),
            images,
        })
    }

    /// The `index`-th image of the record identified by `key`.
    pub fn image_detailed(&self, key: LifetimeKey, index: usize) -> Option<ImageDetailed> {
        if self.teardown.is_set() {
            return None;
        }
        let inner = self.inner.read();
        if self.teardown.is_set() {
            return None;
        }
        let entry = inner.exact_index(key).map(|i| inner.records[i].clone())?;
        drop(inner);
        let image = entry.image_at(index)?;
        Some(ImageDetailed {
            image_path: image.image_path,
            load_stack: image.load_stack,
        })
    }

    /// `{image_count, stack_count}` for the record identified by
    /// `key`, so a caller can pre-allocate before fetching details.
    pub fn sizes(&self, key: LifetimeKey) -> Option<ProcessSizes> {
        if self.teardown.is_set() {
            return None;
        }
        let inner = self.inner.read();
        if self.teardown.is_set() {
            return None;
        }
        let entry = inner.exact_index(key).map(|i| inner.records[i].clone())?;
        drop(inner);
        Some(ProcessSizes {
            image_count: entry.image_count(),
            stack_count: entry.creation_stack.len(),
        })
    }

    /// Marks the history as tearing down. Every operation after this
    /// returns an empty/`None` result; outstanding readers that
    /// started before the mark still complete against the list as it
    /// was.
    pub fn teardown(&self) {
        self.teardown.mark();
        self.inner.write().records.clear();
        self.inner.write().by_pid.clear();
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;

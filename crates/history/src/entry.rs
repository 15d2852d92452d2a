// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ProcessRecord`/`ImageRecord` — spec.md §3.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use pm_core::{LifetimeKey, Pid, StackFrame};

/// One loaded image within a process, recorded the moment the image
/// notification fires.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub image_path: String,
    pub load_stack: Vec<StackFrame>,
}

/// One process's lifetime record. Owned by the global history; its
/// images are owned by this record and guarded by their own lock,
/// acquired only while mutating this record's own image list (never
/// held across a `history_lock` acquisition).
#[derive(Debug)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub parent_pid: Pid,
    pub caller_pid: Pid,
    pub caller_path: Option<String>,
    pub parent_path: Option<String>,
    pub image_path: String,
    pub epoch_seconds: u64,
    pub creation_stack: Vec<StackFrame>,
    terminated: AtomicBool,
    images: RwLock<Vec<ImageRecord>>,
}

impl ProcessEntry {
    pub fn new(
        pid: Pid,
        parent_pid: Pid,
        caller_pid: Pid,
        caller_path: Option<String>,
        parent_path: Option<String>,
        image_path: String,
        epoch_seconds: u64,
        creation_stack: Vec<StackFrame>,
    ) -> Self {
        Self {
            pid,
            parent_pid,
            caller_pid,
            caller_path,
            parent_path,
            image_path,
            epoch_seconds,
            creation_stack,
            terminated: AtomicBool::new(false),
            images: RwLock::new(Vec::new()),
        }
    }

    pub fn lifetime_key(&self) -> LifetimeKey {
        LifetimeKey::new(self.pid, self.epoch_seconds)
    }

    pub fn terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Write-once: flips false → true and reports whether this call
    /// was the one that did it.
    pub fn mark_terminated(&self) -> bool {
        self.terminated
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn push_image(&self, image: ImageRecord) {
        self.images.write().push(image);
    }

    pub fn image_count(&self) -> usize {
        self.images.read().len()
    }

    pub fn image_at(&self, index: usize) -> Option<ImageRecord> {
        self.images.read().get(index).cloned()
    }

    pub fn image_stack_counts(&self) -> Vec<usize> {
        self.images.read().iter().map(|i| i.load_stack.len()).collect()
    }

    pub fn image_paths(&self) -> Vec<String> {
        self.images.read().iter().map(|i| i.image_path.clone()).collect()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;

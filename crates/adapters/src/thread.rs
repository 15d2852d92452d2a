// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread create hook — spec.md §4.F/§4.D.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use pm_core::{AlertSource, Pid};
use pm_alerts::DetectionLogic;
use pm_stackwalk::{FrameSource, MemoryQuery, StackWalker};

use crate::context::OperationContext;

/// Audits new threads: the start address, the caller's stack, and the
/// cross-process predicate. The process's first thread (its own
/// entry thread, created by the loader) is never audited — only the
/// second and later threads of a process are. Kernel-originated
/// creations are allowed unconditionally and never audited, matching
/// `ThreadNotifyRoutine`'s `ExGetPreviousMode() == KernelMode` early
/// return.
pub struct ThreadAdapter<F: FrameSource, M: MemoryQuery> {
    walker: Arc<StackWalker<F, M>>,
    detection: Arc<DetectionLogic<M>>,
    thread_counts: Mutex<HashMap<Pid, u32>>,
}

impl<F: FrameSource, M: MemoryQuery> ThreadAdapter<F, M> {
    pub fn new(walker: Arc<StackWalker<F, M>>, detection: Arc<DetectionLogic<M>>) -> Self {
        Self {
            walker,
            detection,
            thread_counts: Mutex::new(HashMap::new()),
        }
    }

    /// `target_pid` is the process the new thread runs in;
    /// `caller_pid` is the process that requested its creation.
    pub fn on_thread_create(
        &self,
        ctx: OperationContext,
        caller_pid: Pid,
        caller_path: &str,
        target_pid: Pid,
        target_path: &str,
        start_address: u64,
    ) {
        if ctx.originates_in_kernel {
            return;
        }

        let ordinal = {
            let mut counts = self.thread_counts.lock();
            let count = counts.entry(target_pid).or_insert(0);
            *count += 1;
            *count
        };
        if ordinal < 2 {
            return;
        }

        self.detection
            .audit_pointer(AlertSource::ThreadCreate, caller_pid, caller_path, target_path, start_address);
        let stack = self.walker.walk(pm_core::MAX_STACK_RETURN_HISTORY);
        self.detection
            .audit_stack(AlertSource::ThreadCreate, caller_pid, caller_path, target_path, &stack);
        self.detection.audit_caller(
            AlertSource::ThreadCreate,
            caller_pid,
            caller_path,
            target_pid,
            target_path,
            stack,
        );
    }
}

#[cfg(test)]
#[path = "thread_tests.rs"]
mod tests;

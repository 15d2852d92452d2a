// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem event hooks — spec.md §4.F/§6.

use std::sync::Arc;

use pm_core::{AlertSource, FilterKind, Ops, Pid, MAX_STACK_RETURN_HISTORY};
use pm_alerts::DetectionLogic;
use pm_filters::FilterRegistry;
use pm_stackwalk::{FrameSource, MemoryQuery, StackWalker};

use crate::context::{AdapterDecision, OperationContext};

/// Wires (A)/(B)/(D) together for the four filesystem hooks spec.md
/// names: delete-on-close, create-for-execute, write, and explicit
/// disposition-set.
pub struct FilesystemAdapter<F: FrameSource, M: MemoryQuery> {
    filters: Arc<FilterRegistry>,
    walker: Arc<StackWalker<F, M>>,
    detection: Arc<DetectionLogic<M>>,
}

impl<F: FrameSource, M: MemoryQuery> FilesystemAdapter<F, M> {
    pub fn new(filters: Arc<FilterRegistry>, walker: Arc<StackWalker<F, M>>, detection: Arc<DetectionLogic<M>>) -> Self {
        Self { filters, walker, detection }
    }

    pub fn on_create_delete_on_close(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::DELETE, caller_pid, caller_path, subject_path)
    }

    pub fn on_create_execute(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::EXECUTE, caller_pid, caller_path, subject_path)
    }

    pub fn on_write(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::WRITE, caller_pid, caller_path, subject_path)
    }

    pub fn on_set_disposition(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::DELETE, caller_pid, caller_path, subject_path)
    }

    fn evaluate(&self, ctx: OperationContext, ops: Ops, caller_pid: Pid, caller_path: &str, subject_path: &str) -> AdapterDecision {
        if ctx.originates_in_kernel {
            return AdapterDecision::Allow;
        }
        if !self.filters.matches(FilterKind::Filesystem, subject_path, ops) {
            return AdapterDecision::Allow;
        }
        let stack = self.walker.walk(MAX_STACK_RETURN_HISTORY);
        self.detection
            .report_filter_violation(AlertSource::FileMatch, caller_pid, caller_path, subject_path, stack);
        AdapterDecision::Deny
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detection logic — spec.md §4.D. Audits stacks and pointers,
//! constructs typed alerts, and pushes them into the queue.

use pm_core::{Alert, AlertCommon, AlertSource, AlertType, Pid, StackFrame};
use pm_stackwalk::{resolve_frame, MemoryQuery};

use crate::queue::AlertQueue;

/// The user/kernel address-space split used by the `is_violation`
/// predicate on every 64-bit target this workspace runs on.
pub const USER_SPACE_CEILING: u64 = 0x0000_7FFF_FFFF_FFFF;

/// Audits stacks and pointers against (B)'s resolution and pushes
/// constructed alerts into (C).
pub struct DetectionLogic<M: MemoryQuery> {
    queue: std::sync::Arc<AlertQueue>,
    memory: M,
}

impl<M: MemoryQuery> DetectionLogic<M> {
    pub fn new(queue: std::sync::Arc<AlertQueue>, memory: M) -> Self {
        Self { queue, memory }
    }

    /// Scans `stack` for the first violating frame and emits at most
    /// one `StackViolation`, referencing that frame. Returns whether
    /// an alert was emitted.
    pub fn audit_stack(
        &self,
        source: AlertSource,
        source_pid: Pid,
        source_path: &str,
        target_path: &str,
        stack: &[StackFrame],
    ) -> bool {
        let Some(violating) = stack.iter().find(|f| f.is_violation(USER_SPACE_CEILING)) else {
            return false;
        };
        let mut alert = Alert::StackViolation {
            common: self.common(source, AlertType::ManualMappedCode, source_pid, source_path, target_path),
            violating_address: violating.raw_address,
            stack: stack.to_vec(),
        };
        alert.finalize_size();
        self.queue.push(alert);
        true
    }

    /// Resolves `pointer` via (B) and applies the same violation
    /// predicate to the single resulting frame.
    pub fn audit_pointer(
        &self,
        source: AlertSource,
        source_pid: Pid,
        source_path: &str,
        target_path: &str,
        pointer: u64,
    ) -> bool {
        let frame = resolve_frame(&self.memory, pointer);
        if !frame.is_violation(USER_SPACE_CEILING) {
            return false;
        }
        let mut alert = Alert::StackViolation {
            common: self.common(source, AlertType::ManualMappedCode, source_pid, source_path, target_path),
            violating_address: pointer,
            stack: vec![frame],
        };
        alert.finalize_size();
        self.queue.push(alert);
        true
    }

    /// Emits a `RemoteOperation` alert if `caller_pid` differs from
    /// `target_pid`. `alert_type` is `ParentProcessIdSpoofing` for
    /// `ProcessCreate`, `RemoteThreadCreation` for `ThreadCreate`.
    pub fn audit_caller(
        &self,
        source: AlertSource,
        caller_pid: Pid,
        caller_path: &str,
        target_pid: Pid,
        target_path: &str,
        stack: Vec<StackFrame>,
    ) -> bool {
        if caller_pid == target_pid {
            return false;
        }
        let alert_type = match source {
            AlertSource::ProcessCreate => AlertType::ParentProcessIdSpoofing,
            AlertSource::ThreadCreate => AlertType::RemoteThreadCreation,
            _ => AlertType::RemoteThreadCreation,
        };
        let mut alert = Alert::RemoteOperation {
            common: self.common(source, alert_type, caller_pid, caller_path, target_path),
            remote_target: target_pid,
            stack,
        };
        alert.finalize_size();
        self.queue.push(alert);
        true
    }

    /// Constructs and pushes a `FilterViolation` for a matched
    /// filesystem/registry operation.
    pub fn report_filter_violation(
        &self,
        source: AlertSource,
        caller_pid: Pid,
        caller_path: &str,
        violating_path: &str,
        stack: Vec<StackFrame>,
    ) {
        let mut alert = Alert::FilterViolation {
            common: self.common(source, AlertType::FilterViolation, caller_pid, caller_path, violating_path),
            stack,
        };
        alert.finalize_size();
        self.queue.push(alert);
    }

    fn common(
        &self,
        source: AlertSource,
        alert_type: AlertType,
        source_pid: Pid,
        source_path: &str,
        target_path: &str,
    ) -> AlertCommon {
        AlertCommon {
            size_bytes: 0,
            source,
            alert_type,
            source_pid,
            source_path: source_path.to_string(),
            target_path: target_path.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "detection_tests.rs"]
mod tests;

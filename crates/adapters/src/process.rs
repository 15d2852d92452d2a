// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process create/exit hooks — spec.md §4.F/§4.E.

use std::sync::Arc;

use pm_core::{AlertSource, Pid, StackFrame};
use pm_alerts::DetectionLogic;
use pm_history::History;
use pm_stackwalk::MemoryQuery;

/// Wires (E)'s process bookkeeping together with (D)'s parent-pid
/// spoofing check.
pub struct ProcessAdapter<M: MemoryQuery> {
    history: Arc<History>,
    detection: Arc<DetectionLogic<M>>,
}

impl<M: MemoryQuery> ProcessAdapter<M> {
    pub fn new(history: Arc<History>, detection: Arc<DetectionLogic<M>>) -> Self {
        Self { history, detection }
    }

    /// Records the new process, then audits whether the claimed parent
    /// matches the actual calling process — a mismatch is the parent
    /// process id spoofing technique spec.md §4.D names.
    pub fn on_process_create(
        &self,
        pid: Pid,
        parent_pid: Pid,
        caller_pid: Pid,
        caller_path: &str,
        creation_stack: Vec<StackFrame>,
    ) -> bool {
        let recorded = self
            .history
            .on_process_create(pid, parent_pid, caller_pid, creation_stack.clone());
        self.detection.audit_caller(
            AlertSource::ProcessCreate,
            caller_pid,
            caller_path,
            parent_pid,
            caller_path,
            creation_stack,
        );
        recorded
    }

    pub fn on_process_exit(&self, pid: Pid) -> bool {
        self.history.on_process_exit(pid)
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

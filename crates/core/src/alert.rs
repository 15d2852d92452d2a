// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert data model — spec.md §3 "Alert (tagged)".

use serde::{Deserialize, Serialize};

use crate::ids::Pid;
use crate::stack::StackFrame;

/// Which event class produced this alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    ProcessCreate,
    ImageLoad,
    RegistryMatch,
    FileMatch,
    ThreadCreate,
}

/// Fine-grained classification of the alert, orthogonal to the
/// variant it's attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    ManualMappedCode,
    FilterViolation,
    ParentProcessIdSpoofing,
    RemoteThreadCreation,
}

/// Fields common to every alert variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCommon {
    /// Exact serialized length of the enclosing [`Alert`], computed at
    /// construction time so a consumer can size a buffer without
    /// reading past the end (spec.md §4.D).
    pub size_bytes: usize,
    pub source: AlertSource,
    pub alert_type: AlertType,
    pub source_pid: Pid,
    pub source_path: String,
    pub target_path: String,
}

/// A detection, ready to be pushed onto the alert queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Alert {
    StackViolation {
        common: AlertCommon,
        violating_address: u64,
        stack: Vec<StackFrame>,
    },
    FilterViolation {
        common: AlertCommon,
        stack: Vec<StackFrame>,
    },
    RemoteOperation {
        common: AlertCommon,
        remote_target: Pid,
        stack: Vec<StackFrame>,
    },
}

impl Alert {
    pub fn common(&self) -> &AlertCommon {
        match self {
            Alert::StackViolation { common, .. }
            | Alert::FilterViolation { common, .. }
            | Alert::RemoteOperation { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut AlertCommon {
        match self {
            Alert::StackViolation { common, .. }
            | Alert::FilterViolation { common, .. }
            | Alert::RemoteOperation { common, .. } => common,
        }
    }

    /// Fills in `common.size_bytes` with the alert's own serialized
    /// length. Every constructor in `pm-alerts` builds with
    /// `size_bytes: 0` and calls this once construction is otherwise
    /// complete, since the length can only be known after the rest of
    /// the value exists.
    pub fn finalize_size(&mut self) {
        let size = size_of_alert(self);
        self.common_mut().size_bytes = size;
    }
}

/// Compute `size_bytes` for a constructed alert by round-tripping it
/// through the same JSON encoding the control surface uses on the
/// wire — the closest Rust analogue of "the exact allocated length"
/// a fixed-layout C struct would report for itself.
pub fn size_of_alert(alert: &Alert) -> usize {
    serde_json::to_vec(alert).map(|v| v.len()).unwrap_or(0)
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry event hooks — spec.md §4.F/§6.

use std::sync::Arc;

use pm_core::{AlertSource, FilterKind, Ops, Pid, MAX_STACK_RETURN_HISTORY};
use pm_alerts::DetectionLogic;
use pm_filters::FilterRegistry;
use pm_stackwalk::{FrameSource, MemoryQuery, StackWalker};

use crate::context::{AdapterDecision, OperationContext};

/// Joins a registry key path and value name into the single subject
/// string filters are matched against, the way the spec's `key\value`
/// pairing is represented on the wire.
pub fn canonicalize_registry_path(key_name: &str, value_name: &str) -> String {
    format!("{key_name}\\{value_name}")
}

/// Wires (A)/(B)/(D) together for registry pre-set/pre-delete hooks.
pub struct RegistryAdapter<F: FrameSource, M: MemoryQuery> {
    filters: Arc<FilterRegistry>,
    walker: Arc<StackWalker<F, M>>,
    detection: Arc<DetectionLogic<M>>,
}

impl<F: FrameSource, M: MemoryQuery> RegistryAdapter<F, M> {
    pub fn new(filters: Arc<FilterRegistry>, walker: Arc<StackWalker<F, M>>, detection: Arc<DetectionLogic<M>>) -> Self {
        Self { filters, walker, detection }
    }

    pub fn on_pre_set_value(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, key_name: &str, value_name: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::WRITE, caller_pid, caller_path, key_name, value_name)
    }

    pub fn on_pre_delete_value(&self, ctx: OperationContext, caller_pid: Pid, caller_path: &str, key_name: &str, value_name: &str) -> AdapterDecision {
        self.evaluate(ctx, Ops::DELETE, caller_pid, caller_path, key_name, value_name)
    }

    fn evaluate(&self, ctx: OperationContext, ops: Ops, caller_pid: Pid, caller_path: &str, key_name: &str, value_name: &str) -> AdapterDecision {
        if ctx.originates_in_kernel {
            return AdapterDecision::Allow;
        }
        let subject = canonicalize_registry_path(key_name, value_name);
        if !self.filters.matches(FilterKind::Registry, &subject, ops) {
            return AdapterDecision::Allow;
        }
        let stack = self.walker.walk(MAX_STACK_RETURN_HISTORY);
        self.detection
            .report_filter_violation(AlertSource::RegistryMatch, caller_pid, caller_path, &subject, stack);
        AdapterDecision::Deny
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

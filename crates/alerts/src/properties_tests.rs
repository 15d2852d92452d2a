// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pm_core::{AlertCommon, AlertSource, AlertType, Pid, StackFrame};
use pm_stackwalk::FakeMemoryQuery;
use proptest::prelude::*;

use crate::detection::DetectionLogic;
use crate::queue::AlertQueue;

fn tagged_alert(tag: u32) -> pm_core::Alert {
    pm_core::Alert::FilterViolation {
        common: AlertCommon {
            size_bytes: 0,
            source: AlertSource::FileMatch,
            alert_type: AlertType::FilterViolation,
            source_pid: Pid(tag),
            source_path: String::new(),
            target_path: String::new(),
        },
        stack: vec![],
    }
}

proptest! {
    // Property 5: FIFO alert ordering.
    #[test]
    fn pop_sequence_matches_push_sequence(tags in prop::collection::vec(0u32..1000, 0..50)) {
        let queue = AlertQueue::new();
        for &tag in &tags {
            queue.push(tagged_alert(tag));
        }
        let mut popped = Vec::new();
        while let Some(alert) = queue.pop() {
            popped.push(alert.common().source_pid.get());
        }
        prop_assert_eq!(popped, tags);
    }

    // Property 6: stack-violation predicate.
    #[test]
    fn audit_stack_fires_iff_a_violating_frame_exists(
        in_module_count in 0usize..5,
        has_violation in any::<bool>(),
    ) {
        let queue = std::sync::Arc::new(AlertQueue::new());
        let logic = DetectionLogic::new(queue.clone(), FakeMemoryQuery::new());

        let mut stack: Vec<StackFrame> = (0..in_module_count)
            .map(|i| StackFrame::in_module(0x1000 + i as u64, "a.dll", i as u64))
            .collect();
        if has_violation {
            stack.push(StackFrame::unbacked_executable(0x9999));
        }

        let emitted = logic.audit_stack(AlertSource::ThreadCreate, Pid(1), "a", "b", &stack);
        prop_assert_eq!(emitted, has_violation);
        prop_assert_eq!(queue.len(), if has_violation { 1 } else { 0 });
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn common() -> AlertCommon {
    AlertCommon {
        size_bytes: 0,
        source: AlertSource::FileMatch,
        alert_type: AlertType::FilterViolation,
        source_pid: Pid(100),
        source_path: "C:\\evil.exe".into(),
        target_path: "C:\\protected.txt".into(),
    }
}

#[test]
fn common_accessor_unwraps_every_variant() {
    let a = Alert::FilterViolation {
        common: common(),
        stack: vec![],
    };
    let b = Alert::StackViolation {
        common: common(),
        violating_address: 0x1234,
        stack: vec![],
    };
    let c = Alert::RemoteOperation {
        common: common(),
        remote_target: Pid(200),
        stack: vec![],
    };
    assert_eq!(a.common().source, AlertSource::FileMatch);
    assert_eq!(b.common().source, AlertSource::FileMatch);
    assert_eq!(c.common().source, AlertSource::FileMatch);
}

#[test]
fn size_of_alert_is_nonzero_and_grows_with_stack() {
    let small = Alert::FilterViolation {
        common: common(),
        stack: vec![],
    };
    let big = Alert::FilterViolation {
        common: common(),
        stack: vec![StackFrame::in_module(0x1000, "a.dll", 0x10)],
    };
    assert!(size_of_alert(&small) > 0);
    assert!(size_of_alert(&big) > size_of_alert(&small));
}

#[test]
fn finalize_size_fills_in_the_alert_s_own_serialized_length() {
    let mut alert = Alert::FilterViolation {
        common: common(),
        stack: vec![],
    };
    assert_eq!(alert.common().size_bytes, 0);
    alert.finalize_size();
    assert_eq!(alert.common().size_bytes, size_of_alert(&alert));
    assert!(alert.common().size_bytes > 0);
}

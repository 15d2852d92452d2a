// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const CEILING: u64 = 0x0000_7FFF_FFFF_FFFF;

#[test]
fn in_module_frame_never_violates() {
    let frame = StackFrame::in_module(0x1000, "ntdll.dll", 0x10);
    assert!(!frame.is_violation(CEILING));
}

#[test]
fn unbacked_executable_frame_violates() {
    let frame = StackFrame::unbacked_executable(0x2000);
    assert!(frame.is_violation(CEILING));
}

#[test]
fn null_address_never_violates() {
    let frame = StackFrame::unbacked_executable(0);
    assert!(!frame.is_violation(CEILING));
}

#[test]
fn above_ceiling_never_violates() {
    let frame = StackFrame::unbacked_executable(CEILING + 1);
    assert!(!frame.is_violation(CEILING));
}

#[test]
fn non_executable_unbacked_frame_never_violates() {
    let frame = StackFrame::unresolved(0x3000);
    assert!(!frame.is_violation(CEILING));
}

#[test]
fn module_path_is_truncated() {
    let long = "x".repeat(MAX_MODULE_PATH_LEN + 10);
    let frame = StackFrame::in_module(0x1000, long, 0);
    assert_eq!(frame.module_path.chars().count(), MAX_MODULE_PATH_LEN);
}

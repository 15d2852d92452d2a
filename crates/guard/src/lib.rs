// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pm-guard: the protected-process handle-access guard — spec.md
//! §4.G.

use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use pm_core::Pid;

bitflags! {
    /// Rights requested on a handle-create/duplicate operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AccessMask: u32 {
        const TERMINATE = 0b0000_0001;
        const READ = 0b0000_0010;
        const WRITE = 0b0000_0100;
        const SUSPEND_RESUME = 0b0000_1000;
        const VM_OPERATION = 0b0001_0000;
    }
}

/// Tracks which single pid is currently "the protected process" and
/// strips `TERMINATE` from any handle another process opens to it.
///
/// `0` means "no process is protected" — the spec's own sentinel for
/// an unset protected pid, carried forward instead of an `Option` so
/// the single atomic store in `update` stays a plain store with no
/// extra synchronization.
pub struct ProtectedProcessGuard {
    protected_pid: AtomicU32,
}

impl Default for ProtectedProcessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtectedProcessGuard {
    pub fn new() -> Self {
        Self {
            protected_pid: AtomicU32::new(0),
        }
    }

    pub fn update(&self, pid: Pid) {
        self.protected_pid.store(pid.get(), Ordering::Release);
    }

    pub fn protected_pid(&self) -> Option<Pid> {
        match self.protected_pid.load(Ordering::Acquire) {
            0 => None,
            raw => Some(Pid(raw)),
        }
    }

    /// Removes `TERMINATE` from `desired_access` when `object_owner`
    /// is the protected process and `caller` is a different process;
    /// otherwise returns `desired_access` unchanged.
    pub fn strip_terminate_if_needed(
        &self,
        object_owner: Pid,
        caller: Pid,
        desired_access: AccessMask,
    ) -> AccessMask {
        if self.protected_pid() == Some(object_owner) && caller != object_owner {
            desired_access - AccessMask::TERMINATE
        } else {
            desired_access
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

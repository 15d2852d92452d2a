// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `walk`/`resolve_single` — spec.md §4.B.

use pm_core::StackFrame;

use crate::frame_source::FrameSource;
use crate::memory_query::MemoryQuery;

/// Captures and resolves user-mode return addresses.
///
/// Only meaningful for user-mode-originated events; callers must not
/// invoke this for kernel-originated events (enforced at the call
/// site in the adapters that already distinguish the two).
pub struct StackWalker<F: FrameSource, M: MemoryQuery> {
    frames: F,
    memory: M,
}

impl<F: FrameSource, M: MemoryQuery> StackWalker<F, M> {
    pub fn new(frames: F, memory: M) -> Self {
        Self { frames, memory }
    }

    /// Captures up to `max_frames` return addresses and resolves each
    /// to a [`StackFrame`].
    pub fn walk(&self, max_frames: usize) -> Vec<StackFrame> {
        self.frames
            .capture_return_addresses(max_frames)
            .into_iter()
            .map(|address| self.resolve_single(address))
            .collect()
    }

    /// Resolves a single address without capturing a stack — used by
    /// pointer auditing.
    pub fn resolve_single(&self, address: u64) -> StackFrame {
        resolve_frame(&self.memory, address)
    }
}

/// Resolves one address to a [`StackFrame`] given just a memory query,
/// without needing a full [`StackWalker`] — the piece pointer auditing
/// (spec.md §4.D `audit_pointer`) reuses directly.
pub fn resolve_frame(memory: &dyn MemoryQuery, address: u64) -> StackFrame {
    let info = memory.resolve(address);
    if info.in_module {
        StackFrame::in_module(address, info.module_path, info.module_offset)
    } else if info.executable {
        StackFrame::unbacked_executable(address)
    } else {
        StackFrame::unresolved(address)
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;

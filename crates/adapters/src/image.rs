// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image load hook — spec.md §4.F/§4.E. No filter/detection
//! involvement; spec.md §1 scopes image loads out of filtering.

use std::sync::Arc;

use pm_core::{Pid, StackFrame};
use pm_history::History;

/// Thin wrapper over (E)'s image bookkeeping.
pub struct ImageAdapter {
    history: Arc<History>,
}

impl ImageAdapter {
    pub fn new(history: Arc<History>) -> Self {
        Self { history }
    }

    pub fn on_image_load(&self, pid: Pid, full_path: String, load_stack: Vec<StackFrame>) -> bool {
        self.history.on_image_load(pid, full_path, load_stack)
    }
}

#[cfg(test)]
#[path = "image_tests.rs"]
mod tests;

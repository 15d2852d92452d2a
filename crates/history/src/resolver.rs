// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS boundaries (E) needs: resolving a pid's own image path (required
//! for insertion) and a parent/caller's path (best-effort).

use pm_core::Pid;

/// Resolves the image path backing a pid's own process object.
/// Required for `on_process_create` — failure drops the whole insert.
pub trait ImageResolver: Send + Sync {
    fn resolve_image_path(&self, pid: Pid) -> Option<String>;
}

/// Resolves a best-effort display path for a parent or caller pid.
/// Absence is not an error — the record is still inserted with the
/// field left empty.
pub trait ParentInfoResolver: Send + Sync {
    fn resolve_path(&self, pid: Pid) -> Option<String>;
}

/// Linux implementation backed by `/proc/<pid>/exe`.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcExeImageResolver;

#[cfg(target_os = "linux")]
impl ImageResolver for ProcExeImageResolver {
    fn resolve_image_path(&self, pid: Pid) -> Option<String> {
        std::fs::read_link(format!("/proc/{}/exe", pid.get()))
            .ok()
            .map(|p| p.to_string_lossy().into_owned())
    }
}

#[cfg(target_os = "linux")]
impl ParentInfoResolver for ProcExeImageResolver {
    fn resolve_path(&self, pid: Pid) -> Option<String> {
        self.resolve_image_path(pid)
    }
}

/// Canned resolver for tests: fixed answers keyed by pid.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FakeImageResolver {
    paths: std::collections::HashMap<Pid, String>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeImageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, pid: Pid, path: impl Into<String>) -> Self {
        self.paths.insert(pid, path.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ImageResolver for FakeImageResolver {
    fn resolve_image_path(&self, pid: Pid) -> Option<String> {
        self.paths.get(&pid).cloned()
    }
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FakeParentInfoResolver {
    paths: std::collections::HashMap<Pid, String>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeParentInfoResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, pid: Pid, path: impl Into<String>) -> Self {
        self.paths.insert(pid, path.into());
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ParentInfoResolver for FakeParentInfoResolver {
    fn resolve_path(&self, pid: Pid) -> Option<String> {
        self.paths.get(&pid).cloned()
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

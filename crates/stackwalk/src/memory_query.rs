// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping/protection lookups — steps 1-3 of spec.md §4.B's `walk`.

use pm_core::MAX_MODULE_PATH_LEN;

/// What's known about one address: whether it falls inside a
/// file-backed mapping, and whether the containing page is
/// executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    pub in_module: bool,
    pub executable: bool,
    pub module_path: String,
    pub module_offset: u64,
}

impl AddressInfo {
    pub fn unbacked(executable: bool) -> Self {
        Self {
            in_module: false,
            executable,
            module_path: String::new(),
            module_offset: 0,
        }
    }

    pub fn in_module(module_path: String, module_offset: u64) -> Self {
        let module_path: String = module_path.chars().take(MAX_MODULE_PATH_LEN).collect();
        Self {
            in_module: true,
            executable: false,
            module_path,
            module_offset,
        }
    }
}

/// Queries mapping metadata and page protection for a raw address —
/// the OS boundary the real stack walker needs and the one this crate
/// cannot exercise deterministically without a trait seam.
pub trait MemoryQuery: Send + Sync {
    fn resolve(&self, address: u64) -> AddressInfo;
}

impl<T: MemoryQuery + ?Sized> MemoryQuery for std::sync::Arc<T> {
    fn resolve(&self, address: u64) -> AddressInfo {
        (**self).resolve(address)
    }
}

/// Linux implementation backed by `/proc/self/maps`.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcMapsMemoryQuery;

#[cfg(target_os = "linux")]
impl ProcMapsMemoryQuery {
    fn find_mapping(address: u64) -> Option<MappingLine> {
        let maps = std::fs::read_to_string("/proc/self/maps").ok()?;
        maps.lines().find_map(|line| parse_maps_line(line).filter(|m| m.contains(address)))
    }
}

#[cfg(target_os = "linux")]
impl MemoryQuery for ProcMapsMemoryQuery {
    fn resolve(&self, address: u64) -> AddressInfo {
        match Self::find_mapping(address) {
            Some(mapping) if !mapping.pathname.is_empty() => {
                AddressInfo::in_module(mapping.pathname, address - mapping.start)
            }
            Some(mapping) => AddressInfo::unbacked(mapping.executable),
            None => AddressInfo::unbacked(false),
        }
    }
}

#[cfg(target_os = "linux")]
struct MappingLine {
    start: u64,
    end: u64,
    executable: bool,
    pathname: String,
}

#[cfg(target_os = "linux")]
impl MappingLine {
    fn contains(&self, address: u64) -> bool {
        address >= self.start && address < self.end
    }
}

#[cfg(target_os = "linux")]
fn parse_maps_line(line: &str) -> Option<MappingLine> {
    let mut fields = line.splitn(6, ' ');
    let range = fields.next()?;
    let perms = fields.next()?;
    let (start, end) = range.split_once('-')?;
    let pathname = fields.last().unwrap_or("").trim().to_string();
    Some(MappingLine {
        start: u64::from_str_radix(start, 16).ok()?,
        end: u64::from_str_radix(end, 16).ok()?,
        executable: perms.as_bytes().get(2) == Some(&b'x'),
        pathname,
    })
}

/// Canned per-address answers for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FakeMemoryQuery {
    answers: std::collections::HashMap<u64, AddressInfo>,
    default_answer: AddressInfo,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeMemoryQuery {
    pub fn new() -> Self {
        Self {
            answers: std::collections::HashMap::new(),
            default_answer: AddressInfo::unbacked(false),
        }
    }

    pub fn with_answer(mut self, address: u64, info: AddressInfo) -> Self {
        self.answers.insert(address, info);
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryQuery for FakeMemoryQuery {
    fn resolve(&self, address: u64) -> AddressInfo {
        self.answers
            .get(&address)
            .cloned()
            .unwrap_or_else(|| self.default_answer.clone())
    }
}

#[cfg(test)]
#[path = "memory_query_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw return-address capture — step 0 of spec.md §4.B's `walk`.

/// Captures raw return addresses of the calling thread. Implementations
/// must skip their own frame and the immediate caller's, matching the
/// spec's "skipping the immediate caller" requirement.
pub trait FrameSource: Send + Sync {
    fn capture_return_addresses(&self, max_frames: usize) -> Vec<u64>;
}

impl<T: FrameSource + ?Sized> FrameSource for std::sync::Arc<T> {
    fn capture_return_addresses(&self, max_frames: usize) -> Vec<u64> {
        (**self).capture_return_addresses(max_frames)
    }
}

/// Real implementation built on the `backtrace` crate. Walks the
/// native call stack of the calling thread without `unsafe_code`
/// (`backtrace::trace`'s public API is safe to call).
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceFrameSource;

impl FrameSource for BacktraceFrameSource {
    fn capture_return_addresses(&self, max_frames: usize) -> Vec<u64> {
        let mut addresses = Vec::with_capacity(max_frames);
        let mut skipped = 0u8;
        backtrace::trace(|frame| {
            // Skip this closure's own frame inside backtrace::trace,
            // then the immediate caller's, matching the trait's
            // "skipping the immediate caller" contract.
            if skipped < 2 {
                skipped += 1;
                return true;
            }
            if addresses.len() >= max_frames {
                return false;
            }
            addresses.push(frame.ip() as u64);
            true
        });
        addresses
    }
}

/// Canned frame source for tests: returns a fixed address sequence
/// regardless of the real call stack.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FakeFrameSource {
    addresses: Vec<u64>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeFrameSource {
    pub fn new(addresses: Vec<u64>) -> Self {
        Self { addresses }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl FrameSource for FakeFrameSource {
    fn capture_return_addresses(&self, max_frames: usize) -> Vec<u64> {
        self.addresses.iter().take(max_frames).copied().collect()
    }
}

#[cfg(test)]
#[path = "frame_source_tests.rs"]
mod tests;

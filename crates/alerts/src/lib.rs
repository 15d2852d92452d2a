// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pm-alerts: the alert queue (C) and the detection logic (D) that
//! feeds it — one crate because (D) has exactly one consumer, (C),
//! the same reasoning the workspace uses everywhere else a
//! producer/consumer pair has no other caller between them.

mod detection;
mod queue;

pub use detection::{DetectionLogic, USER_SPACE_CEILING};
pub use queue::AlertQueue;

#[cfg(test)]
#[path = "properties_tests.rs"]
mod properties_tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pm-core: shared data model for the PeaceMaker event-processing engine.
//!
//! Every other crate in the workspace depends on these types; none of
//! them depend on any other sibling crate, so this is the one place a
//! circular dependency could never creep in.

pub mod alert;
pub mod clock;
pub mod filter;
pub mod ids;
pub mod limits;
pub mod stack;
pub mod teardown;

pub use alert::{Alert, AlertCommon, AlertSource, AlertType};
pub use clock::{Clock, SystemClock};
pub use filter::{normalize_pattern, FilterEntry, FilterEntryError, FilterKind, Ops};
pub use ids::{FilterId, LifetimeKey, Pid};
pub use limits::{MAX_FILTER_PATTERN_LEN, MAX_MODULE_PATH_LEN, MAX_STACK_RETURN_HISTORY};
pub use stack::StackFrame;
pub use teardown::TeardownFlag;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;

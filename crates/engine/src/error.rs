// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by the engine facade. Most operations return
//! `Option`/`bool` the way their owning component already does — a
//! missing record or a torn-down component is "not found", never an
//! error (spec.md §7: "teardown-flag returns are silent"). Only
//! filter registration carries its own fallible input validation.

use thiserror::Error;

use pm_filters::FilterSetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Filter(#[from] FilterSetError),
}

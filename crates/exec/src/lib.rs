// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shark-exec: runs plugin commands under a timeout and aggregates failures

pub mod batch;
pub mod error;
pub mod runner;

pub use batch::{BatchDriver, BatchResult, CommandRecord};
pub use error::{AggregateError, BatchAbort, CommandError};
pub use runner::{Runner, DEFAULT_GRACE_PERIOD};

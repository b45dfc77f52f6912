// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shark-core: command specifications, outcomes and plugin config for shark

pub mod macros;

pub mod command;
pub mod config;
pub mod error;
pub mod outcome;

pub use command::{Argv, CommandSpec, CommandValue, SHELL};
pub use config::{discover, load_entries, Config, LoadError, PluginCommand, PluginConfig};
pub use error::ConfigError;
pub use outcome::{ExecutionOutcome, FailureKind};

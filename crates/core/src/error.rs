// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors shared by the loader, the runner and the batch driver.

use thiserror::Error;

/// A broken command manifest or an invalid execution setting.
///
/// These are authoring bugs that recur on every run, so callers treat them
/// as fatal instead of attributing them to a single plugin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("command argument list is empty")]
    EmptyArgv,

    #[error("command must be a string or a list of strings, found {found}")]
    Malformed { found: String },

    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

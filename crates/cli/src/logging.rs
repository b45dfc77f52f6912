// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the binary. Library crates only emit events.

use tracing_subscriber::EnvFilter;

use crate::env::{DEFAULT_LOG_FILTER, LOG_VAR};

/// Install a stderr subscriber filtered by `SHARK_LOG`.
///
/// An invalid directive falls back to the default filter rather than
/// failing the run.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

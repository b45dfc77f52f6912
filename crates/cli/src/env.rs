// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the shark binary.

use std::time::Duration;

/// Log filter directive for tracing, e.g. `SHARK_LOG=shark_exec=debug`.
pub const LOG_VAR: &str = "SHARK_LOG";

/// Filter used when `SHARK_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Per-command timeout when `--timeout` is not given (default 10s,
/// configurable via `SHARK_TIMEOUT_MS`).
pub fn timeout() -> Duration {
    duration_ms("SHARK_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

/// Delay between SIGTERM and SIGKILL when `--grace-period` is not given
/// (default 10s, configurable via `SHARK_GRACE_MS`).
pub fn grace_period() -> Duration {
    duration_ms("SHARK_GRACE_MS").unwrap_or(shark_exec::DEFAULT_GRACE_PERIOD)
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

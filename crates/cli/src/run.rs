// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load plugin configs, run their commands, and report failures.
//!
//! Output goes to the writers the app is built with, never straight to the
//! process streams, so runs can be captured in tests.

use std::io::Write;
use std::time::Duration;

use shark_exec::{BatchDriver, BatchResult, Runner};

use crate::exit_error::{ExitError, EXIT_FAIL, EXIT_OK};

/// Resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Config file path or glob pattern.
    pub config_path: Option<String>,
    pub timeout: Duration,
    pub grace_period: Duration,
}

pub struct App<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> App<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Run and return the process exit code, writing any error to the
    /// error stream.
    pub async fn exec(&mut self, settings: &Settings) -> i32 {
        match self.run(settings).await {
            Ok(()) => EXIT_OK,
            Err(e) => {
                let _ = writeln!(self.err, "{e}");
                e.code
            }
        }
    }

    async fn run(&mut self, settings: &Settings) -> Result<(), ExitError> {
        let pattern = settings.config_path.as_deref().unwrap_or_default();
        let entries = shark_core::load_entries(pattern).map_err(ExitError::fail)?;

        let driver = BatchDriver::new(Runner::new(settings.grace_period), settings.timeout)
            .map_err(ExitError::fail)?;
        tracing::debug!(
            plugins = entries.len(),
            timeout_ms = settings.timeout.as_millis() as u64,
            grace_ms = settings.grace_period.as_millis() as u64,
            "running plugin commands"
        );

        match driver.run_all(entries).await {
            Ok(result) => {
                self.relay(&result)?;
                match result.aggregate() {
                    Some(aggregate) => Err(ExitError::new(EXIT_FAIL, aggregate.to_string())),
                    None => Ok(()),
                }
            }
            Err(abort) => {
                self.relay(&abort.partial)?;
                Err(ExitError::fail(abort))
            }
        }
    }

    /// Copy the captured output of every failed command to our own streams.
    fn relay(&mut self, result: &BatchResult) -> Result<(), ExitError> {
        for record in result.failed() {
            self.out.write_all(&record.outcome.stdout).map_err(ExitError::fail)?;
            self.err.write_all(&record.outcome.stderr).map_err(ExitError::fail)?;
        }
        self.out.flush().map_err(ExitError::fail)?;
        self.err.flush().map_err(ExitError::fail)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured result of running one command.

use std::time::Duration;

/// How a command invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Exited with status 0.
    None,
    /// The process could not be started (not found, not executable).
    ProcessStartFailure,
    /// Ran to completion with a nonzero exit status.
    NonZeroExit,
    /// Killed by a signal the engine did not send.
    Signaled,
    /// Stopped by the engine after exceeding its timeout.
    TimedOut,
}

crate::simple_display! {
    FailureKind {
        None => "ok",
        ProcessStartFailure => "failed to start",
        NonZeroExit => "nonzero exit",
        Signaled => "killed by signal",
        TimedOut => "timed out",
    }
}

/// Outcome of a single runner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Display form of the resolved argv.
    pub command: String,
    pub failure: FailureKind,
    /// Exit status when the process exited normally.
    pub exit_code: Option<i32>,
    /// Terminating signal number when the process was killed.
    pub signal: Option<i32>,
    /// OS error text when the process could not be spawned.
    pub start_error: Option<String>,
    /// Everything the process wrote to stdout before it ended or was killed.
    pub stdout: Vec<u8>,
    /// Everything the process wrote to stderr before it ended or was killed.
    pub stderr: Vec<u8>,
    /// Wall-clock time from spawn to return.
    pub duration: Duration,
}

impl ExecutionOutcome {
    pub fn exited_cleanly(&self) -> bool {
        self.failure == FailureKind::None
    }

    /// Short human-readable reason, e.g. `exit status 2` or `timed out (signal 15)`.
    pub fn reason(&self) -> String {
        match self.failure {
            FailureKind::None => "exit status 0".to_string(),
            FailureKind::ProcessStartFailure => match &self.start_error {
                Some(err) => format!("failed to start: {err}"),
                None => "failed to start".to_string(),
            },
            FailureKind::NonZeroExit => {
                format!("exit status {}", self.exit_code.unwrap_or(-1))
            }
            FailureKind::Signaled => match self.signal {
                Some(sig) => format!("killed by signal {sig}"),
                None => "killed by signal".to_string(),
            },
            FailureKind::TimedOut => match (self.signal, self.exit_code) {
                (Some(sig), _) => format!("timed out (signal {sig})"),
                (None, Some(code)) => format!("timed out (exit status {code})"),
                (None, None) => "timed out".to_string(),
            },
        }
    }

    /// Captured stdout decoded lossily as UTF-8.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stderr decoded lossily as UTF-8.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

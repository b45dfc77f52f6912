// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command and batch-level error types.

use std::fmt;

use shark_core::{ConfigError, ExecutionOutcome, FailureKind};
use thiserror::Error;

use crate::batch::BatchResult;

/// A command that ran (or tried to) and did not exit cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("exec: {command}; {name}: {reason}")]
pub struct CommandError {
    /// Qualified plugin name, e.g. `checks.disk`.
    pub name: String,
    pub command: String,
    pub kind: FailureKind,
    pub reason: String,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandError {
    pub fn new(name: impl Into<String>, outcome: &ExecutionOutcome) -> Self {
        Self {
            name: name.into(),
            command: outcome.command.clone(),
            kind: outcome.failure,
            reason: outcome.reason(),
            stdout: outcome.stdout.clone(),
            stderr: outcome.stderr.clone(),
        }
    }
}

/// Every command failure from one batch run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    failures: Vec<CommandError>,
}

impl AggregateError {
    pub(crate) fn new(failures: Vec<CommandError>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[CommandError] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// A batch stopped at a command whose configuration is broken.
#[derive(Debug, Error)]
#[error("invalid command for {name}: {source}")]
pub struct BatchAbort {
    pub name: String,
    #[source]
    pub source: ConfigError,
    /// Records of the commands that ran before the broken entry.
    pub partial: BatchResult,
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential batch execution of plugin commands.
//!
//! Command failures are collected and never stop the batch. A command value
//! that cannot be normalized stops it at once: that is a broken manifest,
//! not a failing plugin.

use std::time::Duration;

use shark_core::{CommandSpec, ConfigError, ExecutionOutcome, PluginCommand};

use crate::error::{AggregateError, BatchAbort, CommandError};
use crate::runner::Runner;

/// Outcome of one command in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub name: String,
    pub outcome: ExecutionOutcome,
}

/// Ordered records of a batch run plus the aggregate of its failures.
#[derive(Debug, Default)]
pub struct BatchResult {
    records: Vec<CommandRecord>,
    failures: Vec<CommandError>,
    aggregate: Option<AggregateError>,
}

impl BatchResult {
    fn push(&mut self, record: CommandRecord) {
        if !record.outcome.exited_cleanly() {
            self.failures.push(CommandError::new(&record.name, &record.outcome));
        }
        self.records.push(record);
    }

    fn finalize(mut self) -> Self {
        let failures = std::mem::take(&mut self.failures);
        if !failures.is_empty() {
            self.aggregate = Some(AggregateError::new(failures));
        }
        self
    }

    /// Records in execution order. Skipped entries have no record.
    pub fn records(&self) -> &[CommandRecord] {
        &self.records
    }

    /// All command failures, or `None` if every command exited cleanly.
    pub fn aggregate(&self) -> Option<&AggregateError> {
        self.aggregate.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.aggregate.is_none()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CommandRecord> {
        self.records.iter().filter(|r| !r.outcome.exited_cleanly())
    }

    pub fn into_result(self) -> Result<Vec<CommandRecord>, AggregateError> {
        match self.aggregate {
            Some(aggregate) => Err(aggregate),
            None => Ok(self.records),
        }
    }
}

/// Runs plugin commands one after another with a shared timeout.
///
/// A driver is single-flight: callers must not overlap `run_all` calls.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    runner: Runner,
    timeout: Duration,
}

impl BatchDriver {
    pub fn new(runner: Runner, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(Self { runner, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Run every entry in order.
    ///
    /// Entries without a command are skipped. An entry whose command cannot
    /// be normalized aborts the batch; [`BatchAbort::partial`] holds the
    /// records of the entries that ran before it.
    pub async fn run_all<I>(&self, entries: I) -> Result<BatchResult, BatchAbort>
    where
        I: IntoIterator<Item = PluginCommand>,
    {
        let mut result = BatchResult::default();

        for PluginCommand { name, command } in entries {
            let Some(value) = command else {
                tracing::debug!(%name, "no command configured, skipping");
                continue;
            };

            let spec = match CommandSpec::try_from(value) {
                Ok(spec) => spec,
                Err(source) => {
                    tracing::error!(%name, error = %source, "invalid command, aborting batch");
                    return Err(BatchAbort { name, source, partial: result.finalize() });
                }
            };

            let outcome = match self.runner.execute(&spec, self.timeout).await {
                Ok(outcome) => outcome,
                Err(source) => {
                    return Err(BatchAbort { name, source, partial: result.finalize() });
                }
            };

            if outcome.exited_cleanly() {
                tracing::info!(
                    %name,
                    duration_ms = outcome.duration.as_millis() as u64,
                    "command succeeded"
                );
            } else {
                tracing::warn!(
                    %name,
                    command = %outcome.command,
                    reason = %outcome.reason(),
                    "command failed"
                );
            }
            result.push(CommandRecord { name, outcome });
        }

        let result = result.finalize();
        tracing::info!(
            commands = result.records.len(),
            failed = result.aggregate.as_ref().map_or(0, AggregateError::len),
            "batch finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-command execution with timeout escalation.
//!
//! A command gets `soft_timeout` to finish. When it expires the whole process
//! group receives SIGTERM; if the command is still running after a further
//! grace period it receives SIGKILL and is reaped. The wait, the output
//! capture and both deadlines are raced in one `select!` on the calling task,
//! so nothing started here outlives [`Runner::execute`].

use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use shark_core::{CommandSpec, ConfigError, ExecutionOutcome, FailureKind};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::Instrument;

/// Time allowed between SIGTERM and SIGKILL.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Bound on draining output and reaping the child after SIGKILL.
const KILL_SETTLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Runs one [`CommandSpec`] at a time under a soft timeout plus grace period.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    grace_period: Duration,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_PERIOD)
    }
}

impl Runner {
    pub fn new(grace_period: Duration) -> Self {
        Self { grace_period }
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Run `spec` to completion or until the hard bound
    /// (`soft_timeout + grace_period`) and report how it ended.
    ///
    /// Draining and reaping after SIGKILL is bounded separately (250 ms), so
    /// `execute` can return up to that much after `soft_timeout + grace_period`.
    ///
    /// Only a zero `soft_timeout` is an error; every process-level failure,
    /// including a failed spawn, is described by the returned outcome.
    pub async fn execute(
        &self,
        spec: &CommandSpec,
        soft_timeout: Duration,
    ) -> Result<ExecutionOutcome, ConfigError> {
        if soft_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        let command = spec.to_string();
        let span = tracing::info_span!(
            "shark.cmd",
            cmd = %command,
            pid = tracing::field::Empty,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        let outcome = self.run(spec, command, soft_timeout).instrument(span.clone()).await;

        span.record("duration_ms", outcome.duration.as_millis() as u64);
        if let Some(code) = outcome.exit_code {
            span.record("exit_code", code);
        }
        Ok(outcome)
    }

    async fn run(&self, spec: &CommandSpec, command: String, soft_timeout: Duration) -> ExecutionOutcome {
        let start = Instant::now();

        let mut process = Command::new(spec.program());
        process
            .args(spec.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Own process group, so signals also reach anything the command forks.
            .process_group(0)
            .kill_on_drop(true);

        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(error = %e, "failed to start command");
                return ExecutionOutcome {
                    command,
                    failure: FailureKind::ProcessStartFailure,
                    exit_code: None,
                    signal: None,
                    start_error: Some(e.to_string()),
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                    duration: start.elapsed(),
                };
            }
        };

        let pid = child.id();
        tracing::Span::current().record("pid", pid);
        tracing::debug!(?pid, "command started");

        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut sent: Option<Signal> = None;

        // The direct child's exit is recorded as soon as it happens. Its pipes
        // may stay open longer if it left background processes behind.
        let mut exited: Option<std::io::Result<ExitStatus>> = None;
        let mut drained = false;
        let mut soft_fired = false;
        {
            let drains = async {
                tokio::join!(drain(&mut stdout_pipe, &mut stdout), drain(&mut stderr_pipe, &mut stderr));
            };
            let wait = child.wait();
            let soft = tokio::time::sleep(soft_timeout);
            let hard = tokio::time::sleep(soft_timeout.saturating_add(self.grace_period));
            tokio::pin!(drains, wait, soft, hard);

            while !(drained && exited.is_some()) {
                tokio::select! {
                    biased;
                    result = &mut wait, if exited.is_none() => {
                        let failed = result.is_err();
                        exited = Some(result);
                        if failed {
                            break;
                        }
                    }
                    _ = &mut drains, if !drained => drained = true,
                    _ = &mut hard => break,
                    _ = &mut soft, if !soft_fired => {
                        soft_fired = true;
                        signal_group(pid, Signal::SIGTERM);
                        if exited.is_none() {
                            tracing::info!(
                                timeout_ms = soft_timeout.as_millis() as u64,
                                "command exceeded timeout, sending SIGTERM"
                            );
                            sent = Some(Signal::SIGTERM);
                        } else {
                            tracing::debug!("command exited, terminating processes still holding its output");
                        }
                    }
                }
            }
        }

        let status = match exited {
            Some(Ok(status)) => {
                if !drained {
                    force_kill(&mut child, pid, &mut stdout_pipe, &mut stdout, &mut stderr_pipe, &mut stderr)
                        .await;
                }
                Some(status)
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to wait for command");
                sent = sent.or(Some(Signal::SIGKILL));
                force_kill(&mut child, pid, &mut stdout_pipe, &mut stdout, &mut stderr_pipe, &mut stderr)
                    .await
            }
            None => {
                tracing::warn!(
                    grace_ms = self.grace_period.as_millis() as u64,
                    "command still running after grace period, sending SIGKILL"
                );
                sent = Some(Signal::SIGKILL);
                force_kill(&mut child, pid, &mut stdout_pipe, &mut stdout, &mut stderr_pipe, &mut stderr)
                    .await
            }
        };

        let failure = classify(status, sent);
        let outcome = ExecutionOutcome {
            command,
            failure,
            exit_code: status.and_then(|s| s.code()),
            signal: status.and_then(|s| s.signal()),
            start_error: None,
            stdout,
            stderr,
            duration: start.elapsed(),
        };
        tracing::debug!(
            failure = %outcome.failure,
            exit_code = ?outcome.exit_code,
            signal = ?outcome.signal,
            "command finished"
        );
        outcome
    }
}

/// SIGKILL the group, then drain what is left of the pipes and reap the
/// child within [`KILL_SETTLE_TIMEOUT`]. A child that was already reaped
/// yields its recorded status. Returns `None` if the child could not be
/// reaped in time; `kill_on_drop` leaves it to the runtime's reaper.
async fn force_kill(
    child: &mut Child,
    pid: Option<u32>,
    stdout_pipe: &mut Option<ChildStdout>,
    stdout: &mut Vec<u8>,
    stderr_pipe: &mut Option<ChildStderr>,
    stderr: &mut Vec<u8>,
) -> Option<ExitStatus> {
    signal_group(pid, Signal::SIGKILL);
    // The group may be gone while the direct child lingers.
    let _ = child.start_kill();

    let settle = async {
        let (_, _, status) = tokio::join!(drain(stdout_pipe, stdout), drain(stderr_pipe, stderr), child.wait());
        status
    };
    match tokio::time::timeout(KILL_SETTLE_TIMEOUT, settle).await {
        Ok(Ok(status)) => Some(status),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "failed to reap killed command");
            None
        }
        Err(_) => {
            tracing::warn!(?pid, "killed command did not exit in time");
            None
        }
    }
}

/// `sent` is only set for signals sent while the command was still running,
/// so an exit observed before the deadline keeps its own classification.
fn classify(status: Option<ExitStatus>, sent: Option<Signal>) -> FailureKind {
    match status {
        Some(status) if status.success() => FailureKind::None,
        _ if sent.is_some() => FailureKind::TimedOut,
        Some(status) if status.signal().is_some() => FailureKind::Signaled,
        Some(_) => FailureKind::NonZeroExit,
        None => FailureKind::Signaled,
    }
}

/// Signal the process group led by `pid`. A group that has already exited is
/// not an error.
fn signal_group(pid: Option<u32>, signal: Signal) {
    let Some(raw) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    match killpg(Pid::from_raw(raw), signal) {
        Ok(()) => tracing::debug!(pid = raw, signal = signal.as_str(), "signalled process group"),
        Err(Errno::ESRCH) => {
            tracing::debug!(pid = raw, signal = signal.as_str(), "process group already exited")
        }
        Err(e) => {
            tracing::warn!(pid = raw, signal = signal.as_str(), error = %e, "failed to signal process group")
        }
    }
}

/// Append everything readable from `pipe` to `buf` until EOF.
///
/// Bytes are appended as each read completes, so output read before the
/// future is dropped is kept.
async fn drain<R: AsyncRead + Unpin>(pipe: &mut Option<R>, buf: &mut Vec<u8>) {
    let Some(reader) = pipe.as_mut() else {
        return;
    };
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) => {
                tracing::debug!(error = %e, "output pipe read failed");
                break;
            }
        }
    }
    *pipe = None;
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

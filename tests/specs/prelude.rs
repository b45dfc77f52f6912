//! Helpers shared by the CLI specs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// `shark` invoked outside of any project directory.
pub fn cli() -> Run {
    Run::new(None)
}

/// A temporary directory holding config files.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `shark` run from inside the project directory.
    pub fn shark(&self) -> Run {
        Run::new(Some(self.dir.path()))
    }
}

pub struct Run {
    cmd: Command,
}

impl Run {
    fn new(cwd: Option<&Path>) -> Self {
        let mut cmd = Command::cargo_bin("shark").unwrap();
        cmd.env_remove("SHARK_TIMEOUT_MS").env_remove("SHARK_GRACE_MS").env_remove("SHARK_LOG");
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and assert a zero exit status.
    pub fn passes(mut self) -> Outcome {
        let outcome = Outcome::from(self.cmd.output().unwrap());
        assert_eq!(outcome.code, Some(0), "expected success\n{outcome}");
        outcome
    }

    /// Run and assert a nonzero exit status.
    pub fn fails(mut self) -> Outcome {
        let outcome = Outcome::from(self.cmd.output().unwrap());
        assert!(outcome.code.is_some_and(|c| c != 0), "expected failure\n{outcome}");
        outcome
    }
}

pub struct Outcome {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for Outcome {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit: {:?}\nstdout:\n{}\nstderr:\n{}", self.code, self.stdout, self.stderr)
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}\n{self}");
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(!self.stderr.contains(needle), "stderr unexpectedly has {needle:?}\n{self}");
        self
    }
}

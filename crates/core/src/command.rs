// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command specifications for plugin checks.
//!
//! A plugin's `command` may be written in two forms:
//!
//! Shell form (run through `sh -c`):
//! ```toml
//! command = "check-disk -w 80 | tee /tmp/last"
//! ```
//!
//! Argv form (executed directly, no shell interpretation):
//! ```toml
//! command = ["check-ntp", "--host", "pool.ntp.org"]
//! ```
//!
//! The raw value is decoded into [`CommandValue`] and normalized into a
//! [`CommandSpec`] exactly once, through `TryFrom`.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Interpreter used for shell-form commands.
pub const SHELL: &str = "sh";

/// A normalized, runnable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Command line interpreted by `sh -c`.
    Shell(String),
    /// Program and arguments executed directly.
    Argv(Argv),
}

impl CommandSpec {
    pub fn shell(text: impl Into<String>) -> Self {
        CommandSpec::Shell(text.into())
    }

    /// Build an argv-form command. Fails with [`ConfigError::EmptyArgv`]
    /// when `parts` is empty; a single element is a program without arguments.
    pub fn argv<I, S>(parts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Argv::new(parts).map(CommandSpec::Argv)
    }

    /// Executable to spawn.
    pub fn program(&self) -> &str {
        match self {
            CommandSpec::Shell(_) => SHELL,
            CommandSpec::Argv(argv) => argv.program(),
        }
    }

    /// Arguments passed to [`program`](Self::program).
    pub fn args(&self) -> Vec<&str> {
        match self {
            CommandSpec::Shell(text) => vec!["-c", text.as_str()],
            CommandSpec::Argv(argv) => argv.args().iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Non-empty argument vector: a program plus zero or more arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv {
    program: String,
    args: Vec<String>,
}

impl Argv {
    pub fn new<I, S>(parts: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = parts.into_iter().map(Into::into);
        let program = parts.next().ok_or(ConfigError::EmptyArgv)?;
        Ok(Self { program, args: parts.collect() })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// A `command` value as written in a config file, before normalization.
///
/// Values of any other shape decode to [`CommandValue::Malformed`] rather
/// than failing the whole file, so the batch can stop at the offending entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    Line(String),
    List(Vec<String>),
    Malformed { found: String },
}

impl<'de> Deserialize<'de> for CommandValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Line(String),
            List(Vec<String>),
            Other(toml::Value),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Line(line) => Ok(CommandValue::Line(line)),
            Helper::List(parts) => Ok(CommandValue::List(parts)),
            Helper::Other(value) => Ok(CommandValue::Malformed { found: describe(&value) }),
        }
    }
}

fn describe(value: &toml::Value) -> String {
    match value {
        toml::Value::Array(items) => items
            .iter()
            .find(|item| !item.is_str())
            .map(|item| format!("array containing {}", item.type_str()))
            .unwrap_or_else(|| "array".to_string()),
        other => other.type_str().to_string(),
    }
}

impl TryFrom<CommandValue> for CommandSpec {
    type Error = ConfigError;

    fn try_from(value: CommandValue) -> Result<Self, Self::Error> {
        match value {
            CommandValue::Line(line) => Ok(CommandSpec::Shell(line)),
            CommandValue::List(parts) => CommandSpec::argv(parts),
            CommandValue::Malformed { found } => Err(ConfigError::Malformed { found }),
        }
    }
}

impl From<&str> for CommandValue {
    fn from(line: &str) -> Self {
        CommandValue::Line(line.to_string())
    }
}

impl From<Vec<&str>> for CommandValue {
    fn from(parts: Vec<&str>) -> Self {
        CommandValue::List(parts.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin config discovery and decoding.
//!
//! Config files are TOML. Each plugin lives under `plugin.<group>.<name>`:
//!
//! ```toml
//! [plugin.checks.disk]
//! command = "check-disk -w 80"
//!
//! [plugin.checks.ntp]
//! command = ["check-ntp", "--host", "pool.ntp.org"]
//! ```
//!
//! Groups and plugins keep their document order. Keys other than `command`
//! are ignored.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::command::CommandValue;

/// Decoded contents of one config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plugin: IndexMap<String, IndexMap<String, PluginConfig>>,
}

/// One `[plugin.<group>.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig {
    /// `None` when the table has no `command` key.
    #[serde(default)]
    pub command: Option<CommandValue>,
}

/// A plugin's command paired with its qualified `<group>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    pub name: String,
    pub command: Option<CommandValue>,
}

impl PluginCommand {
    pub fn new(name: impl Into<String>, command: impl Into<Option<CommandValue>>) -> Self {
        Self { name: name.into(), command: command.into() }
    }
}

/// Errors from locating or decoding config files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("must provide config path")]
    MissingPath,

    #[error("invalid config path pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no config files match `{0}`")]
    NoMatches(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
            .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
    }

    /// Flatten into plugin commands in document order.
    pub fn entries(self) -> Vec<PluginCommand> {
        self.plugin
            .into_iter()
            .flat_map(|(group, plugins)| {
                plugins.into_iter().map(move |(name, plugin)| {
                    PluginCommand::new(format!("{group}.{name}"), plugin.command)
                })
            })
            .collect()
    }
}

/// Expand `pattern` into the config files it matches, in path order.
///
/// Unreadable directories encountered while matching are skipped.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
    if pattern.is_empty() {
        return Err(LoadError::MissingPath);
    }
    let paths = glob::glob(pattern)
        .map_err(|source| LoadError::Pattern { pattern: pattern.to_string(), source })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable path");
            }
        }
    }
    if files.is_empty() {
        return Err(LoadError::NoMatches(pattern.to_string()));
    }
    Ok(files)
}

/// Discover and decode every config file matching `pattern`, concatenating
/// their plugin commands in file order.
pub fn load_entries(pattern: &str) -> Result<Vec<PluginCommand>, LoadError> {
    let mut entries = Vec::new();
    for path in discover(pattern)? {
        let config = Config::load(&path)?;
        let before = entries.len();
        entries.extend(config.entries());
        tracing::debug!(path = %path.display(), plugins = entries.len() - before, "loaded config");
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! The run path returns `ExitError` instead of calling `std::process::exit()`
//! so that `main()` owns process termination and tests can inspect the code.

use std::fmt;

/// All checks passed.
pub const EXIT_OK: i32 = 0;

/// A check failed, or the config could not be loaded.
pub const EXIT_FAIL: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn fail(message: impl fmt::Display) -> Self {
        Self::new(EXIT_FAIL, message.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

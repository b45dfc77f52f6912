// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shark: run monitoring plugin commands with a bounded execution time.

mod env;
mod exit_error;
mod logging;
mod run;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use crate::run::{App, Settings};

/// Version string: crate version plus the git hash it was built from.
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

/// Run every plugin command declared in the matching config files.
///
/// Captured output is printed only for commands that fail. The exit status
/// is nonzero if any command failed or the config could not be loaded.
#[derive(Parser, Debug)]
#[command(name = "shark", version = VERSION, about)]
struct Cli {
    /// Config file path or glob pattern, e.g. '/etc/shark/conf.d/*.toml'
    #[arg(long = "config-path", value_name = "GLOB")]
    config_path: Option<String>,

    /// Seconds a command may run before it receives SIGTERM [default: 10]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Seconds between SIGTERM and SIGKILL [default: 10]
    #[arg(long = "grace-period", value_name = "SECS")]
    grace_period: Option<u64>,
}

impl Cli {
    fn settings(self) -> Settings {
        Settings {
            config_path: self.config_path,
            timeout: self.timeout.map(Duration::from_secs).unwrap_or_else(env::timeout),
            grace_period: self
                .grace_period
                .map(Duration::from_secs)
                .unwrap_or_else(env::grace_period),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let mut app = App::new(std::io::stdout(), std::io::stderr());
    let code = app.exec(&cli.settings()).await;
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

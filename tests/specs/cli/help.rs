//! CLI help and version output specs

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--config-path")
        .stdout_has("--timeout")
        .stdout_has("--grace-period");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("shark 0.1");
}

#[test]
fn unknown_flag_fails() {
    cli().args(&["--nope"]).fails().stderr_has("--nope");
}

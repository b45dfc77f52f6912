//! Specs for running plugin commands from config files.

use crate::prelude::*;

#[test]
fn no_config_path_fails() {
    cli().fails().stderr_has("must provide config path");
}

#[test]
fn unmatched_pattern_fails() {
    let temp = Project::empty();
    temp.shark().args(&["--config-path", "conf.d/*.toml"]).fails().stderr_has("no config files match");
}

/// Output of passing commands is swallowed.
#[test]
fn passing_checks_are_silent() {
    let temp = Project::empty();
    temp.file(
        "shark.toml",
        r#"
[plugin.checks.shell]
command = "echo shell-ok"

[plugin.checks.argv]
command = ["echo", "argv-ok"]
"#,
    );

    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .passes()
        .stdout_lacks("shell-ok")
        .stdout_lacks("argv-ok");
}

/// A failing check reports its output and name, and later checks still run.
#[test]
fn failing_check_is_reported_and_batch_continues() {
    let temp = Project::empty();
    temp.file(
        "shark.toml",
        r#"
[plugin.checks.first]
command = "true"

[plugin.checks.broken]
command = "echo CRITICAL disk full; echo details >&2; exit 2"

[plugin.checks.last]
command = "touch last-ran"
"#,
    );

    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .fails()
        .stdout_has("CRITICAL disk full")
        .stderr_has("details")
        .stderr_has("checks.broken: exit status 2")
        .stderr_lacks("checks.first")
        .stderr_lacks("checks.last");

    assert!(temp.path().join("last-ran").exists());
}

#[test]
fn every_failure_gets_a_line() {
    let temp = Project::empty();
    temp.file(
        "shark.toml",
        r#"
[plugin.checks.a]
command = "exit 1"

[plugin.checks.b]
command = ["shark-spec-no-such-binary"]
"#,
    );

    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .fails()
        .stderr_has("checks.a: exit status 1")
        .stderr_has("checks.b: failed to start");
}

/// An empty argv is a broken manifest: nothing after it runs.
#[test]
fn empty_argv_aborts_the_run() {
    let temp = Project::empty();
    temp.file(
        "shark.toml",
        r#"
[plugin.checks.before]
command = "touch before-ran"

[plugin.checks.empty]
command = []

[plugin.checks.after]
command = "touch after-ran"
"#,
    );

    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .fails()
        .stderr_has("invalid command for checks.empty");

    assert!(temp.path().join("before-ran").exists());
    assert!(!temp.path().join("after-ran").exists());
}

#[test]
fn non_string_command_aborts_the_run() {
    let temp = Project::empty();
    temp.file("shark.toml", "[plugin.checks.bad]\ncommand = [\"echo\", 1]\n");

    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .fails()
        .stderr_has("array containing integer");
}

#[test]
fn plugins_without_command_are_skipped() {
    let temp = Project::empty();
    temp.file("shark.toml", "[plugin.checks.idle]\nmemo = \"nothing to run\"\n");

    temp.shark().args(&["--config-path", "shark.toml"]).passes();
}

#[test]
fn glob_runs_every_matching_file() {
    let temp = Project::empty();
    temp.file("conf.d/a.toml", "[plugin.checks.a]\ncommand = \"touch a-ran\"\n");
    temp.file("conf.d/b.toml", "[plugin.checks.b]\ncommand = \"exit 4\"\n");

    temp.shark()
        .args(&["--config-path", "conf.d/*.toml"])
        .fails()
        .stderr_has("checks.b: exit status 4");

    assert!(temp.path().join("a-ran").exists());
}

#[test]
fn invalid_toml_fails_before_running() {
    let temp = Project::empty();
    temp.file("a.toml", "[plugin.checks.a]\ncommand = \"touch a-ran\"\n");
    temp.file("b.toml", "[plugin.checks.b\n");

    temp.shark().args(&["--config-path", "*.toml"]).fails().stderr_has("failed to parse");

    assert!(!temp.path().join("a-ran").exists());
}

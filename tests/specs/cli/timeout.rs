//! Specs for timeout escalation.

use std::time::{Duration, Instant};

use crate::prelude::*;

const CONFIG: &str = r#"
[plugin.checks.slow]
command = "sleep 30"

[plugin.checks.stubborn]
command = "trap '' TERM; echo still-here; sleep 30"

[plugin.checks.fast]
command = "touch fast-ran"
"#;

#[test]
fn slow_checks_are_stopped_and_the_batch_continues() {
    let temp = Project::empty();
    temp.file("shark.toml", CONFIG);

    let started = Instant::now();
    temp.shark()
        .args(&["--config-path", "shark.toml"])
        .env("SHARK_TIMEOUT_MS", "300")
        .env("SHARK_GRACE_MS", "300")
        .fails()
        .stdout_has("still-here")
        .stderr_has("checks.slow: timed out")
        .stderr_has("checks.stubborn: timed out (signal 9)");

    assert!(temp.path().join("fast-ran").exists());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn zero_timeout_is_rejected() {
    let temp = Project::empty();
    temp.file("shark.toml", "[plugin.checks.a]\ncommand = \"touch ran\"\n");

    temp.shark()
        .args(&["--config-path", "shark.toml", "--timeout", "0"])
        .fails()
        .stderr_has("timeout must be greater than zero");

    assert!(!temp.path().join("ran").exists());
}

#![allow(clippy::unwrap_used)]
// Black-box CLI tests: argument parsing and configuration errors only,
// no live orchestrator.

use assert_cmd::Command;
use predicates::prelude::*;

fn fabriq() -> Command {
    let mut cmd = Command::cargo_bin("fabriq").unwrap();
    let dir = tempfile::tempdir().unwrap();
    cmd.current_dir(dir.keep());
    for var in [
        "FABRIQ_CONTROLLER",
        "FABRIQ_USER",
        "FABRIQ_PASSWORD",
        "FABRIQ_LOGIN_DOMAIN",
        "FABRIQ_PLATFORM",
        "FABRIQ_INSECURE",
        "FABRIQ_PROXY",
        "FABRIQ_TIMEOUT",
        "FABRIQ_OUTPUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_every_listing_command() {
    fabriq()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("templates")
                .and(predicate::str::contains("anps"))
                .and(predicate::str::contains("vrfs"))
                .and(predicate::str::contains("bds"))
                .and(predicate::str::contains("epgs"))
                .and(predicate::str::contains("static-ports")),
        );
}

#[test]
fn no_arguments_shows_usage() {
    fabriq()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_controller_is_a_usage_error() {
    fabriq()
        .args(["templates", "--user", "admin", "--password", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("controller"));
}

#[test]
fn unknown_platform_is_rejected_by_clap() {
    fabriq()
        .args([
            "templates",
            "--controller",
            "https://ndo.example.com",
            "--user",
            "admin",
            "--password",
            "x",
            "--platform",
            "apic",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

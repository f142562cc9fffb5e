//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("precheck")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Precheck looks for the mistakes"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("precheck")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("precheck")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("precheck")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_check_help() {
    cargo_bin_cmd!("precheck")
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXIT CODES"));
}

#[test]
fn test_check_and_gate_conflict() {
    cargo_bin_cmd!("precheck")
        .args(["check", "--check", "--gate"])
        .write_stdin("class A {}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

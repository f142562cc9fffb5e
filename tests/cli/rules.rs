//! Rules subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_rules_lists_pipeline_order() {
    let output = cargo_bin_cmd!("precheck").arg("rules").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("1 missing-class"));
    assert!(lines.last().unwrap().starts_with("9 incomplete-control"));

    let passes: Vec<u8> = lines
        .iter()
        .map(|line| line.split_whitespace().next().unwrap().parse().unwrap())
        .collect();
    let mut sorted = passes.clone();
    sorted.sort();
    assert_eq!(passes, sorted);
}

#[test]
fn test_rules_marks_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "disabled_rules = [\"infinite-loop\"]\n").unwrap();

    cargo_bin_cmd!("precheck")
        .args(["rules", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"8 infinite-loop .*\(disabled\)").unwrap())
        .stdout(predicate::str::contains("(disabled)").count(1));
}

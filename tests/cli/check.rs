//! Check subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CLEAN: &str = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello\");\n    }\n}\n";

const MISSING_SEMICOLON: &str = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello\")\n    }\n}\n";

const ENDLESS_LOOP: &str = "public class Main {\n    public static void main(String[] args) {\n        while (true) { tick(); }\n    }\n}\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_check_clean_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_reports_location() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", MISSING_SEMICOLON);

    cargo_bin_cmd!("precheck")
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[print-missing-semicolon]: Line 3: Missing semicolon",
        ))
        .stdout(predicate::str::contains(format!("{file}:3:36")))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_check_mode_clean() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", "--check", &file])
        .assert()
        .success();
}

#[test]
fn test_check_mode_violations() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", ENDLESS_LOOP);

    cargo_bin_cmd!("precheck")
        .args(["check", "--check", &file])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[infinite-loop]"));
}

#[test]
fn test_check_stdin_empty() {
    cargo_bin_cmd!("precheck")
        .arg("check")
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[empty-source]: Your code is empty."))
        .stdout(predicate::str::contains("<stdin>:1:1"));
}

#[test]
fn test_check_walks_directories() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "src/A.java", CLEAN);
    write_file(&temp_dir, "src/B.java", "public class B {\n}\n");
    write_file(&temp_dir, "src/notes.txt", "not java at all {");

    cargo_bin_cmd!("precheck")
        .args(["check", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("B.java:1:1"))
        .stdout(predicate::str::contains("[missing-main]"))
        .stdout(predicate::str::contains("A.java").not())
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_check_output_keeps_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_file(&temp_dir, "Z.java", "");
    let second = write_file(&temp_dir, "A.java", "");

    let output = cargo_bin_cmd!("precheck")
        .args(["check", &first, &second])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let z = stdout.find("Z.java").unwrap();
    let a = stdout.find("A.java").unwrap();
    assert!(z < a);
    assert!(stdout.contains("Found 2 issue(s)"));
}

#[test]
fn test_config_exclude() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, ".precheck.toml", "exclude = [\"**/generated/**\"]\n");
    write_file(&temp_dir, "generated/Bad.java", "");
    write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_config_disabled_rules() {
    let temp_dir = TempDir::new().unwrap();
    let source = CLEAN.replace("class Main", "class hello");
    let file = write_file(&temp_dir, "hello.java", &source);

    cargo_bin_cmd!("precheck")
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("[class-naming]"));

    write_file(&temp_dir, "precheck.toml", "disabled_rules = [\"class-naming\"]\n");

    cargo_bin_cmd!("precheck")
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_explicit_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_file(&temp_dir, "custom.toml", "gate = \"never\"\n");
    let file = write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", "--config", &config, &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_input_too_large() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, ".precheck.toml", "max_input_bytes = 16\n");
    let file = write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("[input-too-large]"));
}

#[test]
fn test_gate_blocks_unchecked_input() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, ".precheck.toml", "max_input_bytes = 16\n");
    let file = write_file(&temp_dir, "Main.java", CLEAN);

    cargo_bin_cmd!("precheck")
        .args(["check", "--gate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Blocked"))
        .stderr(predicate::str::contains("it was not checked"));
}

#[test]
fn test_json_output() {
    let output = cargo_bin_cmd!("precheck")
        .args(["check", "--format", "json"])
        .write_stdin("")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected = serde_json::json!([{
        "file": "<stdin>",
        "diagnostics": [{
            "severity": "error",
            "location": { "line": 1, "column": 1, "offset": 0 },
            "message": "Your code is empty. Write some Java code before running it.",
            "code": "empty-source"
        }]
    }]);
    similar_asserts::assert_eq!(json, expected);
}

#[test]
fn test_gate_allows_warnings_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", ENDLESS_LOOP);

    cargo_bin_cmd!("precheck")
        .args(["check", "--gate", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("[infinite-loop]"));
}

#[test]
fn test_gate_any_diagnostic_blocks_warnings() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, ".precheck.toml", "gate = \"any-diagnostic\"\n");
    let file = write_file(&temp_dir, "Main.java", ENDLESS_LOOP);

    cargo_bin_cmd!("precheck")
        .args(["check", "--gate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Blocked"))
        .stderr(predicate::str::contains("Line 3: Infinite loop"));
}

#[test]
fn test_gate_blocks_errors() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(&temp_dir, "Main.java", MISSING_SEMICOLON);

    cargo_bin_cmd!("precheck")
        .args(["check", "--gate", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing semicolon"));
}

//! Integration tests for the strindex CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const SOURCE: &str = r#"class Messages {
    static final String PREFIX = "ab\n";

    String greet() {
        return PREFIX + "cdef";
    }
}
"#;

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("strindex").unwrap()
}

/// Helper function to create a temporary directory with a Java file
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Messages.java"), SOURCE).unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("strindex maps a caret"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_at_line_column() {
    let project = create_test_project();

    // Line 5 is `        return PREFIX + "cdef";`, column 28 is the `e`
    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "5:28"])
        .assert()
        .success()
        .stdout("String 2:3 (index 5)\n");
}

#[test]
fn test_at_byte_offset() {
    let project = create_test_project();
    let offset = SOURCE.find("ef\"").unwrap();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", &offset.to_string()])
        .assert()
        .success()
        .stdout("String 2:3 (index 5)\n");
}

#[test]
fn test_at_outside_literal_prints_empty_line() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "1:1"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_at_multiple_carets_has_no_position() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "-C", "5:28", "-C", "5:29"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_at_indexing_has_no_position() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "5:28", "--indexing"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_at_json_output() {
    let project = create_test_project();

    let output = cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "5:28", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["caret"], "5:28");
    assert_eq!(report["caretCount"], 1);
    assert_eq!(report["text"], "String 2:3 (index 5)");
    assert_eq!(report["position"]["line"], 2);
    assert_eq!(report["position"]["column"], 3);
    assert_eq!(report["position"]["index"], 5);
}

#[test]
fn test_at_reads_stdin() {
    cli()
        .args(["at", "-", "--caret", "1:16"])
        .write_stdin("String s = \"a\\tbc\";")
        .assert()
        .success()
        .stdout("String 1:3 (index 2)\n");
}

#[test]
fn test_at_compact_flag() {
    cli()
        .args(["at", "-", "--caret", "1:14", "--compact"])
        .write_stdin("String s = \"abc\";")
        .assert()
        .success()
        .stdout("String index 1\n");
}

#[test]
fn test_at_uses_discovered_config() {
    let project = create_test_project();
    fs::write(
        project.path().join(".strindexrc.toml"),
        "[display]\ncompactSingleLine = true\n",
    )
    .unwrap();
    fs::write(project.path().join("One.java"), "String s = \"abc\";").unwrap();

    cli()
        .current_dir(project.path())
        .args(["at", "One.java", "--caret", "1:14"])
        .assert()
        .success()
        .stdout("String index 1\n");
}

#[test]
fn test_at_broken_discovered_config_uses_defaults() {
    let project = create_test_project();
    fs::write(project.path().join(".strindexrc.toml"), "[display\n").unwrap();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "5:28"])
        .assert()
        .success()
        .stdout("String 2:3 (index 5)\n");
}

#[test]
fn test_at_broken_explicit_config_fails() {
    let project = create_test_project();
    fs::write(project.path().join("broken.toml"), "[display\n").unwrap();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "5:28", "--config", "broken.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_at_invalid_caret() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid caret 'abc'"));
}

#[test]
fn test_at_caret_outside_file() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Messages.java", "--caret", "40:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid caret '40:1'"));
}

#[test]
fn test_at_missing_file() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["at", "Missing.java", "--caret", "1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing.java"));
}

#[test]
fn test_literals_command() {
    let project = create_test_project();

    cli()
        .current_dir(project.path())
        .args(["literals", "Messages.java"])
        .assert()
        .success()
        .stdout("2:34\tstring\t\"ab\\n\"\n5:25\tstring\t\"cdef\"\n");
}

#[test]
fn test_literals_json() {
    let output = cli()
        .args(["literals", "-", "--format", "json"])
        .write_stdin("String s = \"\"\"\n    hi\n    \"\"\";")
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["kind"], "text-block");
    assert_eq!(reports[0]["value"], "hi\n");
    assert_eq!(reports[0]["length"], 3);
}

#[test]
fn test_config_init_and_show() {
    let project = TempDir::new().unwrap();

    cli()
        .current_dir(project.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".strindexrc.toml"));
    assert!(project.path().join(".strindexrc.toml").exists());

    cli()
        .current_dir(project.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cli()
        .current_dir(project.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxDepth = 64"));
}

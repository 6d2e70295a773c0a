//! Command-line tests for pardu

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn example_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "0123456789").unwrap();
    fs::create_dir(temp.path().join("b")).unwrap();
    fs::write(temp.path().join("b/c.txt"), "01234567890123456789").unwrap();
    temp
}

fn pardu() -> Command {
    Command::cargo_bin("pardu").unwrap()
}

#[test]
fn test_summary_line() {
    let temp = example_tree();

    pardu()
        .arg("--apparent-size")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 30 B (2 files, 1 directories)"));
}

#[test]
fn test_exclude_flag() {
    let temp = example_tree();

    pardu()
        .args(["-a", "-x", "*/b/c.txt"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 files, 1 directories)"));
}

#[test]
fn test_tree_output() {
    let temp = example_tree();

    let expected = format!(
        "{}\n├── b/\n│   └── c.txt\n└── a.txt\n",
        temp.path().display()
    );

    pardu()
        .arg("--tree")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(expected));
}

#[test]
fn test_missing_path_is_not_fatal() {
    let temp = example_tree();
    let missing = temp.path().join("nope");

    pardu()
        .arg("-a")
        .arg(&missing)
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error: cannot stat"))
        .stdout(predicate::str::contains("(2 files, 1 directories)"));
}

#[test]
fn test_json_summary() {
    let temp = example_tree();

    let output = pardu()
        .args(["--json", "-a"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_size"], 30);
    assert_eq!(summary["file_count"], 2);
    assert_eq!(summary["dir_count"], 1);
}

#[test]
fn test_json_conflicts_with_tree() {
    pardu().args(["--json", "--tree"]).assert().failure();
}

#[test]
fn test_invalid_pattern_fails() {
    let temp = example_tree();

    pardu()
        .args(["-x", "["])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to prepare scan"));
}

//! End-to-end tests for the `json-compare` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cli() -> Command {
    Command::cargo_bin("json-compare").unwrap()
}

#[test]
fn equal_documents_exit_zero() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"a": [1, 2, 3], "b": {"x": 1}}"#);
    let b = write(&dir, "b.json", r#"{"b": {"x": 1}, "a": [3, 2, 1]}"#);

    let output = cli().arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[test]
fn different_documents_exit_one() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"a": 1, "b": 2}"#);
    let b = write(&dir, "b.json", r#"{"a": 1}"#);

    let output = cli().arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn text_format_lists_discrepancies() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"a": [1, 2], "u": {"n": "A"}}"#);
    let b = write(&dir, "b.json", r#"{"a": [1, 2, 3], "u": {"n": "B"}}"#);

    let output = cli()
        .args(["--format", "text"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "a: array length mismatch: source has 2 elements, target has 3",
            r#"u.n: value mismatch: source "A" != target "B""#,
        ]
    );
}

#[test]
fn json_format_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"a": 1}"#);
    let b = write(&dir, "b.json", r#"{"a": 2}"#);

    let output = cli()
        .args(["--format", "json"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report[0]["path"], "a");
    assert_eq!(report[0]["kind"], "value_mismatch");
    assert_eq!(report[0]["source"], 1);
    assert_eq!(report[0]["target"], 2);
}

#[test]
fn ignore_and_config_are_applied() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"id": 1, "meta": {"ts": 5}, "v": true}"#);
    let b = write(&dir, "b.json", r#"{"id": 2, "meta": {"ts": 6}, "v": true}"#);
    let config = write(&dir, "options.toml", "ignore_paths = [\"meta\"]\n");

    let output = cli()
        .arg("--config")
        .arg(&config)
        .args(["--ignore", "id"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn target_from_stdin() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"tags": ["x", "y"]}"#);

    let output = cli()
        .arg(&a)
        .arg("-")
        .write_stdin(r#"{"tags": ["y", "x"]}"#)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn non_object_input_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "[1, 2]");
    let b = write(&dir, "b.json", "{}");

    let output = cli().arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid source input: expected an object, found array"));
}

#[test]
fn malformed_json_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "{not json");
    let b = write(&dir, "b.json", "{}");

    let output = cli().arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid JSON"));
}

#[test]
fn depth_limit_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", r#"{"a": {"b": {"c": 1}}}"#);

    let output = cli()
        .args(["--max-depth", "1"])
        .arg(&a)
        .arg(&a)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("depth limit"));
}

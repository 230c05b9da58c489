#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hook-dispatch"))
}

/// Run the hook in `cwd` with an optional rules file.
/// Returns (stdout, stderr, exit_code).
fn run_hook_in(cwd: &Path, rules: Option<&Path>, input: &str) -> (String, String, i32) {
    let mut cmd = Command::new(binary_path());
    cmd.current_dir(cwd)
        .env_remove("HOOK_RULES")
        .env_remove("HOOK_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(rules) = rules {
        cmd.env("HOOK_RULES", rules);
    }

    let mut child = cmd.spawn().expect("failed to spawn");
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            assert_eq!(e.kind(), ErrorKind::BrokenPipe, "failed to write: {e}");
        }
    }
    let output = child.wait_with_output().expect("failed to wait");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn run_hook(input: &str) -> (String, String, i32) {
    let temp = TempDir::new().unwrap();
    run_hook_in(temp.path(), None, input)
}

fn write_rules(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hook-rules.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

const DENY_DESTRUCTIVE: &str = r#"
rules:
  - name: no-delete
    when:
      tool_name: "delete_*"
    reason: destructive tools are disabled
"#;

#[test]
fn test_stop_event_no_output() {
    let (stdout, _stderr, code) = run_hook(r#"{"hook_event_name": "Stop"}"#);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_empty_input_no_output() {
    let (stdout, stderr, code) = run_hook("");
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.is_empty(), "nothing should surface: {stderr}");
}

#[test]
fn test_invalid_json_exits_zero() {
    let (stdout, stderr, code) = run_hook("not valid json");
    assert_eq!(code, 0, "invalid JSON must not fail the host");
    assert!(stdout.is_empty());
    assert!(stderr.is_empty(), "nothing should surface: {stderr}");
}

#[test]
fn test_unknown_event_noop() {
    let (stdout, _stderr, code) = run_hook(r#"{"hook_event_name": "Unknown"}"#);
    assert_eq!(code, 0);
    assert!(stdout.is_empty(), "Unknown events should be no-op");
}

#[test]
fn test_every_known_event_exits_zero_without_rules() {
    for input in [
        r#"{"hook_event_name": "UserPromptSubmit", "prompt": "hello"}"#,
        r#"{"hook_event_name": "PreToolUse", "tool_name": "delete_file", "tool_input": {}}"#,
        r#"{"hook_event_name": "PostToolUse", "tool_name": "Bash", "tool_input": {}, "tool_response": {}}"#,
        r#"{"hook_event_name": "Notification", "notification": "waiting"}"#,
        r#"{"hook_event_name": "Stop"}"#,
    ] {
        let (stdout, _stderr, code) = run_hook(input);
        assert_eq!(code, 0, "input {input}");
        assert!(stdout.is_empty(), "input {input} wrote {stdout}");
    }
}

#[test]
fn test_pre_tool_use_denies_destructive_tool() {
    let temp = TempDir::new().unwrap();
    let rules = write_rules(temp.path(), DENY_DESTRUCTIVE);
    let input = r#"{"hook_event_name": "PreToolUse", "tool_name": "delete_file", "tool_input": {}}"#;

    let (stdout, _stderr, code) = run_hook_in(temp.path(), Some(&rules), input);
    assert_eq!(code, 0);
    assert!(stdout.ends_with('\n'));
    assert_eq!(stdout.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["decision"], "deny");
    assert_eq!(value["reason"], "destructive tools are disabled");
}

#[test]
fn test_pre_tool_use_allows_other_tools() {
    let temp = TempDir::new().unwrap();
    let rules = write_rules(temp.path(), DENY_DESTRUCTIVE);
    let input = r#"{"hook_event_name": "PreToolUse", "tool_name": "Read", "tool_input": {"file_path": "/tmp/x"}}"#;

    let (stdout, _stderr, code) = run_hook_in(temp.path(), Some(&rules), input);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_rules_discovered_from_record_cwd() {
    let project = TempDir::new().unwrap();
    write_rules(project.path(), "presets: [destructive]\n");
    let subdir = project.path().join("src");
    std::fs::create_dir_all(&subdir).unwrap();

    let elsewhere = TempDir::new().unwrap();
    let input = serde_json::json!({
        "hook_event_name": "PreToolUse",
        "cwd": subdir,
        "tool_name": "Bash",
        "tool_input": {"command": "rm -rf target"}
    })
    .to_string();

    let (stdout, _stderr, code) = run_hook_in(elsewhere.path(), None, &input);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["decision"], "deny");
    assert!(!value["reason"].as_str().unwrap().is_empty());
}

#[test]
fn test_other_events_ignore_rules() {
    let temp = TempDir::new().unwrap();
    let rules = write_rules(temp.path(), DENY_DESTRUCTIVE);
    let input = r#"{"hook_event_name": "PostToolUse", "tool_name": "delete_file", "tool_input": {}}"#;

    let (stdout, _stderr, code) = run_hook_in(temp.path(), Some(&rules), input);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_broken_rules_fail_open() {
    let temp = TempDir::new().unwrap();
    let rules = write_rules(temp.path(), "rules: [this is: not: valid");
    let input = r#"{"hook_event_name": "PreToolUse", "tool_name": "delete_file", "tool_input": {}}"#;

    let (stdout, stderr, code) = run_hook_in(temp.path(), Some(&rules), input);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.is_empty(), "nothing should surface: {stderr}");
}

#[test]
fn test_missing_rules_file_fails_open() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.yaml");
    let input = r#"{"hook_event_name": "PreToolUse", "tool_name": "delete_file", "tool_input": {}}"#;

    let (stdout, _stderr, code) = run_hook_in(temp.path(), Some(&missing), input);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_identical_input_identical_output() {
    let temp = TempDir::new().unwrap();
    let rules = write_rules(temp.path(), DENY_DESTRUCTIVE);
    let input = r#"{"hook_event_name": "PreToolUse", "tool_name": "delete_file", "tool_input": {}}"#;

    let first = run_hook_in(temp.path(), Some(&rules), input);
    let second = run_hook_in(temp.path(), Some(&rules), input);
    assert_eq!(first, second);
}

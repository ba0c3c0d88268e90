// Rust guideline compliant 2026-10-14

//! Regression tests for global output flags and exit codes.

use std::process::{Command, Output};
use tempfile::TempDir;

fn ldm(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ldm"))
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("run ldm")
}

fn init_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = ldm(&temp_dir, &["init"]);
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp_dir
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|err| {
        panic!("expected JSON output ({err}), got:\n{stdout}");
    })
}

#[test]
fn ldm_list_json_flag_outputs_json() {
    let temp_dir = init_repo();
    let output = ldm(&temp_dir, &["list", "--json"]);

    assert!(
        output.status.success(),
        "expected success, got status: {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    let value = stdout_json(&output);
    assert_eq!(value["total"], 0);
    assert_eq!(value["page"], 1);
}

#[test]
fn ldm_format_flag_selects_json() {
    let temp_dir = init_repo();
    let output = ldm(&temp_dir, &["--format", "json", "stats"]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["total"], 0);
}

#[test]
fn ldm_invalid_transition_exits_with_client_error() {
    let temp_dir = init_repo();
    let created = ldm(&temp_dir, &["create", "+92-300-1234567", "--json"]);
    assert!(created.status.success());
    let id = stdout_json(&created)["result"]["id"]
        .as_str()
        .expect("lead id")
        .to_string();

    let output = ldm(&temp_dir, &["update", &id, "--status", "qualified", "--json"]);

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output);
    assert_eq!(value["status"], "error");
    assert_eq!(value["code"], "invalid_transition");
    assert_eq!(value["details"]["from"], "pending");
    assert_eq!(value["details"]["allowed"], serde_json::json!(["calling", "dropped"]));
}

#[test]
fn ldm_missing_repo_exits_with_system_error() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = ldm(&temp_dir, &["stats", "--json"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["code"], "repo_not_initialized");
}

#[test]
fn ldm_transitions_json_needs_no_repo() {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = ldm(&temp_dir, &["transitions", "--json"]);

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["transitions"].as_array().map(Vec::len), Some(5));
}

#[test]
fn ldm_repo_flag_overrides_current_dir() {
    let repo_dir = init_repo();
    let elsewhere = TempDir::new().expect("temp dir");
    let repo_arg = repo_dir.path().to_string_lossy().to_string();

    let output = ldm(&elsewhere, &["--repo", &repo_arg, "list", "--json"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["total"], 0);
}

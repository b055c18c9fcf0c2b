//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "waymark-cli", "--"])
        .args(args)
        .env("WAYMARK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_sections_list() {
    let (stdout, _stderr, code) = run_cli(&["sections", "list"]);
    assert_eq!(code, 0, "sections list failed");
    for id in [
        "identity",
        "technical",
        "learning",
        "career",
        "projects",
        "networking",
        "brand",
    ] {
        assert!(stdout.contains(id), "missing section '{id}' in: {stdout}");
    }
}

#[test]
fn test_sections_show_json() {
    let (stdout, _stderr, code) = run_cli(&["sections", "show", "identity"]);
    assert_eq!(code, 0, "sections show failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("sections show must print JSON");
    assert_eq!(parsed["id"], "identity");
    assert!(parsed["questions"].as_array().unwrap().len() >= 4);
}

#[test]
fn test_sections_show_unknown_fails() {
    let (_stdout, stderr, code) = run_cli(&["sections", "show", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown section"));
}

#[test]
fn test_config_show_json() {
    let (stdout, _stderr, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config show must print JSON");
    assert!(parsed.get("wizard").is_some());
}

#[test]
fn test_config_get_timing() {
    let (stdout, _stderr, code) = run_cli(&["config", "get", "wizard.inspire_timeout_ms"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_answers_list() {
    let (_stdout, _stderr, code) = run_cli(&["answers", "list"]);
    assert_eq!(code, 0, "answers list failed");
}

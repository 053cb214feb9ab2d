//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusboard"))
        .args(args)
        .env("FOCUSBOARD_DATA_DIR", data_dir)
        .env_remove("FOCUSBOARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("stdout should be JSON")
}

#[test]
fn test_subject_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(dir.path(), &["subject", "add", "Math"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(dir.path(), &["subject", "add", "History"]);
    assert_eq!(code, 0);

    let (_, stderr, code) = run_cli(dir.path(), &["subject", "add", "Math"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));

    let (stdout, _, _) = run_cli(dir.path(), &["subject", "list", "--json"]);
    assert_eq!(json(&stdout), serde_json::json!(["Math", "History"]));

    let (_, _, code) = run_cli(dir.path(), &["subject", "remove", "Math"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["subject", "list", "--json"]);
    assert_eq!(json(&stdout), serde_json::json!(["History"]));
}

#[test]
fn test_task_add_toggle_delete() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["task", "add", "Read", "chapter", "3"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Added task #1"));
    run_cli(dir.path(), &["task", "add", "Flashcards"]);

    let (_, _, code) = run_cli(dir.path(), &["task", "toggle", "1"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    let tasks = json(&stdout);
    assert_eq!(tasks[0]["text"], "Read chapter 3");
    assert_eq!(tasks[0]["done"], true);
    assert!(tasks[0]["completedAt"].is_string());
    assert_eq!(tasks[1]["done"], false);
    assert!(tasks[1]["completedAt"].is_null());

    let (stdout, _, _) = run_cli(dir.path(), &["stats", "today", "--json"]);
    let stats = json(&stdout);
    assert_eq!(stats["tasks_completed_today"], 1);
    assert_eq!(stats["tasks_pending"], 1);

    let (_, stderr, code) = run_cli(dir.path(), &["task", "delete", "5"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no task #5"));

    let (_, _, code) = run_cli(dir.path(), &["task", "delete", "1"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["task", "list", "--json"]);
    assert_eq!(json(&stdout).as_array().unwrap().len(), 1);
}

#[test]
fn test_config_defaults_and_set() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.focus_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");
    assert!(dir.path().join("config.toml").exists());

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.break_minutes", "10"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.break_minutes"]);
    assert_eq!(stdout.trim(), "10");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.focus_minutes", "500"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, _) = run_cli(dir.path(), &["theme", "show"]);
    assert!(stdout.starts_with("light"));
    run_cli(dir.path(), &["theme", "toggle"]);
    let (stdout, _, _) = run_cli(dir.path(), &["theme", "show"]);
    assert!(stdout.starts_with("dark"));

    let (_, _, code) = run_cli(dir.path(), &["theme", "set", "purple"]);
    assert_ne!(code, 0);
}

#[test]
fn test_quote_prints_author_line() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["quote"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with('"'));
    assert!(stdout.contains("\n— "));
}

#[test]
fn test_timer_run_records_focus_session() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["subject", "add", "Math"]);

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &[
            "timer", "run", "--focus", "1", "--break", "1", "--subject", "Math", "--tick-ms", "1",
            "--json",
        ],
    );
    assert_eq!(code, 0, "timer run failed: {stderr}");

    let events: Vec<Value> = stdout.lines().map(json).collect();
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        [
            "PresetApplied",
            "TimerStarted",
            "PhaseCompleted",
            "TimerStarted",
            "PhaseCompleted",
            "StateSnapshot"
        ]
    );
    assert_eq!(events[0]["focus_secs"], 60);
    assert_eq!(events[0]["break_secs"], 60);
    assert_eq!(events[2]["credited_seconds"], 60);
    assert_eq!(events[2]["subject"], "Math");
    assert_eq!(events[5]["running"], false);

    let (stdout, _, _) = run_cli(dir.path(), &["stats", "today", "--json"]);
    let stats = json(&stdout);
    assert_eq!(stats["sessions"], 1);
    assert_eq!(stats["focus_seconds"], 60);
    assert_eq!(stats["subjects"][0]["name"], "Math");
    assert_eq!(stats["subjects"][0]["width_pct"], 100.0);
}

#[test]
fn test_timer_rejects_unknown_subject_and_bad_input() {
    let dir = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["timer", "run", "--subject", "Nope", "--json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown subject"));

    let (_, _, code) = run_cli(dir.path(), &["timer", "run", "--focus", "abc", "--json"]);
    assert_eq!(code, 1);
}

//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data dir
//! and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "quitmate-cli", "--"])
        .args(args)
        .env("QUITMATE_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn onboard(data_dir: &Path) {
    let (_, stderr, code) = run_cli(
        data_dir,
        &[
            "onboard",
            "--cigs-per-day",
            "20",
            "--pack-price-cents",
            "500",
            "--reason",
            "money",
            "--age",
            "30",
            "--years-smoking",
            "10",
        ],
    );
    assert_eq!(code, 0, "onboard failed: {stderr}");
}

#[test]
fn test_status_before_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Not onboarded"));
}

#[test]
fn test_onboard_then_status() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Saved:"));
    assert!(stdout.contains("Companion:"));
}

#[test]
fn test_status_json_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["status", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["onboardingCompleted"], serde_json::json!(true));
    assert!(parsed.get("savedCents").is_some());
}

#[test]
fn test_smoke_logs_a_cigarette() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["smoke"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CigaretteLogged"));

    let (stdout, _, code) = run_cli(dir.path(), &["status", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["cigarettesToday"], serde_json::json!(1));
}

#[test]
fn test_settings_show_and_set() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cigsPerDay"));

    let (_, _, code) = run_cli(
        dir.path(),
        &["settings", "set", "--pack-price-cents", "700", "--currency", "usd"],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["settings", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("700"));
    assert!(stdout.contains("USD"));
}

#[test]
fn test_pet_list_and_poor_buy() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["pet", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("hopper"));

    // Fresh account: no savings yet, purchase is refused politely.
    let (stdout, _, code) = run_cli(dir.path(), &["pet", "buy", "hopper"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Cannot buy"));

    let (_, stderr, code) = run_cli(dir.path(), &["pet", "buy", "unicorn"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown pet"));
}

#[test]
fn test_checkin_records_mood() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["checkin", "--mood", "zen"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("CheckinRecorded"));
}

#[test]
fn test_stats_week_and_health() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());
    let _ = run_cli(dir.path(), &["smoke", "--count", "2"]);

    let (stdout, _, code) = run_cli(dir.path(), &["stats", "week"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("today 2"));

    let (stdout, _, code) = run_cli(dir.path(), &["stats", "health"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("lungs"));
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--yes"));

    let (stdout, _, code) = run_cli(dir.path(), &["reset", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ProgressReset"));
}

#[test]
fn test_premium_status_and_demo_unlock() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["premium", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("inactive"));

    // No API key configured: the demo fallback unlocks premium.
    let (stdout, _, code) = run_cli(dir.path(), &["premium", "unlock"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Premium: active"));

    let (stdout, _, code) = run_cli(dir.path(), &["premium", "status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("active"));
}

#[test]
fn test_account_login_logout_delete() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["account", "login", "--email", "demo@quitmate.app", "--password", "x"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("LoggedIn"));

    let (stdout, _, code) = run_cli(dir.path(), &["account", "logout"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("LoggedOut"));

    let (stdout, _, code) = run_cli(dir.path(), &["account", "delete", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("AccountDeleted"));

    let (stdout, _, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Not onboarded"));
}

#[test]
fn test_watch_single_tick() {
    let dir = tempfile::tempdir().unwrap();
    onboard(dir.path());

    let (_, stderr, code) = run_cli(dir.path(), &["watch", "--ticks", "1"]);
    assert_eq!(code, 0, "watch failed: {stderr}");
}

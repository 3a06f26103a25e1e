use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const OFFLINE_API: &str = "http://127.0.0.1:9";

fn rosterctl(session_file: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("rosterctl");
    cmd.env_remove("ROSTER_API_URL")
        .env_remove("ROSTER_API_KEY")
        .env_remove("ROSTER_SESSION_FILE")
        .arg("--api-url")
        .arg(OFFLINE_API)
        .arg("--session-file")
        .arg(session_file);
    cmd
}

fn write_session(path: &Path) {
    let stored = format!(
        r#"{{"token":"QpwL5tke4Pnpja7X4","server_url":"{OFFLINE_API}/","stored_at":"2024-01-01T00:00:00Z"}}"#
    );
    std::fs::write(path, stored).unwrap();
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("rosterctl");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for sub in ["tui", "login", "logout", "status", "users"] {
        assert!(text.contains(sub), "help missing '{sub}'");
    }
    assert!(text.contains("--refresh"), "help missing --refresh");
}

#[test]
fn users_help_documents_actions() {
    let mut cmd = cargo_bin_cmd!("rosterctl");
    cmd.args(["users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"));

    let mut create = cargo_bin_cmd!("rosterctl");
    create
        .args(["users", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--first-name"))
        .stdout(predicate::str::contains("--avatar"));
}

#[test]
fn status_without_session_reports_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    rosterctl(&session)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in:    no"))
        .stdout(predicate::str::contains("127.0.0.1:9"));
}

#[test]
fn status_reads_stored_session() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session);
    rosterctl(&session)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in:    yes"));
}

#[test]
fn session_for_another_server_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session);
    let mut cmd = cargo_bin_cmd!("rosterctl");
    cmd.env_remove("ROSTER_API_URL")
        .arg("--api-url")
        .arg("http://127.0.0.1:10")
        .arg("--session-file")
        .arg(&session)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in:    no"));
}

#[test]
fn users_list_requires_login() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    rosterctl(&session)
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn delete_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session);
    rosterctl(&session)
        .args(["users", "delete", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delete User"))
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn create_rejects_invalid_fields_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    write_session(&session);
    rosterctl(&session)
        .args([
            "users",
            "create",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "not-an-email",
            "--avatar",
            "https://reqres.in/img/faces/1-image.jpg",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"))
        .stderr(predicate::str::contains("Email"));
}

#[test]
fn scripted_console_starts_on_login_screen() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let script = dir.path().join("script.txt");
    std::fs::write(&script, "# leave immediately\nesc\n").unwrap();

    rosterctl(&session)
        .env("ROSTERCTL_TUI_SCRIPT", &script)
        .env("ROSTER_LOG_FILE", dir.path().join("rosterctl.log"))
        .arg("tui")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign in"))
        .stdout(predicate::str::contains("eve.holt@reqres.in"));
}

#[test]
fn scripted_console_fails_when_script_runs_out() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");
    let script = dir.path().join("script.txt");
    std::fs::write(&script, "tab\n").unwrap();

    rosterctl(&session)
        .env("ROSTERCTL_TUI_SCRIPT", &script)
        .env("ROSTER_LOG_FILE", dir.path().join("rosterctl.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exhausted"));
}

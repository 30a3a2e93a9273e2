//! Binary smoke tests: argument handling, rendering and exit status

mod common;

use assert_cmd::Command;
use common::{story_json, user_json};
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn snooze(server: &MockServer, dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snooze").unwrap();
    cmd.env_remove("SNOOZE_API_BASE")
        .env_remove("SNOOZE_SESSION_BACKEND")
        .env_remove("SNOOZE_SESSION_FILE")
        .env_remove("SNOOZE_PASSWORD")
        .arg("--config")
        .arg(dir.join("missing.yaml"))
        .arg("--api-base")
        .arg(server.uri())
        .arg("--session-file")
        .arg(dir.join("session.json"))
        .arg("--no-color");
    cmd
}

async fn mount_stories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("abc123", "bob")]
        })))
        .mount(server)
        .await;
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("snooze")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("favorite"))
        .stdout(predicate::str::contains("shell"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stories_prints_list() {
    let server = MockServer::start().await;
    mount_stories(&server).await;
    let dir = tempdir().unwrap();

    snooze(&server, dir.path())
        .arg("stories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Story abc123"))
        .stdout(predicate::str::contains("(example.com)"))
        .stdout(predicate::str::contains("login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stories_as_html() {
    let server = MockServer::start().await;
    mount_stories(&server).await;
    let dir = tempdir().unwrap();

    snooze(&server, dir.path())
        .args(["--html", "stories"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<li id="abc123">"#))
        .stdout(predicate::str::contains("all-articles-list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session_for_next_run() {
    let server = MockServer::start().await;
    mount_stories(&server).await;
    let user = user_json("alice", vec![], vec![]);
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1", "user": user })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    snooze(&server, dir.path())
        .args(["login", "alice", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));
    assert!(dir.path().join("session.json").exists());

    snooze(&server, dir.path())
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Username: alice"));

    snooze(&server, dir.path()).arg("logout").assert().success();
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favorites_while_logged_out_fails_with_category() {
    let server = MockServer::start().await;
    mount_stories(&server).await;
    let dir = tempdir().unwrap();

    snooze(&server, dir.path())
        .arg("favorites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("login required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_password_exits_non_zero() {
    let server = MockServer::start().await;
    mount_stories(&server).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "title": "Unauthorized", "message": "Invalid password" }
        })))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    snooze(&server, dir.path())
        .args(["login", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid password"));
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_invalid_api_base_is_rejected() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("snooze")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("missing.yaml"))
        .args(["--api-base", "ftp://example.com", "stories"])
        .assert()
        .failure();
}

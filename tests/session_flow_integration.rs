//! End-to-end session behavior: HTTP client, file-backed session store and
//! session context working together against a mock server

mod common;

use common::{api_for, story_json, user_json};
use serde_json::json;
use snooze::api::NewStory;
use snooze::config::FavoriteUpdate;
use snooze::error::{classify, ErrorKind};
use snooze::session::{FileSessionStore, SessionContext, SessionStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer, session_file: &Path, update: FavoriteUpdate) -> SessionContext {
    SessionContext::new(
        Arc::new(api_for(server)),
        Box::new(FileSessionStore::new(session_file)),
        update,
    )
}

async fn mount_stories(server: &MockServer, ids: &[&str]) {
    let stories: Vec<_> = ids.iter().map(|id| story_json(id, "bob")).collect();
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stories": stories })))
        .mount(server)
        .await;
}

async fn mount_alice(server: &MockServer, own: Vec<serde_json::Value>) {
    let user = user_json("alice", vec![], own);
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1", "user": user })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .and(query_param("token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_survives_restart_and_logout_forgets_it() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s2", "s1"]).await;
    mount_alice(&server, vec![]).await;
    let dir = tempdir().unwrap();
    let file = dir.path().join("session.json");

    let mut first = context(&server, &file, FavoriteUpdate::Pessimistic);
    assert!(!first.hydrate().await.unwrap());
    let logged_in = first.login("alice", "pw").await.unwrap().clone();

    let mut second = context(&server, &file, FavoriteUpdate::Pessimistic);
    assert!(second.hydrate().await.unwrap());
    assert_eq!(second.user(), Some(&logged_in));
    assert_eq!(second.stories().len(), 2);

    second.logout();
    assert!(!file.exists());

    let mut third = context(&server, &file, FavoriteUpdate::Pessimistic);
    assert!(!third.hydrate().await.unwrap());
    assert!(third.user().is_none());
}

#[tokio::test]
async fn test_stale_token_starts_logged_out_but_keeps_store() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s1"]).await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let file = dir.path().join("session.json");
    FileSessionStore::new(&file)
        .save(&snooze::session::Session::new("stale", "alice"))
        .unwrap();

    let mut ctx = context(&server, &file, FavoriteUpdate::Pessimistic);
    assert!(!ctx.hydrate().await.unwrap());
    assert_eq!(ctx.stories().len(), 1);
    assert!(file.exists());
}

#[tokio::test]
async fn test_corrupt_session_file_starts_logged_out() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s1"]).await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(&file, "{not json").unwrap();

    let mut ctx = context(&server, &file, FavoriteUpdate::Pessimistic);
    assert!(!ctx.hydrate().await.unwrap());
    assert!(!ctx.is_logged_in());
    assert_eq!(ctx.stories().len(), 1);
}

#[tokio::test]
async fn test_new_story_is_listed_first_everywhere() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s2", "s1"]).await;
    mount_alice(&server, vec![story_json("old", "alice")]).await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "story": story_json("new1", "alice") })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let mut ctx = context(&server, &dir.path().join("s.json"), FavoriteUpdate::Pessimistic);
    ctx.hydrate().await.unwrap();
    ctx.login("alice", "pw").await.unwrap();
    ctx.add_story(&NewStory {
        author: "Me".into(),
        title: "Hello".into(),
        url: "https://example.com".into(),
    })
    .await
    .unwrap();

    assert_eq!(ctx.stories().as_slice()[0].story_id, "new1");
    let own = &ctx.user().unwrap().own_stories;
    assert_eq!(own[0].story_id, "new1");
    assert_eq!(own[1].story_id, "old");
}

#[tokio::test]
async fn test_deleted_story_is_gone_after_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("gone", "alice"), story_json("s1", "bob")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_stories(&server, &["s1"]).await;
    mount_alice(&server, vec![story_json("gone", "alice")]).await;
    Mock::given(method("DELETE"))
        .and(path("/stories/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let mut ctx = context(&server, &dir.path().join("s.json"), FavoriteUpdate::Pessimistic);
    ctx.hydrate().await.unwrap();
    ctx.login("alice", "pw").await.unwrap();
    ctx.remove_story("gone").await.unwrap();
    assert!(ctx.stories().get("gone").is_none());
    assert!(!ctx.user().unwrap().owns("gone"));

    let stories = ctx.refresh().await.unwrap();
    assert!(stories.get("gone").is_none());
    assert_eq!(stories.len(), 1);
}

#[tokio::test]
async fn test_double_toggle_restores_favorites() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s2", "s1"]).await;
    mount_alice(&server, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/users/alice/favorites/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/alice/favorites/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let mut ctx = context(&server, &dir.path().join("s.json"), FavoriteUpdate::Pessimistic);
    ctx.hydrate().await.unwrap();
    ctx.login("alice", "pw").await.unwrap();
    let before = ctx.user().unwrap().favorites.clone();

    assert!(ctx.toggle_favorite("s1").await.unwrap());
    assert!(ctx.is_favorite("s1"));
    assert!(!ctx.toggle_favorite("s1").await.unwrap());
    assert_eq!(ctx.user().unwrap().favorites, before);
}

#[tokio::test]
async fn test_optimistic_favorite_reverts_when_rejected() {
    let server = MockServer::start().await;
    mount_stories(&server, &["s1"]).await;
    mount_alice(&server, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/users/alice/favorites/s1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    let mut ctx = context(&server, &dir.path().join("s.json"), FavoriteUpdate::Optimistic);
    ctx.hydrate().await.unwrap();
    ctx.login("alice", "pw").await.unwrap();

    let err = ctx.favorite("s1").await.unwrap_err();
    assert_eq!(classify(&err), ErrorKind::Network);
    assert!(!ctx.is_favorite("s1"));
}

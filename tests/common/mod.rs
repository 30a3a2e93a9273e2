//! Shared helpers for integration tests
//!
//! JSON payloads shaped like the Hack or Snooze v3 API, plus a client
//! pointed at a wiremock server.

#![allow(dead_code)]

use serde_json::{json, Value};
use snooze::api::HttpStoryApi;
use snooze::config::ApiConfig;
use wiremock::MockServer;

/// A story as the API returns it
pub fn story_json(id: &str, username: &str) -> Value {
    json!({
        "storyId": id,
        "author": format!("Author {}", id),
        "title": format!("Story {}", id),
        "url": format!("https://www.example.com/{}", id),
        "username": username,
        "createdAt": "2021-03-04T05:06:07.000Z",
        "updatedAt": "2021-03-04T05:06:07.000Z"
    })
}

/// A user as the API returns it
pub fn user_json(username: &str, favorites: Vec<Value>, stories: Vec<Value>) -> Value {
    json!({
        "username": username,
        "name": format!("{} Example", username),
        "createdAt": "2020-01-02T03:04:05.000Z",
        "updatedAt": "2020-01-02T03:04:05.000Z",
        "favorites": favorites,
        "stories": stories
    })
}

/// An API error body
pub fn error_json(status: u16, title: &str, message: &str) -> Value {
    json!({ "error": { "status": status, "title": title, "message": message } })
}

/// Client for the mock server
pub fn api_for(server: &MockServer) -> HttpStoryApi {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
        ..ApiConfig::default()
    };
    HttpStoryApi::new(&config).expect("mock server uri is a valid base")
}

//! Test utilities for Snooze
//!
//! Builders for the domain models used throughout the unit tests.

use chrono::{TimeZone, Utc};

use crate::api::{Story, User};

/// A story with predictable fields derived from `id`
///
/// # Examples
///
/// ```ignore
/// let s = story("abc123");
/// assert_eq!(s.story_id, "abc123");
/// ```
pub fn story(id: &str) -> Story {
    Story {
        story_id: id.to_string(),
        author: format!("Author {}", id),
        title: format!("Story {}", id),
        url: format!("https://www.example.com/{}", id),
        username: "poster".to_string(),
        created_at: None,
        updated_at: None,
    }
}

/// A user with no favorites or stories, created 2020-01-02
pub fn user(username: &str) -> User {
    User {
        username: username.to_string(),
        name: format!("{} Example", username),
        created_at: Utc
            .with_ymd_and_hms(2020, 1, 2, 3, 4, 5)
            .single()
            .expect("valid timestamp"),
        favorites: Vec::new(),
        own_stories: Vec::new(),
    }
}

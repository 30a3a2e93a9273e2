//! Domain models exchanged with the Hack or Snooze API
//!
//! Field names follow the API's camelCase JSON so the same types are used
//! on the wire and in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// A user-submitted link, identified by `story_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Server-assigned identifier
    pub story_id: String,
    /// Author credited in the submission form
    pub author: String,
    /// Headline
    pub title: String,
    /// Link target
    pub url: String,
    /// Account that posted the story
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields of the story submission form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub author: String,
    pub title: String,
    pub url: String,
}

impl NewStory {
    /// Names of the form fields left empty (after trimming)
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.author.trim().is_empty() {
            missing.push("author");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.url.trim().is_empty() {
            missing.push("url");
        }
        missing
    }
}

/// A Hack or Snooze account with its favorites and own stories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    /// Stories posted by this user; the API calls this list `stories`
    #[serde(default, rename = "stories")]
    pub own_stories: Vec<Story>,
}

impl User {
    /// Whether `story_id` is among this user's favorites
    pub fn has_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    /// Whether this user posted `story_id`
    pub fn owns(&self, story_id: &str) -> bool {
        self.own_stories.iter().any(|s| s.story_id == story_id)
    }
}

/// Result of a successful login or signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedIn {
    pub session: Session,
    pub user: User,
}

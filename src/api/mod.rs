//! Hack or Snooze API abstraction
//!
//! [`StoryApi`] lists exactly the remote operations the client consumes.
//! [`HttpStoryApi`] is the production implementation; tests substitute
//! a mock or a wiremock server.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::Session;

pub mod http;
pub mod types;

pub use http::HttpStoryApi;
pub use types::{LoggedIn, NewStory, Story, User};

/// Remote operations backing the client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// Exchange credentials for a session and the user's profile
    ///
    /// # Errors
    ///
    /// `Authentication` when the credentials are rejected
    async fn login(&self, username: &str, password: &str) -> Result<LoggedIn>;

    /// Register a new account and log it in
    ///
    /// # Errors
    ///
    /// `Validation` when the username is taken or a field is rejected
    async fn create_user(&self, username: &str, password: &str, name: &str) -> Result<LoggedIn>;

    /// Resolve a persisted session back into a user
    ///
    /// Returns `Ok(None)` when the token is no longer accepted or the
    /// account is gone.
    async fn get_logged_in_user(&self, session: &Session) -> Result<Option<User>>;

    /// Fetch the current story list, newest first
    async fn get_stories(&self) -> Result<Vec<Story>>;

    /// Post a story as the session's user
    async fn add_story(&self, session: &Session, story: &NewStory) -> Result<Story>;

    /// Delete one of the session user's stories
    async fn delete_story(&self, session: &Session, story_id: &str) -> Result<()>;

    /// Add a story to the session user's favorites
    async fn favorite_story(&self, session: &Session, story_id: &str) -> Result<()>;

    /// Remove a story from the session user's favorites
    async fn unfavorite_story(&self, session: &Session, story_id: &str) -> Result<()>;
}

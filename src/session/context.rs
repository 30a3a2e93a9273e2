//! Session context: the logged-in user, the story cache and the rules
//! that keep both consistent with the API and the persisted session
//!
//! The context is created once per run, hydrated from the session store on
//! startup and torn down by [`SessionContext::logout`]. Every mutation goes
//! through the API first (or, for optimistic favorite updates, is reverted
//! when the API rejects it), so a failed call never leaves the in-memory
//! model disagreeing with what the server accepted.

use std::sync::Arc;

use crate::api::{NewStory, Story, StoryApi, User};
use crate::config::FavoriteUpdate;
use crate::error::{Result, SnoozeError};
use crate::session::{Session, SessionStore, StoryCollection};

/// A logged-in user together with the session that authenticates it
#[derive(Debug, Clone)]
struct ActiveUser {
    session: Session,
    user: User,
}

/// Explicit replacement for page-global user and story state
pub struct SessionContext {
    api: Arc<dyn StoryApi>,
    store: Box<dyn SessionStore>,
    favorite_update: FavoriteUpdate,
    active: Option<ActiveUser>,
    stories: StoryCollection,
}

impl SessionContext {
    pub fn new(
        api: Arc<dyn StoryApi>,
        store: Box<dyn SessionStore>,
        favorite_update: FavoriteUpdate,
    ) -> Self {
        Self {
            api,
            store,
            favorite_update,
            active: None,
            stories: StoryCollection::default(),
        }
    }

    /// Current user, if logged in
    pub fn user(&self) -> Option<&User> {
        self.active.as_ref().map(|a| &a.user)
    }

    /// Current session, if logged in
    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    /// Most recently fetched story list
    pub fn stories(&self) -> &StoryCollection {
        &self.stories
    }

    pub fn favorite_update(&self) -> FavoriteUpdate {
        self.favorite_update
    }

    /// Whether the current user has favorited `story_id`
    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.user().is_some_and(|u| u.has_favorite(story_id))
    }

    /// Restore the user from the persisted session, then fetch stories
    ///
    /// A missing session, an unreadable store, a rejected token or a failed
    /// lookup all leave the context logged out; none is retried. Returns
    /// whether a user was restored.
    ///
    /// # Errors
    ///
    /// Only the story fetch can fail this call.
    pub async fn hydrate(&mut self) -> Result<bool> {
        self.active = None;

        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Could not read stored session: {:#}", e);
                None
            }
        };

        if let Some(session) = stored {
            match self.api.get_logged_in_user(&session).await {
                Ok(Some(user)) => {
                    tracing::info!("Restored session for {}", user.username);
                    self.active = Some(ActiveUser { session, user });
                }
                Ok(None) => {
                    tracing::info!("Stored session for {} was not accepted", session.username);
                }
                Err(e) => {
                    tracing::warn!("Could not restore session for {}: {:#}", session.username, e);
                }
            }
        } else {
            tracing::debug!("No stored session");
        }

        self.refresh().await?;
        Ok(self.active.is_some())
    }

    /// Log in with existing credentials and persist the session
    ///
    /// # Errors
    ///
    /// `Validation` for an empty field (no request is made), or whatever the
    /// API reports.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        require_fields(&[("username", username), ("password", password)])?;
        let logged_in = self.api.login(username, password).await?;
        Ok(self.start_session(logged_in.session, logged_in.user))
    }

    /// Create an account, log it in and persist the session
    ///
    /// # Errors
    ///
    /// `Validation` for an empty field (no request is made), or whatever the
    /// API reports.
    pub async fn signup(&mut self, name: &str, username: &str, password: &str) -> Result<&User> {
        require_fields(&[("name", name), ("username", username), ("password", password)])?;
        let logged_in = self.api.create_user(username, password, name).await?;
        Ok(self.start_session(logged_in.session, logged_in.user))
    }

    fn start_session(&mut self, session: Session, user: User) -> &User {
        if let Err(e) = self.store.save(&session) {
            tracing::warn!("Could not persist session for {}: {:#}", session.username, e);
        }
        &self.active.insert(ActiveUser { session, user }).user
    }

    /// Forget the persisted session and drop all in-memory state
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Could not clear stored session: {:#}", e);
        }
        if let Some(active) = self.active.take() {
            tracing::info!("Logged out {}", active.user.username);
        }
        self.stories.clear();
    }

    /// Re-fetch the story list, replacing the cache wholesale
    pub async fn refresh(&mut self) -> Result<&StoryCollection> {
        let stories = self.api.get_stories().await?;
        self.stories.replace(stories);
        Ok(&self.stories)
    }

    /// Post a story and prepend it to the story list and the user's stories
    ///
    /// # Errors
    ///
    /// `Authentication` when logged out, `Validation` when a field is empty;
    /// in both cases no request is made.
    pub async fn add_story(&mut self, new_story: &NewStory) -> Result<Story> {
        let session = self.require_session("submit a story")?;
        let missing = new_story.missing_fields();
        if !missing.is_empty() {
            return Err(
                SnoozeError::Validation(format!("missing {}", missing.join(", "))).into(),
            );
        }

        let story = self.api.add_story(&session, new_story).await?;
        tracing::info!("Posted story {}", story.story_id);

        self.stories.prepend(story.clone());
        if let Some(active) = self.active.as_mut() {
            active.user.own_stories.insert(0, story.clone());
        }
        Ok(story)
    }

    /// Delete one of the user's stories everywhere it is cached
    ///
    /// # Errors
    ///
    /// `Authentication` when logged out, or whatever the API reports; the
    /// caches are untouched on failure.
    pub async fn remove_story(&mut self, story_id: &str) -> Result<()> {
        let session = self.require_session("delete a story")?;
        self.api.delete_story(&session, story_id).await?;
        tracing::info!("Deleted story {}", story_id);

        if let Some(active) = self.active.as_mut() {
            active.user.own_stories.retain(|s| s.story_id != story_id);
            active.user.favorites.retain(|s| s.story_id != story_id);
        }
        self.stories.remove(story_id);
        Ok(())
    }

    /// Add `story_id` to the user's favorites
    ///
    /// Already-favorite stories are left alone without a request.
    ///
    /// # Errors
    ///
    /// `Authentication` when logged out, `NotFound` when the story is not in
    /// any cached list, or whatever the API reports. Favorites are unchanged
    /// after an error.
    pub async fn favorite(&mut self, story_id: &str) -> Result<()> {
        let session = self.require_session("favorite a story")?;
        if self.is_favorite(story_id) {
            return Ok(());
        }
        let story = self
            .find_story(story_id)
            .cloned()
            .ok_or_else(|| SnoozeError::NotFound(format!("story {}", story_id)))?;

        match self.favorite_update {
            FavoriteUpdate::Pessimistic => {
                self.api.favorite_story(&session, story_id).await?;
                self.favorites_mut()?.push(story);
            }
            FavoriteUpdate::Optimistic => {
                self.favorites_mut()?.push(story);
                if let Err(e) = self.api.favorite_story(&session, story_id).await {
                    tracing::warn!("Favorite of {} rejected, reverting", story_id);
                    self.favorites_mut()?.retain(|s| s.story_id != story_id);
                    return Err(e);
                }
            }
        }
        tracing::debug!("Favorited {}", story_id);
        Ok(())
    }

    /// Remove `story_id` from the user's favorites
    ///
    /// Stories that are not favorites are left alone without a request.
    ///
    /// # Errors
    ///
    /// `Authentication` when logged out, or whatever the API reports.
    /// Favorites are unchanged after an error.
    pub async fn unfavorite(&mut self, story_id: &str) -> Result<()> {
        let session = self.require_session("unfavorite a story")?;
        let Some(index) = self
            .user()
            .and_then(|u| u.favorites.iter().position(|s| s.story_id == story_id))
        else {
            return Ok(());
        };

        match self.favorite_update {
            FavoriteUpdate::Pessimistic => {
                self.api.unfavorite_story(&session, story_id).await?;
                self.favorites_mut()?.remove(index);
            }
            FavoriteUpdate::Optimistic => {
                let story = self.favorites_mut()?.remove(index);
                if let Err(e) = self.api.unfavorite_story(&session, story_id).await {
                    tracing::warn!("Unfavorite of {} rejected, reverting", story_id);
                    self.favorites_mut()?.insert(index, story);
                    return Err(e);
                }
            }
        }
        tracing::debug!("Unfavorited {}", story_id);
        Ok(())
    }

    /// Flip the favorite state of `story_id`, returning the new state
    pub async fn toggle_favorite(&mut self, story_id: &str) -> Result<bool> {
        if self.is_favorite(story_id) {
            self.unfavorite(story_id).await?;
            Ok(false)
        } else {
            self.favorite(story_id).await?;
            Ok(true)
        }
    }

    fn require_session(&self, action: &str) -> Result<Session> {
        self.session()
            .cloned()
            .ok_or_else(|| SnoozeError::Authentication(format!("log in to {}", action)).into())
    }

    fn find_story(&self, story_id: &str) -> Option<&Story> {
        self.stories.get(story_id).or_else(|| {
            self.user().and_then(|u| {
                u.own_stories
                    .iter()
                    .chain(u.favorites.iter())
                    .find(|s| s.story_id == story_id)
            })
        })
    }

    fn favorites_mut(&mut self) -> Result<&mut Vec<Story>> {
        self.active
            .as_mut()
            .map(|a| &mut a.user.favorites)
            .ok_or_else(|| SnoozeError::Authentication("not logged in".into()).into())
    }
}

fn require_fields(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SnoozeError::Validation(format!("missing {}", missing.join(", "))).into())
    }
}

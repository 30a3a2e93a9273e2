//! Event routing
//!
//! [`App`] has one handler per user action of the original page (form
//! submissions, navigation clicks, star and trash clicks). Each handler
//! updates the [`SessionContext`] and the visible [`Panel`], then returns
//! the freshly derived [`Screen`]. A handler that fails leaves the panel
//! where it was and hands the error back for display.

use crate::api::NewStory;
use crate::error::{Result, SnoozeError};
use crate::session::SessionContext;
use crate::view::{build_screen, Panel, Screen};

/// Login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Create-account form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Session context plus the currently visible panel
pub struct App {
    ctx: SessionContext,
    panel: Panel,
}

impl App {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            panel: Panel::AllStories,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Current screen, derived from state
    pub fn screen(&self) -> Screen {
        build_screen(self.panel, self.ctx.user(), self.ctx.stories().as_slice())
    }

    /// Startup: restore any stored session and show the story list
    pub async fn start(&mut self) -> Result<Screen> {
        let restored = self.ctx.hydrate().await?;
        tracing::debug!(restored, "Startup complete");
        self.panel = Panel::AllStories;
        Ok(self.screen())
    }

    /// Login form submitted
    pub async fn submit_login(&mut self, form: &LoginForm) -> Result<Screen> {
        self.ctx.login(&form.username, &form.password).await?;
        self.panel = Panel::AllStories;
        Ok(self.screen())
    }

    /// Create-account form submitted
    pub async fn submit_signup(&mut self, form: &SignupForm) -> Result<Screen> {
        self.ctx
            .signup(&form.name, &form.username, &form.password)
            .await?;
        self.panel = Panel::AllStories;
        Ok(self.screen())
    }

    /// Log out, then start over as an anonymous visitor
    pub async fn logout(&mut self) -> Result<Screen> {
        self.ctx.logout();
        self.start().await
    }

    /// "login" link: toggles the login and create-account forms
    pub fn nav_login(&mut self) -> Screen {
        self.panel = if self.panel == Panel::Auth {
            Panel::AllStories
        } else {
            Panel::Auth
        };
        self.screen()
    }

    /// "all" link: re-fetch and show every story
    pub async fn nav_all(&mut self) -> Result<Screen> {
        self.ctx.refresh().await?;
        self.panel = Panel::AllStories;
        Ok(self.screen())
    }

    /// "submit" link: toggles the story form above the list
    pub fn nav_submit(&mut self) -> Result<Screen> {
        let next = if self.panel == Panel::SubmitForm {
            Panel::AllStories
        } else {
            Panel::SubmitForm
        };
        self.show(next)
    }

    /// Story form submitted
    ///
    /// An empty field aborts before any request and leaves the screen as it
    /// was.
    pub async fn submit_story(&mut self, story: &NewStory) -> Result<Screen> {
        self.ctx.add_story(story).await?;
        if self.panel != Panel::SubmitForm {
            self.panel = Panel::AllStories;
        }
        Ok(self.screen())
    }

    /// Star clicked: flip the favorite state of the story
    pub async fn click_star(&mut self, story_id: &str) -> Result<Screen> {
        let starred = self.ctx.toggle_favorite(story_id).await?;
        tracing::debug!(story_id, starred, "Star toggled");
        Ok(self.screen())
    }

    /// Mark a story as favorite without toggling
    pub async fn favorite(&mut self, story_id: &str) -> Result<Screen> {
        self.ctx.favorite(story_id).await?;
        Ok(self.screen())
    }

    /// Remove a story from favorites without toggling
    pub async fn unfavorite(&mut self, story_id: &str) -> Result<Screen> {
        self.ctx.unfavorite(story_id).await?;
        Ok(self.screen())
    }

    /// "favorites" link
    pub fn nav_favorites(&mut self) -> Result<Screen> {
        self.show(Panel::Favorites)
    }

    /// "my stories" link
    pub fn nav_my_stories(&mut self) -> Result<Screen> {
        self.show(Panel::OwnStories)
    }

    /// Trash can clicked on one of the user's stories
    ///
    /// Only stories the user posted carry a trash can, so any other id is
    /// rejected without a request.
    pub async fn click_trash(&mut self, story_id: &str) -> Result<Screen> {
        let user = self
            .ctx
            .user()
            .ok_or_else(|| SnoozeError::Authentication("log in to delete a story".into()))?;
        if !user.owns(story_id) {
            return Err(
                SnoozeError::NotFound(format!("story {} is not one of yours", story_id)).into(),
            );
        }
        self.ctx.remove_story(story_id).await?;
        Ok(self.screen())
    }

    /// Username link: profile panel
    pub fn nav_profile(&mut self) -> Result<Screen> {
        self.show(Panel::Profile)
    }

    fn show(&mut self, panel: Panel) -> Result<Screen> {
        if panel.requires_login() && !self.ctx.is_logged_in() {
            return Err(SnoozeError::Authentication("log in first".into()).into());
        }
        self.panel = panel;
        Ok(self.screen())
    }
}

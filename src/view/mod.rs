//! View layer
//!
//! State is turned into plain view-models ([`Screen`], [`StoryItem`], ...)
//! by pure functions, and the view-models are rendered either to HTML
//! (through the typed [`node::Node`] tree) or to the terminal. Nothing
//! here keeps state: the star on each story is re-derived from the user's
//! favorites on every render.

use crate::api::{Story, User};

pub mod html;
pub mod node;
pub mod terminal;

pub use html::render_html;
pub use node::{Element, Node};
pub use terminal::render_terminal;

/// Message shown for an empty favorites list
pub const NO_FAVORITES: &str = "No favorites added!";
/// Message shown for an empty own-stories list
pub const NO_OWN_STORIES: &str = "No stories added by user yet!";

/// Mutually exclusive page regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Full story list
    #[default]
    AllStories,
    /// Login and create-account forms
    Auth,
    /// Story submission form above the story list
    SubmitForm,
    /// Current user's favorites
    Favorites,
    /// Current user's own stories, with delete controls
    OwnStories,
    /// Current user's profile
    Profile,
}

impl Panel {
    /// Whether showing this panel requires a logged-in user
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Panel::SubmitForm | Panel::Favorites | Panel::OwnStories | Panel::Profile
        )
    }
}

/// One story, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryItem {
    pub story_id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub hostname: String,
    pub username: String,
    /// Filled star: the story is among the user's favorites
    pub starred: bool,
    /// Shows a delete control (own-stories view only)
    pub deletable: bool,
}

impl StoryItem {
    pub fn new(story: &Story, starred: bool, deletable: bool) -> Self {
        Self {
            story_id: story.story_id.clone(),
            title: story.title.clone(),
            url: story.url.clone(),
            author: story.author.clone(),
            hostname: hostname(&story.url),
            username: story.username.clone(),
            starred,
            deletable,
        }
    }
}

/// Build items for `stories`, starring each one the user has favorited
///
/// Stars are looked up in `user.favorites` for every story, so the result
/// is always in step with the model.
pub fn story_items<'a, I>(stories: I, user: Option<&User>, deletable: bool) -> Vec<StoryItem>
where
    I: IntoIterator<Item = &'a Story>,
{
    stories
        .into_iter()
        .map(|story| {
            let starred = user.is_some_and(|u| u.has_favorite(&story.story_id));
            StoryItem::new(story, starred, deletable)
        })
        .collect()
}

/// Profile panel contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub username: String,
    pub created_at: String,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

/// Navigation bar; links beyond "all" only appear when logged in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavBar {
    pub username: Option<String>,
}

/// A block of page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// List of stories under the given region id
    StoryList {
        region: &'static str,
        items: Vec<StoryItem>,
    },
    /// Placeholder text under the given region id
    Message {
        region: &'static str,
        text: &'static str,
    },
    LoginForm,
    SignupForm,
    SubmitForm,
    Profile(ProfileView),
}

/// Everything visible at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub nav: NavBar,
    pub panel: Panel,
    pub sections: Vec<Section>,
}

/// Region ids, matching the page the client was modelled on
pub mod region {
    pub const ALL_STORIES: &str = "all-articles-list";
    pub const FAVORITES: &str = "favorited-articles";
    pub const OWN_STORIES: &str = "my-articles";
}

/// Derive the screen for `panel` from the current user and story list
///
/// Panels that need a user fall back to the story list when logged out.
pub fn build_screen(panel: Panel, user: Option<&User>, stories: &[Story]) -> Screen {
    let all_stories = || Section::StoryList {
        region: region::ALL_STORIES,
        items: story_items(stories, user, false),
    };

    let sections = match (panel, user) {
        (Panel::AllStories, _) => vec![all_stories()],
        (Panel::Auth, _) => vec![Section::LoginForm, Section::SignupForm],
        (Panel::SubmitForm, Some(_)) => vec![Section::SubmitForm, all_stories()],
        (Panel::Favorites, Some(u)) if u.favorites.is_empty() => vec![Section::Message {
            region: region::FAVORITES,
            text: NO_FAVORITES,
        }],
        (Panel::Favorites, Some(u)) => vec![Section::StoryList {
            region: region::FAVORITES,
            items: story_items(&u.favorites, Some(u), false),
        }],
        (Panel::OwnStories, Some(u)) if u.own_stories.is_empty() => vec![Section::Message {
            region: region::OWN_STORIES,
            text: NO_OWN_STORIES,
        }],
        (Panel::OwnStories, Some(u)) => vec![Section::StoryList {
            region: region::OWN_STORIES,
            items: story_items(&u.own_stories, Some(u), true),
        }],
        (Panel::Profile, Some(u)) => vec![Section::Profile(ProfileView::from(u))],
        (_, None) => vec![all_stories()],
    };

    Screen {
        nav: NavBar {
            username: user.map(|u| u.username.clone()),
        },
        panel,
        sections,
    }
}

/// Host part of a story URL, without a leading `www.`
///
/// # Examples
///
/// ```
/// use snooze::view::hostname;
///
/// assert_eq!(hostname("https://www.rust-lang.org/learn"), "rust-lang.org");
/// assert_eq!(hostname("example.com/page"), "example.com");
/// ```
pub fn hostname(url: &str) -> String {
    let rest = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => url,
    };
    let host = rest.split('/').next().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

//! Snooze - terminal client library for the Hack or Snooze story board
//!
//! Browse stories, log in or create an account, post and delete stories,
//! and keep a list of favorites, all against the Hack or Snooze v3 API.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Domain models and the HTTP client for the remote API
//! - `session`: Session persistence, the story collection and the
//!   session context that ties them together
//! - `view`: Pure view-models plus HTML and terminal renderers
//! - `ui`: One handler per user action, returning the next screen
//! - `commands`: CLI command handlers and the interactive shell
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use snooze::commands::build_app;
//! use snooze::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let mut app = build_app(&config)?;
//!     let screen = app.start().await?;
//!     print!("{}", snooze::view::render_terminal(&screen));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use api::{HttpStoryApi, NewStory, Story, StoryApi, User};
pub use config::Config;
pub use error::{Result, SnoozeError};
pub use session::{SessionContext, StoryCollection};
pub use ui::App;

#[cfg(test)]
pub mod test_utils;

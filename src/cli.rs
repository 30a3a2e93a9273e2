//! Command-line interface definition for Snooze
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Snooze - terminal client for Hack or Snooze
///
/// Browse, post and favorite stories. The login session is remembered
/// between runs until `snooze logout`.
#[derive(Parser, Debug, Clone)]
#[command(name = "snooze")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// Override the session file location
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print HTML instead of terminal text
    #[arg(long)]
    pub html: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Snooze
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Account username
        username: String,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and log it in
    Signup {
        /// Display name
        name: String,

        /// Account username
        username: String,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "SNOOZE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// List all stories
    Stories,

    /// Post a new story
    Submit {
        /// Author credited for the story
        #[arg(short, long)]
        author: String,

        /// Story title
        #[arg(short, long)]
        title: String,

        /// Story link
        #[arg(short, long)]
        url: String,
    },

    /// Add a story to your favorites
    Favorite {
        /// Story id
        story_id: String,
    },

    /// Remove a story from your favorites
    Unfavorite {
        /// Story id
        story_id: String,
    },

    /// Delete one of your stories
    Delete {
        /// Story id
        story_id: String,
    },

    /// List your favorite stories
    Favorites,

    /// List the stories you posted
    Mine,

    /// Show your profile
    Profile,

    /// Interactive session
    Shell,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

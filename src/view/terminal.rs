//! Terminal rendering of view-models

use colored::Colorize;
use std::fmt::Write;

use super::{NavBar, ProfileView, Screen, Section, StoryItem};

const STAR_FILLED: &str = "★";
const STAR_EMPTY: &str = "☆";

/// One story as two terminal lines
pub fn story_lines(item: &StoryItem) -> String {
    let star = if item.starred {
        STAR_FILLED.yellow().to_string()
    } else {
        STAR_EMPTY.dimmed().to_string()
    };
    let trash = if item.deletable {
        format!("  {}", "[delete]".red())
    } else {
        String::new()
    };
    format!(
        "{} {} {}\n    by {} | posted by {} | {}{}",
        star,
        item.title.bold(),
        format!("({})", item.hostname).dimmed(),
        item.author,
        item.username,
        item.story_id.cyan(),
        trash
    )
}

fn nav_line(nav: &NavBar) -> String {
    let brand = "Hack or Snooze".bold();
    match &nav.username {
        Some(username) => format!(
            "{} | all | submit | favorites | my stories | {} | logout",
            brand,
            username.green()
        ),
        None => format!("{} | all | login", brand),
    }
}

fn profile_lines(profile: &ProfileView) -> String {
    format!(
        "{}\n  Name: {}\n  Username: {}\n  Account Created: {}",
        "User Profile Info".bold(),
        profile.name,
        profile.username,
        profile.created_at
    )
}

fn section_text(section: &Section) -> String {
    match section {
        Section::StoryList { items, .. } if items.is_empty() => "(no stories)".dimmed().to_string(),
        Section::StoryList { items, .. } => items
            .iter()
            .map(story_lines)
            .collect::<Vec<_>>()
            .join("\n"),
        Section::Message { text, .. } => text.yellow().to_string(),
        Section::LoginForm => format!(
            "{}  login <username> [password]",
            "Login:".bold()
        ),
        Section::SignupForm => format!(
            "{}  signup <name> <username> [password]",
            "Create account:".bold()
        ),
        Section::SubmitForm => format!(
            "{}  submit <author> | <title> | <url>",
            "Submit a story:".bold()
        ),
        Section::Profile(profile) => profile_lines(profile),
    }
}

/// Render a screen as terminal text
pub fn render_terminal(screen: &Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", nav_line(&screen.nav));
    let _ = writeln!(out, "{}", "─".repeat(60).dimmed());
    for section in &screen.sections {
        let _ = writeln!(out, "{}", section_text(section));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{story, user};
    use crate::view::{build_screen, Panel, NO_OWN_STORIES};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_story_lines_show_star_state() {
        plain();
        let s = story("abc123");
        let hollow = story_lines(&StoryItem::new(&s, false, false));
        let filled = story_lines(&StoryItem::new(&s, true, false));
        assert!(hollow.starts_with(STAR_EMPTY));
        assert!(filled.starts_with(STAR_FILLED));
        assert!(hollow.contains("abc123"));
        assert!(hollow.contains("(example.com)"));
    }

    #[test]
    fn test_delete_marker_only_for_own_stories() {
        plain();
        let s = story("abc123");
        assert!(story_lines(&StoryItem::new(&s, false, true)).contains("[delete]"));
        assert!(!story_lines(&StoryItem::new(&s, false, false)).contains("[delete]"));
    }

    #[test]
    fn test_render_logged_in_screen() {
        plain();
        let alice = user("alice");
        let screen = build_screen(Panel::OwnStories, Some(&alice), &[]);
        let text = render_terminal(&screen);
        assert!(text.contains("my stories"));
        assert!(text.contains("alice"));
        assert!(text.contains(NO_OWN_STORIES));
    }

    #[test]
    fn test_render_profile() {
        plain();
        let alice = user("alice");
        let screen = build_screen(Panel::Profile, Some(&alice), &[]);
        let text = render_terminal(&screen);
        assert!(text.contains("Username: alice"));
        assert!(text.contains("Account Created: 2020-01-02"));
    }
}

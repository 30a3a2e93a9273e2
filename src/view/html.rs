//! HTML rendering of view-models
//!
//! Markup follows the classic Hack or Snooze page: stories are `li`
//! elements keyed by story id, with a Font Awesome star (`fas` filled,
//! `far` hollow) and an optional trash can.

use url::Url;

use super::node::{Element, Node};
use super::{NavBar, ProfileView, Screen, Section, StoryItem};

/// Star icon classes for a story
pub fn star_class(starred: bool) -> &'static str {
    if starred {
        "fa-star fas"
    } else {
        "fa-star far"
    }
}

/// Link target for a story URL; only http(s) URLs become links
pub fn safe_href(url: &str) -> Option<&str> {
    Url::parse(url)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|_| url)
}

fn story_link(item: &StoryItem) -> Element {
    let link = Element::new("a").class("article-link");
    let link = match safe_href(&item.url) {
        Some(href) => link.attr("href", href).attr("target", "a_blank"),
        None => link,
    };
    link.child(Element::new("strong").text(item.title.clone()))
}

/// `li` element for one story
pub fn story_node(item: &StoryItem) -> Element {
    let mut li = Element::new("li").id(item.story_id.clone());
    if item.deletable {
        li = li.child(
            Element::new("span")
                .class("trash-can")
                .child(Element::new("i").class("fa-trash-alt fas")),
        );
    }
    li.child(
        Element::new("span")
            .class("star")
            .child(Element::new("i").class(star_class(item.starred))),
    )
    .child(story_link(item))
    .child(
        Element::new("small")
            .class("article-author")
            .text(format!("by {}", item.author)),
    )
    .child(
        Element::new("small")
            .class(format!("article-hostname {}", item.hostname))
            .text(format!("({})", item.hostname)),
    )
    .child(
        Element::new("small")
            .class("article-username")
            .text(format!("posted by {}", item.username)),
    )
}

fn nav_node(nav: &NavBar) -> Element {
    let link = |id: &str, label: &str| {
        Element::new("a")
            .class("nav-link")
            .attr("href", "#")
            .id(id.to_string())
            .text(label.to_string())
    };

    let mut el = Element::new("nav")
        .child(Element::new("b").text("Hack or Snooze"))
        .child(link("nav-all", "all"));

    match &nav.username {
        Some(username) => {
            el = el
                .child(
                    Element::new("section")
                        .class("main-nav-links")
                        .child(link("nav-submit", "submit"))
                        .child(link("nav-favorites", "favorites"))
                        .child(link("nav-my-stories", "my stories")),
                )
                .child(link("nav-user-profile", username))
                .child(link("nav-logout", "log out"));
        }
        None => {
            el = el.child(link("nav-login", "login/create user"));
        }
    }
    el
}

fn input(id: &str, kind: &str) -> Element {
    Element::new("input")
        .id(id.to_string())
        .attr("type", kind.to_string())
}

fn form(id: &str, fields: &[(&str, &str, &str)], button: &str) -> Element {
    let mut el = Element::new("form").id(id.to_string());
    for (field_id, label, kind) in fields {
        el = el.child(
            Element::new("div")
                .child(
                    Element::new("label")
                        .attr("for", field_id.to_string())
                        .text(label.to_string()),
                )
                .child(input(field_id, kind)),
        );
    }
    el.child(
        Element::new("button")
            .attr("type", "submit")
            .text(button.to_string()),
    )
}

fn profile_node(profile: &ProfileView) -> Element {
    Element::new("div")
        .id("user-profile")
        .child(Element::new("h4").text("User Profile Info"))
        .child(
            Element::new("section")
                .child(
                    Element::new("div")
                        .id("profile-name")
                        .text(format!("Name: {}", profile.name)),
                )
                .child(
                    Element::new("div")
                        .id("profile-username")
                        .text(format!("Username: {}", profile.username)),
                )
                .child(
                    Element::new("div")
                        .id("profile-account-date")
                        .text(format!("Account Created: {}", profile.created_at)),
                ),
        )
}

/// Element tree for one section
pub fn section_node(section: &Section) -> Element {
    match section {
        Section::StoryList { region, items } => Element::new("ol")
            .id(region.to_string())
            .children(items.iter().map(story_node)),
        Section::Message { region, text } => Element::new("ol").id(region.to_string()).text(*text),
        Section::LoginForm => form(
            "login-form",
            &[
                ("login-username", "username", "text"),
                ("login-password", "password", "password"),
            ],
            "login",
        ),
        Section::SignupForm => form(
            "create-account-form",
            &[
                ("create-account-name", "name", "text"),
                ("create-account-username", "username", "text"),
                ("create-account-password", "password", "password"),
            ],
            "create account",
        ),
        Section::SubmitForm => form(
            "submit-form",
            &[
                ("author", "author", "text"),
                ("title", "title", "text"),
                ("url", "url", "url"),
            ],
            "submit",
        ),
        Section::Profile(profile) => profile_node(profile),
    }
}

/// Element tree for a whole screen
pub fn screen_node(screen: &Screen) -> Node {
    Element::new("div")
        .class("container")
        .child(nav_node(&screen.nav))
        .child(
            Element::new("section")
                .class("articles-container")
                .children(screen.sections.iter().map(section_node)),
        )
        .into()
}

/// Render a screen to an HTML fragment
pub fn render_html(screen: &Screen) -> String {
    screen_node(screen).to_html()
}

//! Command parser for the interactive shell
//!
//! Each shell command corresponds to one action on the page: a navigation
//! link, a star or trash click, or a form submission. Commands are
//! case-insensitive; arguments keep their case. Arguments are separated by
//! whitespace, and double or single quotes group words into one argument,
//! so `signup "Alice A" alice` works like it does on the command line.

use thiserror::Error;

use crate::api::NewStory;

/// Errors that can occur when parsing shell commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType 'help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Command was given more arguments than it takes
    #[error("Too many arguments for {command}\n\nUsage: {usage}")]
    TooManyArguments { command: String, usage: String },
}

/// Commands understood by the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Re-fetch and show all stories
    All,
    /// Toggle the login/create-account forms
    ShowAuth,
    /// Log in; a missing password is prompted for
    Login {
        username: String,
        password: Option<String>,
    },
    /// Create an account; a missing password is prompted for
    Signup {
        name: String,
        username: String,
        password: Option<String>,
    },
    Logout,
    /// Toggle the submit form, or submit directly when fields are given
    Submit(Option<NewStory>),
    /// Toggle the favorite star of a story
    Star(String),
    /// Delete one of your stories
    Trash(String),
    Favorites,
    Mine,
    Profile,
    /// Redraw the current screen
    Show,
    Help,
    Exit,
    /// Blank input
    None,
}

/// Parse one line of shell input
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for unrecognised input,
/// `CommandError::MissingArgument` when a required argument is absent and
/// `CommandError::TooManyArguments` when extra words would be dropped.
///
/// # Examples
///
/// ```
/// use snooze::commands::shell_commands::{parse_shell_command, ShellCommand};
///
/// assert_eq!(
///     parse_shell_command("star abc123").unwrap(),
///     ShellCommand::Star("abc123".to_string())
/// );
/// assert_eq!(parse_shell_command("QUIT").unwrap(), ShellCommand::Exit);
/// assert!(parse_shell_command("dance").is_err());
/// ```
pub fn parse_shell_command(input: &str) -> Result<ShellCommand, CommandError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(ShellCommand::None);
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    let words = split_args(rest);

    match head.to_lowercase().as_str() {
        "all" | "stories" | "home" => Ok(ShellCommand::All),
        "login" => match words.as_slice() {
            [] => Ok(ShellCommand::ShowAuth),
            [username] => Ok(ShellCommand::Login {
                username: username.clone(),
                password: None,
            }),
            [username, password] => Ok(ShellCommand::Login {
                username: username.clone(),
                password: Some(password.clone()),
            }),
            _ => Err(too_many("login", "login <username> [password]")),
        },
        "signup" => {
            const USAGE: &str = "signup <name> <username> [password]";
            match words.as_slice() {
                [name, username] => Ok(ShellCommand::Signup {
                    name: name.clone(),
                    username: username.clone(),
                    password: None,
                }),
                [name, username, password] => Ok(ShellCommand::Signup {
                    name: name.clone(),
                    username: username.clone(),
                    password: Some(password.clone()),
                }),
                [] | [_] => Err(CommandError::MissingArgument {
                    command: "signup".to_string(),
                    usage: USAGE.to_string(),
                }),
                _ => Err(too_many("signup", USAGE)),
            }
        }
        "logout" => Ok(ShellCommand::Logout),
        "submit" if rest.is_empty() => Ok(ShellCommand::Submit(None)),
        "submit" => parse_inline_story(rest).map(|s| ShellCommand::Submit(Some(s))),
        "star" | "fav" | "favorite" => {
            first_arg(&words, "star", "star <story_id>").map(ShellCommand::Star)
        }
        "trash" | "delete" | "rm" => {
            first_arg(&words, "trash", "trash <story_id>").map(ShellCommand::Trash)
        }
        "favorites" | "favs" => Ok(ShellCommand::Favorites),
        "mine" | "my" | "my-stories" => Ok(ShellCommand::Mine),
        "profile" | "me" => Ok(ShellCommand::Profile),
        "show" | "ls" => Ok(ShellCommand::Show),
        "help" | "?" => Ok(ShellCommand::Help),
        "exit" | "quit" => Ok(ShellCommand::Exit),
        _ => Err(CommandError::UnknownCommand(head.to_string())),
    }
}

/// Whether a line may carry a password and must stay out of history
pub fn may_contain_password(input: &str) -> bool {
    let head = input.split_whitespace().next().unwrap_or_default();
    matches!(head.to_lowercase().as_str(), "login" | "signup")
}

fn first_arg(words: &[String], command: &str, usage: &str) -> Result<String, CommandError> {
    match words {
        [word] => Ok(word.clone()),
        [] => Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        }),
        _ => Err(too_many(command, usage)),
    }
}

fn too_many(command: &str, usage: &str) -> CommandError {
    CommandError::TooManyArguments {
        command: command.to_string(),
        usage: usage.to_string(),
    }
}

/// Split on whitespace, keeping quoted runs together
///
/// An unterminated quote runs to the end of the line.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

/// `author | title | url`; empty parts are kept so validation can reject them
fn parse_inline_story(rest: &str) -> Result<NewStory, CommandError> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [author, title, url] => Ok(NewStory {
            author: author.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }),
        _ => Err(CommandError::MissingArgument {
            command: "submit".to_string(),
            usage: "submit <author> | <title> | <url>".to_string(),
        }),
    }
}

/// Print shell help
pub fn print_help() {
    println!(
        r#"
Shell Commands
==============

BROWSING:
  all                       - Refresh and show all stories
  favorites                 - Show your favorite stories
  mine                      - Show the stories you posted
  profile                   - Show your profile
  show                      - Redraw the current screen

ACCOUNT:
  login                     - Show the login forms
  login <user> [password]   - Log in (password prompted when omitted)
  signup <name> <user> [pw] - Create an account ("quote" a name with spaces)
  logout                    - Log out

STORIES:
  submit                    - Open the submit form and fill it in
  submit <author> | <title> | <url>
                            - Post a story in one line
  star <story_id>           - Toggle a favorite
  trash <story_id>          - Delete one of your stories

OTHER:
  help                      - Show this help
  exit                      - Leave the shell
"#
    );
}

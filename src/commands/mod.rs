/*!
Command handlers for the CLI

Every subcommand replays the same sequence the web page goes through: the
page loads (stored session restored, stories fetched), one user action
runs, and the resulting screen is printed. `shell` keeps one [`App`] alive
and feeds it actions read from the terminal.
*/

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use crate::api::{HttpStoryApi, NewStory};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::{classify, Result, SnoozeError};
use crate::session::{open_store, SessionContext};
use crate::ui::{App, LoginForm, SignupForm};
use crate::view::{render_html, render_terminal, Screen};

// Parser for the interactive shell
pub mod shell_commands;

/// Wire the HTTP client, session store and context together
///
/// # Errors
///
/// Fails if the API base URL is unusable or the session store cannot be
/// opened.
pub fn build_app(config: &Config) -> Result<App> {
    let api = HttpStoryApi::new(&config.api)?;
    let store = open_store(&config.session)?;
    let ctx = SessionContext::new(Arc::new(api), store, config.ui.favorite_update);
    Ok(App::new(ctx))
}

/// Run one CLI invocation
///
/// # Errors
///
/// Returns the first failure of the requested action; the caller reports it
/// and sets the exit status.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let mut app = build_app(config)?;

    let screen = match &cli.command {
        Commands::Shell => return shell::run_shell(app, cli.html).await,
        Commands::Logout => {
            let screen = app.logout().await?;
            println!("{}", "Logged out".green());
            screen
        }
        Commands::Login { username, password } => {
            app.start().await?;
            let password = password_or_prompt(password.as_deref())?;
            let screen = app
                .submit_login(&LoginForm {
                    username: username.clone(),
                    password,
                })
                .await?;
            println!("{}", format!("Logged in as {}", username).green());
            screen
        }
        Commands::Signup {
            name,
            username,
            password,
        } => {
            app.start().await?;
            let password = password_or_prompt(password.as_deref())?;
            let screen = app
                .submit_signup(&SignupForm {
                    name: name.clone(),
                    username: username.clone(),
                    password,
                })
                .await?;
            println!("{}", format!("Account created for {}", username).green());
            screen
        }
        Commands::Stories => app.start().await?,
        Commands::Submit { author, title, url } => {
            app.start().await?;
            app.submit_story(&NewStory {
                author: author.clone(),
                title: title.clone(),
                url: url.clone(),
            })
            .await?
        }
        Commands::Favorite { story_id } => {
            app.start().await?;
            app.favorite(story_id).await?
        }
        Commands::Unfavorite { story_id } => {
            app.start().await?;
            app.unfavorite(story_id).await?
        }
        Commands::Delete { story_id } => {
            app.start().await?;
            app.nav_my_stories()?;
            app.click_trash(story_id).await?
        }
        Commands::Favorites => {
            app.start().await?;
            app.nav_favorites()?
        }
        Commands::Mine => {
            app.start().await?;
            app.nav_my_stories()?
        }
        Commands::Profile => {
            app.start().await?;
            app.nav_profile()?
        }
    };

    print_screen(&screen, cli.html);
    Ok(())
}

/// Print a screen as HTML or terminal text
pub fn print_screen(screen: &Screen, html: bool) {
    if html {
        println!("{}", render_html(screen));
    } else {
        print!("{}", render_terminal(screen));
    }
}

/// Print an error to stderr, prefixed with its category
pub fn report_error(err: &anyhow::Error) {
    let label = format!("{}:", classify(err).label());
    eprintln!("{} {:#}", label.red().bold(), err);
}

fn password_or_prompt(given: Option<&str>) -> Result<String> {
    match given {
        Some(password) => Ok(password.to_string()),
        None => {
            let mut rl = DefaultEditor::new()?;
            prompt(&mut rl, "Password: ")
        }
    }
}

/// Read one line; Ctrl-C or Ctrl-D cancels the action
fn prompt(rl: &mut DefaultEditor, label: &str) -> Result<String> {
    match rl.readline(label) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            Err(SnoozeError::Validation("input cancelled".into()).into())
        }
        Err(e) => Err(e.into()),
    }
}

// Interactive shell
pub mod shell {
    //! Interactive shell
    //!
    //! A readline loop over one [`App`]. Each line is one page action; its
    //! screen is printed on success and its error on failure, and the loop
    //! carries on either way.

    use super::*;
    use crate::commands::shell_commands::{
        may_contain_password, parse_shell_command, print_help, ShellCommand,
    };
    use crate::view::Panel;

    /// Outcome of one shell line
    enum Step {
        Show(Screen),
        Quiet,
        Quit,
    }

    /// Start the interactive shell
    ///
    /// # Errors
    ///
    /// Fails only if the first page load or the line editor fails; errors
    /// from individual commands are printed and the loop continues.
    pub async fn run_shell(mut app: App, html: bool) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("{}", "Hack or Snooze".bold());
        println!("Type {} for a list of commands\n", "help".cyan());
        let screen = app.start().await?;
        print_screen(&screen, html);

        loop {
            let prompt_text = match app.context().user() {
                Some(user) => format!("{}> ", user.username.green()),
                None => "snooze> ".to_string(),
            };
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if !may_contain_password(trimmed) {
                        if let Err(e) = rl.add_history_entry(trimmed) {
                            tracing::warn!("Could not record history entry: {}", e);
                        }
                    }

                    let command = match parse_shell_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match step(&mut app, &mut rl, command).await {
                        Ok(Step::Show(screen)) => print_screen(&screen, html),
                        Ok(Step::Quiet) => {}
                        Ok(Step::Quit) => break,
                        Err(e) => report_error(&e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn step(app: &mut App, rl: &mut DefaultEditor, command: ShellCommand) -> Result<Step> {
        let screen = match command {
            ShellCommand::None => return Ok(Step::Quiet),
            ShellCommand::Help => {
                print_help();
                return Ok(Step::Quiet);
            }
            ShellCommand::Exit => return Ok(Step::Quit),
            ShellCommand::Show => app.screen(),
            ShellCommand::All => app.nav_all().await?,
            ShellCommand::ShowAuth => app.nav_login(),
            ShellCommand::Login { username, password } => {
                let password = match password {
                    Some(p) => p,
                    None => prompt(rl, "Password: ")?,
                };
                app.submit_login(&LoginForm { username, password }).await?
            }
            ShellCommand::Signup {
                name,
                username,
                password,
            } => {
                let password = match password {
                    Some(p) => p,
                    None => prompt(rl, "Password: ")?,
                };
                app.submit_signup(&SignupForm {
                    name,
                    username,
                    password,
                })
                .await?
            }
            ShellCommand::Logout => app.logout().await?,
            ShellCommand::Submit(Some(story)) => app.submit_story(&story).await?,
            ShellCommand::Submit(None) => {
                let screen = app.nav_submit()?;
                if app.panel() != Panel::SubmitForm {
                    screen
                } else {
                    let story = NewStory {
                        author: prompt(rl, "Author: ")?,
                        title: prompt(rl, "Title: ")?,
                        url: prompt(rl, "URL: ")?,
                    };
                    app.submit_story(&story).await?
                }
            }
            ShellCommand::Star(story_id) => app.click_star(&story_id).await?,
            ShellCommand::Trash(story_id) => app.click_trash(&story_id).await?,
            ShellCommand::Favorites => app.nav_favorites()?,
            ShellCommand::Mine => app.nav_my_stories()?,
            ShellCommand::Profile => app.nav_profile()?,
        };
        Ok(Step::Show(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SessionBackend, SessionConfig};

    #[test]
    fn test_build_app_with_memory_store() {
        let config = Config {
            session: SessionConfig {
                backend: SessionBackend::Memory,
                path: None,
            },
            ..Config::default()
        };
        let app = build_app(&config).unwrap();
        assert!(!app.context().is_logged_in());
    }

    #[test]
    fn test_build_app_rejects_bad_base_url() {
        let mut config = Config::default();
        config.session.backend = SessionBackend::Memory;
        config.api.base_url = "not a url".to_string();
        assert!(build_app(&config).is_err());
    }
}

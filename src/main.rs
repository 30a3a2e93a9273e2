//! Snooze - terminal client for Hack or Snooze
//!
#![doc = "Snooze - terminal client for Hack or Snooze"]
#![doc = "Main entry point for the snooze binary."]

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snooze::cli::Cli;
use snooze::commands;
use snooze::config::{default_config_path, Config};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        commands::report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    // Load configuration
    let config_path = cli
        .config
        .clone()
        .or_else(default_config_path)
        .unwrap_or_else(|| PathBuf::from("snooze.yaml"));
    let config = Config::load(&config_path, cli)?;

    // Validate configuration
    config.validate()?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    tracing::debug!(api = %config.api.base_url, "Running command");
    commands::execute(cli, &config).await
}

/// Logs go to stderr so rendered screens on stdout stay clean
fn init_tracing(verbose: bool) {
    let default = if verbose { "snooze=debug" } else { "snooze=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

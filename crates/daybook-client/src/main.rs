//! daybook CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use daybook_client::cli::{Cli, Command, ConfigAction};
use daybook_client::commands;
use daybook_client::config::ClientConfig;
use daybook_client::error::{ClientError, ClientResult};
use daybook_core::tracing::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    if let Err(e) = init_tracing(config.tracing_config()) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };
    config.apply_overrides(cli.events.clone(), cli.output.clone(), cli.debug);
    Ok(config)
}

fn run(command: Option<Command>, config: &ClientConfig) -> ClientResult<()> {
    match command {
        Some(Command::List { json }) => commands::list::run(config, json),
        Some(Command::Check) => commands::check::run(config),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
        None => commands::interactive::run(config),
    }
}

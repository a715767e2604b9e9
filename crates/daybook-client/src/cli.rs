//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// daybook - a personal calendar in your terminal
#[derive(Debug, Parser)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DAYBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Event file to load at startup
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Event file to save on quit
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the event file and print the event list
    List {
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the event file and report records that were rejected
    Check,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

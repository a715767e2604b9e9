//! CLI, configuration and the interactive menu
//!
//! This crate provides the `daybook` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod menu;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use menu::Session;

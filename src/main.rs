//! Plinth: a static site generator built around nested layouts.
//!
//! This is the main entry point for the `plinth` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod frontmatter;
pub mod fs;
pub mod graph;
pub mod layout;
pub mod markup;
pub mod site;
pub mod template;

#[cfg(test)]
mod test_support;

use cli::Cli;
use env_logger::{Builder, Env};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

//! Command implementations for plinth.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod build;
mod check;
mod layouts;

use crate::cli::{Command, SiteArgs};
use crate::error::Result;
use crate::site::Site;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Build(args) => build::cmd_build(args),
        Command::Check(args) => check::cmd_check(args),
        Command::Layouts(args) => layouts::cmd_layouts(args),
    }
}

/// Open the site a command operates on.
fn open_site(args: &SiteArgs) -> Result<Site> {
    Site::open(&args.root, args.config.as_deref())
}

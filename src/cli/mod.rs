//! CLI argument parsing for plinth.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plinth: a static site generator built around nested layouts.
///
/// A site is a directory holding:
/// - `layouts/` with templates that wrap content at `{{ content }}`
/// - `site/` with the documents to render
/// - `public/` with static assets copied as-is
#[derive(Parser, Debug)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug detail (per-document timings, resolved layouts).
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for plinth.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the site into the output directory.
    ///
    /// Renders every document in memory first; nothing is written unless
    /// the whole site renders.
    Build(SiteArgs),

    /// Render the site without writing anything.
    ///
    /// Reports the first error a build would hit.
    Check(SiteArgs),

    /// Show how layouts inherit from each other.
    ///
    /// Lists layouts in the order they are resolved, each with its parent.
    Layouts(LayoutsArgs),
}

/// Arguments shared by commands that operate on a site.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Site root directory.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file to use instead of `<root>/site.yaml`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `layouts` command.
#[derive(Args, Debug, Clone)]
pub struct LayoutsArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Print the layout order as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default log filter for the selected verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_build_defaults() {
        let cli = Cli::try_parse_from(["plinth", "build"]).unwrap();
        if let Command::Build(args) = &cli.command {
            assert_eq!(args.root, PathBuf::from("."));
            assert!(args.config.is_none());
        } else {
            panic!("Expected Build command");
        }
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn parse_build_with_root_and_config() {
        let cli = Cli::try_parse_from([
            "plinth",
            "build",
            "--root",
            "my-site",
            "--config",
            "alt.yaml",
        ])
        .unwrap();
        if let Command::Build(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("my-site"));
            assert_eq!(args.config, Some(PathBuf::from("alt.yaml")));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["plinth", "check", "--root", "x"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_layouts_json() {
        let cli = Cli::try_parse_from(["plinth", "layouts", "--json"]).unwrap();
        if let Command::Layouts(args) = cli.command {
            assert!(args.json);
            assert_eq!(args.site.root, PathBuf::from("."));
        } else {
            panic!("Expected Layouts command");
        }
    }

    #[test]
    fn parse_verbosity_flags() {
        let cli = Cli::try_parse_from(["plinth", "build", "-v"]).unwrap();
        assert_eq!(cli.log_level(), "debug");

        let cli = Cli::try_parse_from(["plinth", "-q", "check"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["plinth", "build", "-v", "-q"]).is_err());
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["plinth"]).is_err());
    }
}

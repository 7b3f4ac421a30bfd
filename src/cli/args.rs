//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all sprig
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `deps`: Direct component and helper dependencies of one template
//! - `closure`: Transitive dependency closure of a template
//! - `map`: Resolution map filtered down to an entry point
//! - `init`: Initialize a starter environment configuration
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Deps(cmd)) => cmd.common.verbose,
            Some(Command::Closure(cmd)) => cmd.common.verbose,
            Some(Command::Map(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | Some(Command::Serve) | None => false,
        }
    }

    /// Get the json flag from the command's common args.
    pub fn json(&self) -> bool {
        match &self.command {
            Some(Command::Deps(cmd)) => cmd.common.json,
            Some(Command::Closure(cmd)) => cmd.common.json,
            Some(Command::Map(cmd)) => cmd.common.json,
            Some(Command::Init(_)) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by the analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (must contain a package.json)
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Build environment whose configuration should be loaded
    #[arg(long, env = "SPRIG_ENV")]
    pub environment: Option<String>,

    /// Emit machine-readable JSON instead of the human-readable report
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct DepsCommand {
    /// Template to analyze, by short name or absolute module path
    pub template: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ClosureCommand {
    /// Template to analyze, by short name or absolute module path
    pub template: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MapCommand {
    /// Entry-point template the resolution map is filtered to
    pub template: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Project root directory to write the configuration into
    #[arg(long, default_value = ".")]
    pub project: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the direct component and helper dependencies of a template
    Deps(DepsCommand),
    /// Show the full transitive dependency closure of a template
    Closure(ClosureCommand),
    /// Emit the resolution map filtered to an entry point's reachable modules
    Map(MapCommand),
    /// Initialize a new config/environment.json configuration file
    Init(InitCommand),
    /// Start MCP server for AI coding agents
    Serve,
}

//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for ticketflow using clap's derive API.
//!
//! # Commands
//!
//! - `graph`: Build the dependency graph of a tickets directory and write a Mermaid diagram
//! - `validate`: Check a single ticket document against the structural checklist
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: Use this configuration file instead of searching for `.ticketflow.yaml`
//! - `-v`: Increase log verbosity (repeatable)
//!
//! # Example
//!
//! ```bash
//! ticketflow graph docs/tickets
//! ticketflow graph docs/tickets --output docs/dependencies.md
//! ticketflow validate docs/tickets/ticket-001-setup.md
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Re-export argument structs
pub use args::{GraphArgs, ValidateArgs};

/// Ticketflow - dependency graphs for markdown tickets
///
/// Reads `ticket-*.md` documents, refuses circular dependencies and renders
/// the rest as a Mermaid flowchart.
#[derive(Parser, Debug)]
#[command(name = "ticketflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to the nearest .ticketflow.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the dependency graph and write a Mermaid diagram
    ///
    /// Fails without writing anything if the tickets contain circular
    /// dependencies.
    Graph(GraphArgs),

    /// Check a ticket document for required fields and sections
    ///
    /// Exits non-zero when the ticket has errors. Warnings alone pass.
    Validate(ValidateArgs),
}

impl Cli {
    /// Parse CLI arguments from the command line, returning clap's error
    /// instead of exiting
    pub fn try_parse_args() -> std::result::Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<ExitCode> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        let config = self.config.as_deref();

        match &self.command {
            Commands::Graph(args) => execute::execute_graph(args, config, output_mode),
            Commands::Validate(args) => execute::execute_validate(args, config, output_mode),
        }
    }
}

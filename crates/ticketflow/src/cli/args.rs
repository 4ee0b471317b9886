//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Directory containing `ticket-*.md` files
    pub tickets_dir: PathBuf,

    /// Write the diagram here instead of into the tickets directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Ticket file to check
    pub ticket: PathBuf,
}

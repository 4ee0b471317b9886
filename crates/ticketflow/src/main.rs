//! Ticketflow CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use ticketflow::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the ticketflow CLI.
///
/// Usage errors exit with status 1, as do cyclic graphs, invalid tickets and
/// fatal errors.
fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Set up logging based on verbosity
    // RUST_LOG takes precedence, e.g. RUST_LOG=ticketflow_core=trace
    let filter = match cli.verbose {
        0 => "ticketflow=warn,ticketflow_core=warn",
        1 => "ticketflow=info,ticketflow_core=info",
        2 => "ticketflow=debug,ticketflow_core=debug",
        _ => "ticketflow=trace,ticketflow_core=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting ticketflow CLI");

    match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

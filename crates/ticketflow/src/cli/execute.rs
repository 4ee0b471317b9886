//! Command execution logic.
//!
//! Each function runs one command, prints its result in the requested mode
//! and returns the process exit code. Fatal errors propagate to `main`.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use super::args::{GraphArgs, ValidateArgs};
use crate::commands::graph::GraphRun;
use crate::commands::validate::validate_file;
use crate::config::TicketflowConfig;
use crate::output::{self, GraphSummary, OutputConfig, OutputMode, ValidationSummary};

/// Execute the graph command
pub fn execute_graph(
    args: &GraphArgs,
    config_path: Option<&Path>,
    output_mode: OutputMode,
) -> Result<ExitCode> {
    let config = TicketflowConfig::resolve(config_path, &args.tickets_dir)?;
    let out = OutputConfig::from_env();
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if output_mode == OutputMode::Text {
        output::write_scanning(&mut w, &args.tickets_dir, &out)?;
    }

    let run = GraphRun::analyze(&args.tickets_dir)?;

    if !run.is_acyclic() {
        match output_mode {
            OutputMode::Json => {
                output::print_json(&GraphSummary::new(
                    &run.tickets_dir,
                    &run.graph,
                    &run.cycles,
                    None,
                ))?;
            }
            OutputMode::Text => {
                output::write_ticket_list(&mut w, &run.graph, &out)?;
                output::write_cycle_failure(&mut w, &run.cycles, &out)?;
            }
        }
        return Ok(ExitCode::FAILURE);
    }

    let output_path = run.output_path(args.output.as_deref(), &config.graph);
    run.write_diagram(&output_path, config.graph.render_options())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&GraphSummary::new(
                &run.tickets_dir,
                &run.graph,
                &run.cycles,
                Some(output_path.as_path()),
            ))?;
        }
        OutputMode::Text => {
            output::write_ticket_list(&mut w, &run.graph, &out)?;
            writeln!(w)?;
            let order = run.graph.execution_order();
            output::write_graph_success(&mut w, &output_path, order.as_deref(), &out)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Execute the validate command
pub fn execute_validate(
    args: &ValidateArgs,
    config_path: Option<&Path>,
    output_mode: OutputMode,
) -> Result<ExitCode> {
    let search_from = args
        .ticket
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = TicketflowConfig::resolve(config_path, search_from)?;

    let report = validate_file(&args.ticket, &config.validate)?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&ValidationSummary {
                file: &args.ticket,
                valid: report.is_valid(),
                report: &report,
            })?;
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            output::write_validation_report(
                &mut w,
                &args.ticket,
                &report,
                &OutputConfig::from_env(),
            )?;
        }
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Text writers take any [`Write`] so they can be tested against a buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use ticketflow_core::cycles::CycleReport;
use ticketflow_core::domain::{TicketId, TicketRecord};
use ticketflow_core::graph::{DanglingReference, TicketGraph};
use ticketflow_core::validate::ValidationReport;

pub use color::{error, info, success, warning};

use color::{bold, check_mark, colored_status_icon, colorize_id, colorize_status, dimmed};

const RULE_WIDTH: usize = 60;

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `TICKETFLOW_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TICKETFLOW_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        let use_ascii = match env::var("TICKETFLOW_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "TICKETFLOW_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("TICKETFLOW_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }

    fn bullet(&self) -> &'static str {
        if self.use_ascii { "-" } else { "•" }
    }

    fn arrow(&self) -> &'static str {
        if self.use_ascii { "->" } else { "→" }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// JSON Output
// ============================================================================

/// Machine-readable result of the `graph` command.
#[derive(Debug, Serialize)]
pub struct GraphSummary<'a> {
    /// Directory that was scanned
    pub tickets_dir: &'a Path,
    /// Parsed tickets, in graph order
    pub tickets: Vec<&'a TicketRecord>,
    /// Number of resolved dependency edges
    pub edges: usize,
    /// References to tickets missing from the directory
    pub dangling: Vec<DanglingReference>,
    /// Cycle detection result
    pub cycles: &'a CycleReport,
    /// Where the diagram was written, if it was
    pub output: Option<&'a Path>,
    /// Dependencies-first work order, if the graph is acyclic
    pub execution_order: Option<Vec<TicketId>>,
}

impl<'a> GraphSummary<'a> {
    /// Summarize a run over `graph`.
    pub fn new(
        tickets_dir: &'a Path,
        graph: &'a TicketGraph,
        cycles: &'a CycleReport,
        output: Option<&'a Path>,
    ) -> Self {
        Self {
            tickets_dir,
            tickets: graph.iter().collect(),
            edges: graph.edge_count(),
            dangling: graph.dangling_references(),
            cycles,
            output,
            execution_order: graph.execution_order(),
        }
    }
}

/// Machine-readable result of the `validate` command.
#[derive(Debug, Serialize)]
pub struct ValidationSummary<'a> {
    /// Ticket file that was checked
    pub file: &'a Path,
    /// Whether the ticket passed
    pub valid: bool,
    /// Full report
    #[serde(flatten)]
    pub report: &'a ValidationReport,
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{}", json)
}

// ============================================================================
// Graph Command Text Output
// ============================================================================

/// Print the line announcing which directory is scanned.
pub fn write_scanning<W: Write>(w: &mut W, dir: &Path, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "Scanning tickets in: {}",
        info(&dir.display().to_string(), config)
    )
}

/// Print the ticket count followed by one line per ticket.
pub fn write_ticket_list<W: Write>(
    w: &mut W,
    graph: &TicketGraph,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "Found {} tickets", graph.len())?;

    for record in graph {
        let deps: Vec<&str> = graph.dependencies(record).map(|d| d.id.as_str()).collect();
        write!(
            w,
            "  {} {}  {} {}",
            colored_status_icon(record.status, config),
            colorize_id(record.id.as_str(), config),
            record.title,
            dimmed(&format!("[{}]", colorize_status(record.status, config)), config)
        )?;
        if !deps.is_empty() {
            write!(
                w,
                " {}",
                dimmed(&format!("after {}", deps.join(", ")), config)
            )?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Print the cycle failure, naming every implicated ticket and each cycle.
pub fn write_cycle_failure<W: Write>(
    w: &mut W,
    report: &CycleReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let implicated: Vec<&str> = report.implicated().iter().map(TicketId::as_str).collect();

    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        check_mark(false, config),
        error(
            &format!(
                "ERROR: Circular dependencies detected involving tickets: {}",
                implicated.join(", ")
            ),
            config
        )
    )?;

    for (i, cycle) in report.cycles.iter().enumerate() {
        let mut path: Vec<&str> = cycle.tickets.iter().map(TicketId::as_str).collect();
        if let Some(first) = path.first().copied() {
            path.push(first);
        }
        writeln!(
            w,
            "    {} {}: {}",
            warning("Cycle", config),
            i + 1,
            path.join(&format!(" {} ", config.arrow()))
        )?;
    }

    Ok(())
}

/// Print the success lines after the diagram was written.
pub fn write_graph_success<W: Write>(
    w: &mut W,
    output: &Path,
    execution_order: Option<&[TicketId]>,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} No circular dependencies detected",
        check_mark(true, config)
    )?;
    writeln!(
        w,
        "{} Dependency graph saved to: {}",
        check_mark(true, config),
        info(&output.display().to_string(), config)
    )?;

    if let Some(order) = execution_order.filter(|order| !order.is_empty()) {
        let ids: Vec<&str> = order.iter().map(TicketId::as_str).collect();
        writeln!(
            w,
            "  {} {}",
            dimmed("Execution order:", config),
            ids.join(&format!(" {} ", config.arrow()))
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", success("Dependency graph generated successfully!", config))
}

// ============================================================================
// Validate Command Text Output
// ============================================================================

/// Print a validation report.
pub fn write_validation_report<W: Write>(
    w: &mut W,
    file: &Path,
    report: &ValidationReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    writeln!(w, "Validating: {}", info(&name, config))?;
    writeln!(w)?;
    writeln!(w, "{}", dimmed(&rule, config))?;
    writeln!(w, "{}", bold("VALIDATION REPORT", config))?;
    writeln!(w, "{}", dimmed(&rule, config))?;
    writeln!(w)?;
    writeln!(w, "{} {}", dimmed("File:", config), file.display())?;
    writeln!(
        w,
        "{} {}/{}",
        dimmed("Score:", config),
        report.score,
        report.max_score
    )?;

    if !report.errors.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            error(&format!("Errors ({}):", report.errors.len()), config)
        )?;
        for e in &report.errors {
            writeln!(w, "  {} {e}", config.bullet())?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            warning(&format!("Warnings ({}):", report.warnings.len()), config)
        )?;
        for warn in &report.warnings {
            writeln!(w, "  {} {warn}", config.bullet())?;
        }
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} {}",
            check_mark(true, config),
            success("All checks passed!", config)
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", dimmed(&rule, config))?;
    let verdict = format!("RESULT: {}", report.grade.verdict());
    let verdict = if report.is_valid() {
        success(&verdict, config)
    } else {
        error(&verdict, config)
    };
    writeln!(w, "{verdict}")?;
    writeln!(w, "{}", dimmed(&rule, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_core::cycles::detect_cycles;
    use ticketflow_core::domain::TicketStatus;
    use ticketflow_core::validate::{ValidationRules, validate_ticket};

    fn plain() -> OutputConfig {
        OutputConfig::new(true, false)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn graph(tickets: &[(&str, &[&str])]) -> TicketGraph {
        TicketGraph::from_records(tickets.iter().map(|(id, deps)| {
            let mut record = TicketRecord::new(*id, format!("ticket-{id}.md"));
            record.title = format!("Title {id}");
            record.depends_on = deps.iter().map(|d| d.to_string()).collect();
            record
        }))
    }

    #[test]
    fn test_ticket_list() {
        let mut done = TicketRecord::new("001", "ticket-001.md");
        done.title = "Title 001".to_string();
        done.status = TicketStatus::Done;
        let mut pending = TicketRecord::new("002", "ticket-002.md");
        pending.title = "Title 002".to_string();
        pending.depends_on = vec!["ticket-001".to_string(), "ticket-099".to_string()];
        let g = TicketGraph::from_records([done, pending]);

        let out = render(|w| write_ticket_list(w, &g, &plain()));

        assert_eq!(
            out,
            "Found 2 tickets\n  + 001  Title 001 [done]\n  o 002  Title 002 [pending] after 001\n"
        );
    }

    #[test]
    fn test_empty_ticket_list() {
        let out = render(|w| write_ticket_list(w, &TicketGraph::default(), &plain()));
        assert_eq!(out, "Found 0 tickets\n");
    }

    #[test]
    fn test_cycle_failure_lists_ids_and_paths() {
        let g = graph(&[("001", &["ticket-002"]), ("002", &["ticket-001"])]);
        let report = detect_cycles(&g);

        let out = render(|w| write_cycle_failure(w, &report, &plain()));

        assert!(out.contains("ERROR: Circular dependencies detected involving tickets: 001, 002"));
        assert!(out.contains("Cycle 1: 001 -> 002 -> 001"));
    }

    #[test]
    fn test_graph_success() {
        let order = vec![TicketId::from("001"), TicketId::from("002")];
        let out = render(|w| {
            write_graph_success(
                w,
                Path::new("tickets/dependencies.mermaid"),
                Some(&order),
                &plain(),
            )
        });

        assert!(out.contains("+ No circular dependencies detected"));
        assert!(out.contains("Dependency graph saved to: tickets/dependencies.mermaid"));
        assert!(out.contains("Execution order: 001 -> 002"));
        assert!(out.ends_with("Dependency graph generated successfully!\n"));
    }

    #[test]
    fn test_validation_report_text() {
        let report = validate_ticket("", &ValidationRules::default());
        let out = render(|w| {
            write_validation_report(w, Path::new("t/ticket-001-x.md"), &report, &plain())
        });

        assert!(out.starts_with("Validating: ticket-001-x.md\n"));
        assert!(out.contains("Score: 0/12"));
        assert!(out.contains("Errors (13):"));
        assert!(out.contains("  - Missing section: Summary"));
        assert!(out.contains("Warnings (1):"));
        assert!(out.contains("RESULT: Needs improvement - Must revise before execution"));
        assert!(!out.contains("All checks passed!"));
    }

    #[test]
    fn test_graph_summary_json_shape() {
        let g = graph(&[("001", &[]), ("002", &["ticket-001", "ticket-099"])]);
        let report = detect_cycles(&g);
        let summary = GraphSummary::new(Path::new("tickets"), &g, &report, None);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["edges"], 1);
        assert_eq!(json["tickets"][1]["depends_on"][0], "ticket-001");
        assert_eq!(json["tickets"][0]["status"], "pending");
        assert_eq!(json["dangling"][0]["reference"], "ticket-099");
        assert_eq!(json["cycles"]["participants"].as_array().unwrap().len(), 0);
        assert_eq!(json["execution_order"][0], "001");
        assert!(json["output"].is_null());
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert!(!config.use_ascii);
        assert!(config.use_colors);
    }
}

//! Implementation of the `graph` command.
//!
//! A run loads every ticket in a directory, checks the dependency graph for
//! cycles and, only when it is acyclic, writes the Mermaid diagram.

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use ticketflow_core::cycles::{CycleReport, detect_cycles};
use ticketflow_core::graph::TicketGraph;
use ticketflow_core::parser::load_tickets;
use ticketflow_core::render::{MermaidRenderer, RenderOptions};

/// Loaded tickets and their cycle analysis.
#[derive(Debug)]
pub struct GraphRun {
    /// Directory the tickets were read from
    pub tickets_dir: PathBuf,
    /// Parsed tickets
    pub graph: TicketGraph,
    /// Cycle detection result for `graph`
    pub cycles: CycleReport,
}

impl GraphRun {
    /// Load the tickets in `tickets_dir` and detect cycles among them.
    pub fn analyze(tickets_dir: &Path) -> Result<Self> {
        let graph = load_tickets(tickets_dir)?;
        tracing::info!(
            dir = %tickets_dir.display(),
            tickets = graph.len(),
            edges = graph.edge_count(),
            "Loaded tickets"
        );

        let cycles = detect_cycles(&graph);

        Ok(Self {
            tickets_dir: tickets_dir.to_path_buf(),
            graph,
            cycles,
        })
    }

    /// Whether a diagram may be written.
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_acyclic()
    }

    /// Where the diagram goes: `explicit` as given, otherwise the configured
    /// file name inside the tickets directory.
    pub fn output_path(&self, explicit: Option<&Path>, config: &GraphConfig) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.tickets_dir.join(&config.output_file),
        }
    }

    /// Render the diagram and write it to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicGraph`] without touching the filesystem when the
    /// graph has cycles.
    pub fn write_diagram(&self, path: &Path, options: RenderOptions) -> Result<()> {
        if !self.is_acyclic() {
            return Err(Error::CyclicGraph(path.to_path_buf()));
        }

        let diagram = MermaidRenderer::new(options).render(&self.graph);
        fs::write(path, diagram)?;
        tracing::info!(path = %path.display(), "Wrote dependency diagram");
        Ok(())
    }
}

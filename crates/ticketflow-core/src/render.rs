//! Mermaid flowchart rendering.
//!
//! The diagram is plain text fenced as a ```` ```mermaid ```` block so it can be
//! pasted into markdown documentation:
//!
//! ````text
//! ```mermaid
//! graph TD
//!     T001[Ticket-001: Project setup]
//!     T002[Ticket-002: Data model]
//!     T001 --> T002
//!
//!     %% Styling
//!     style T001 fill:#90EE90
//!     style T002 fill:#FFD700
//! ```
//! ````
//!
//! Edges are drawn from dependency to dependent. Rendering does not check for
//! cycles; callers gate on [`crate::cycles::detect_cycles`] first.

use crate::domain::TicketRecord;
use crate::graph::TicketGraph;

/// Default number of title characters shown in a node label.
pub const DEFAULT_TITLE_WIDTH: usize = 30;

const INDENT: &str = "    ";

/// Options controlling diagram output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum title characters in a node label (hard cut, no ellipsis)
    pub title_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title_width: DEFAULT_TITLE_WIDTH,
        }
    }
}

/// Renders a [`TicketGraph`] as a Mermaid `graph TD` flowchart.
#[derive(Debug, Clone, Default)]
pub struct MermaidRenderer {
    options: RenderOptions,
}

impl MermaidRenderer {
    /// Create a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Label shown inside a node: `Ticket-<id>: <truncated title>`.
    pub fn node_label(&self, record: &TicketRecord) -> String {
        format!(
            "Ticket-{}: {}",
            record.id,
            truncate_chars(&record.title, self.options.title_width)
        )
    }

    /// Render the whole diagram.
    ///
    /// Lines are joined with `\n` and the closing fence has no trailing
    /// newline. Output depends only on the graph, so unchanged input gives
    /// byte-identical output.
    pub fn render(&self, graph: &TicketGraph) -> String {
        let mut lines = vec!["```mermaid".to_string(), "graph TD".to_string()];

        for record in graph {
            let node_id = record.id.node_id();
            lines.push(format!("{INDENT}{node_id}[{}]", self.node_label(record)));

            for dep in graph.dependencies(record) {
                lines.push(format!("{INDENT}{} --> {node_id}", dep.id.node_id()));
            }
        }

        lines.push(String::new());
        lines.push(format!("{INDENT}%% Styling"));
        for record in graph {
            lines.push(format!(
                "{INDENT}style {} fill:{}",
                record.id.node_id(),
                record.status.fill_color()
            ));
        }

        lines.push("```".to_string());
        lines.join("\n")
    }
}

/// First `max` characters of `s`.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

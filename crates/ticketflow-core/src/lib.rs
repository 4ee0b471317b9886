//! Ticketflow core - ticket documents as a dependency graph.
//!
//! This crate reads a directory of markdown ticket documents, builds the
//! dependency graph between them, detects circular dependencies and renders
//! the graph as a Mermaid flowchart. It also carries the structural checklist
//! used to validate a single ticket document.
//!
//! # Example
//!
//! ```no_run
//! use ticketflow_core::{cycles, parser, render::MermaidRenderer};
//!
//! # fn main() -> ticketflow_core::Result<()> {
//! let graph = parser::load_tickets("docs/tickets/feature".as_ref())?;
//! let report = cycles::detect_cycles(&graph);
//! if report.is_acyclic() {
//!     let diagram = MermaidRenderer::default().render(&graph);
//!     println!("{diagram}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cycles;
pub mod domain;
pub mod error;
pub mod graph;
pub mod parser;
pub mod render;
pub mod validate;

pub use error::{Error, Result};

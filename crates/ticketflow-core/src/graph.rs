//! The ticket dependency graph.
//!
//! [`TicketGraph`] is an insertion-ordered map from [`TicketId`] to
//! [`TicketRecord`]. Iteration order is the order records were inserted,
//! which for [`crate::parser::load_tickets`] is file name order.
//!
//! ## Edge Direction Convention
//!
//! Dependencies are stored as **dependent -> dependency** edges: if ticket
//! `003` declares `depends_on: ticket-001`, the edge is `003 -> 001`. The
//! rendered diagram draws the same relationship the other way round
//! (`T001 --> T003`, "001 must be done before 003").
//!
//! References that do not resolve to a ticket in the graph are dangling. They
//! contribute no edge and are never an error.

use crate::domain::{TicketId, TicketRecord};
use crate::parser::reference_id;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// A dependency reference that names a ticket missing from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Ticket declaring the dependency
    pub ticket: TicketId,
    /// The reference as written (e.g. `"ticket-099"`)
    pub reference: String,
}

/// Immutable dependency graph over a set of tickets.
#[derive(Debug, Clone, Default)]
pub struct TicketGraph {
    /// Records in insertion order
    records: Vec<TicketRecord>,

    /// Position of each id in `records`
    index: HashMap<TicketId, usize>,
}

impl TicketGraph {
    /// Build a graph from records in iteration order.
    ///
    /// When two records share an id, the later one replaces the earlier one
    /// but keeps the earlier position.
    pub fn from_records(records: impl IntoIterator<Item = TicketRecord>) -> Self {
        let mut graph = Self::default();

        for record in records {
            match graph.index.get(&record.id) {
                Some(&pos) => {
                    tracing::warn!(
                        id = %record.id,
                        replaced = %graph.records[pos].path.display(),
                        by = %record.path.display(),
                        "Duplicate ticket id, keeping the later file"
                    );
                    graph.records[pos] = record;
                }
                None => {
                    graph.index.insert(record.id.clone(), graph.records.len());
                    graph.records.push(record);
                }
            }
        }

        graph
    }

    /// Number of tickets in the graph.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the graph has no tickets.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate tickets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TicketRecord> {
        self.records.iter()
    }

    /// Look up a ticket by id.
    pub fn get(&self, id: &TicketId) -> Option<&TicketRecord> {
        self.position(id).map(|pos| &self.records[pos])
    }

    /// Insertion position of a ticket.
    pub fn position(&self, id: &TicketId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Ticket at an insertion position.
    pub(crate) fn at(&self, pos: usize) -> &TicketRecord {
        &self.records[pos]
    }

    /// Resolve a dependency reference to the ticket it names, if present.
    pub fn resolve(&self, reference: &str) -> Option<&TicketRecord> {
        reference_id(reference).and_then(|id| self.get(&id))
    }

    /// Positions of the tickets `record` depends on, in declaration order.
    ///
    /// Dangling references are skipped. A reference repeated in `depends_on`
    /// yields its target once per occurrence.
    pub(crate) fn dependency_positions<'a>(
        &'a self,
        record: &'a TicketRecord,
    ) -> impl Iterator<Item = usize> + 'a {
        record
            .depends_on
            .iter()
            .filter_map(|reference| reference_id(reference))
            .filter_map(|id| self.position(&id))
    }

    /// Tickets `record` depends on, in declaration order.
    pub fn dependencies<'a>(
        &'a self,
        record: &'a TicketRecord,
    ) -> impl Iterator<Item = &'a TicketRecord> + 'a {
        self.dependency_positions(record).map(|pos| &self.records[pos])
    }

    /// Number of resolved dependency edges.
    pub fn edge_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| self.dependency_positions(record).count())
            .sum()
    }

    /// Every reference that does not resolve to a ticket in the graph.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.records
            .iter()
            .flat_map(|record| {
                record
                    .depends_on
                    .iter()
                    .filter(|reference| self.resolve(reference).is_none())
                    .map(|reference| DanglingReference {
                        ticket: record.id.clone(),
                        reference: reference.clone(),
                    })
            })
            .collect()
    }

    /// Build the petgraph representation (dependent -> dependency edges).
    ///
    /// Node `i` holds the ticket at insertion position `i`.
    pub fn to_digraph(&self) -> DiGraph<TicketId, ()> {
        let mut digraph = DiGraph::with_capacity(self.records.len(), self.records.len());
        let nodes: Vec<NodeIndex> = self
            .records
            .iter()
            .map(|record| digraph.add_node(record.id.clone()))
            .collect();

        for (pos, record) in self.records.iter().enumerate() {
            for dep in self.dependency_positions(record) {
                digraph.add_edge(nodes[pos], nodes[dep], ());
            }
        }

        digraph
    }

    /// A work order in which every ticket comes after its dependencies.
    ///
    /// Returns `None` when the graph has a cycle.
    pub fn execution_order(&self) -> Option<Vec<TicketId>> {
        let digraph = self.to_digraph();
        let mut order = algo::toposort(&digraph, None).ok()?;
        // toposort puts dependents first
        order.reverse();
        Some(order.into_iter().map(|node| digraph[node].clone()).collect())
    }
}

impl<'a> IntoIterator for &'a TicketGraph {
    type Item = &'a TicketRecord;
    type IntoIter = std::slice::Iter<'a, TicketRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

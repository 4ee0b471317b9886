//! Circular dependency detection.
//!
//! Uses depth-first search with a visited set and a recursion stack. A
//! dependency on a ticket that is still on the recursion stack is a back edge,
//! and every back edge closes a cycle.
//!
//! The report carries two views of the result:
//!
//! - **participants**: the starting ticket of each traversal that met a back
//!   edge. This is a detection signal, not a list of cycle members: the
//!   starting ticket may only lead into a cycle.
//! - **cycles**: the ticket paths closed by each back edge.
//!
//! Callers should treat any non-empty report as "unsafe to process further".

use crate::domain::TicketId;
use crate::graph::TicketGraph;
use serde::Serialize;
use std::collections::HashSet;

/// A circular dependency, in dependency order.
///
/// `[a, b, c]` means `a` depends on `b`, `b` on `c` and `c` on `a`. The member
/// with the lowest graph position comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Tickets on the cycle
    pub tickets: Vec<TicketId>,
}

impl Cycle {
    /// Whether `id` is on this cycle.
    pub fn contains(&self, id: &TicketId) -> bool {
        self.tickets.contains(id)
    }

    /// The cycle as `a -> b -> a`, repeating the first ticket.
    pub fn display_path(&self) -> String {
        let mut parts: Vec<&str> = self.tickets.iter().map(TicketId::as_str).collect();
        if let Some(first) = self.tickets.first() {
            parts.push(first.as_str());
        }
        parts.join(" -> ")
    }
}

/// Result of cycle detection over a [`TicketGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Starting tickets of traversals that met a back edge, in graph order
    pub participants: Vec<TicketId>,

    /// Distinct cycles closed by back edges
    pub cycles: Vec<Cycle>,

    /// Tickets that are on a cycle or lead into one, in graph order
    pub implicated: Vec<TicketId>,
}

impl CycleReport {
    /// Whether the graph is free of circular dependencies.
    pub fn is_acyclic(&self) -> bool {
        self.participants.is_empty()
    }

    /// Tickets that are on a detected cycle or started a traversal into one.
    ///
    /// Every cycle in the graph has at least one member in this set.
    pub fn implicated(&self) -> &[TicketId] {
        &self.implicated
    }
}

/// Traversal state, local to one [`detect_cycles`] call.
struct Dfs<'a> {
    graph: &'a TicketGraph,
    visited: Vec<bool>,
    on_stack: Vec<bool>,
    path: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

/// A ticket on the current path and the next dependency to follow.
struct Frame {
    node: usize,
    deps: Vec<usize>,
    next: usize,
}

impl Dfs<'_> {
    fn enter(&mut self, node: usize) -> Frame {
        self.visited[node] = true;
        self.on_stack[node] = true;
        self.path.push(node);

        let record = self.graph.at(node);
        Frame {
            node,
            deps: self.graph.dependency_positions(record).collect(),
            next: 0,
        }
    }

    /// Traverse everything reachable from `start`, returning whether a back
    /// edge was met.
    ///
    /// The path lives on the heap, so chain length is not bounded by the
    /// thread stack.
    fn traverse(&mut self, start: usize) -> bool {
        let mut found = false;
        let mut frames = vec![self.enter(start)];

        while let Some(frame) = frames.last_mut() {
            let Some(&dep) = frame.deps.get(frame.next) else {
                let node = frame.node;
                frames.pop();
                self.path.pop();
                self.on_stack[node] = false;
                continue;
            };
            frame.next += 1;

            if !self.visited[dep] {
                let child = self.enter(dep);
                frames.push(child);
            } else if self.on_stack[dep] {
                if let Some(pos) = self.path.iter().position(|&n| n == dep) {
                    self.cycles.push(self.path[pos..].to_vec());
                }
                found = true;
            }
        }

        found
    }
}

/// Detect circular dependencies between tickets.
///
/// Traversals start from each unvisited ticket in graph order and run to
/// completion. Dependencies on tickets missing from the graph are ignored.
pub fn detect_cycles(graph: &TicketGraph) -> CycleReport {
    let n = graph.len();
    let mut dfs = Dfs {
        graph,
        visited: vec![false; n],
        on_stack: vec![false; n],
        path: Vec::new(),
        cycles: Vec::new(),
    };

    let mut participants = Vec::new();
    for start in 0..n {
        if !dfs.visited[start] && dfs.traverse(start) {
            participants.push(start);
        }
    }

    let cycles = deduplicate_cycles(dfs.cycles);

    let mut implicated: HashSet<usize> = participants.iter().copied().collect();
    implicated.extend(cycles.iter().flatten().copied());
    let mut implicated: Vec<usize> = implicated.into_iter().collect();
    implicated.sort_unstable();

    let id_at = |pos: usize| graph.at(pos).id.clone();
    let report = CycleReport {
        participants: participants.into_iter().map(id_at).collect(),
        cycles: cycles
            .into_iter()
            .map(|cycle| Cycle {
                tickets: cycle.into_iter().map(id_at).collect(),
            })
            .collect(),
        implicated: implicated.into_iter().map(id_at).collect(),
    };

    if report.is_acyclic() {
        tracing::debug!(tickets = n, "No circular dependencies");
    } else {
        tracing::info!(
            participants = report.participants.len(),
            cycles = report.cycles.len(),
            "Circular dependencies detected"
        );
    }

    report
}

/// Deduplicate cycles that differ only in their starting ticket.
///
/// Direction is kept: `a -> b -> c` and `a -> c -> b` are different cycles.
fn deduplicate_cycles(cycles: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut unique = Vec::new();

    for cycle in cycles {
        if cycle.is_empty() {
            continue;
        }
        let normalized = normalize_cycle(&cycle);
        if seen.insert(normalized.clone()) {
            unique.push(normalized);
        }
    }

    unique.sort();
    unique
}

/// Rotate a cycle so its lowest position comes first.
fn normalize_cycle(cycle: &[usize]) -> Vec<usize> {
    let min_idx = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, pos)| **pos)
        .map_or(0, |(idx, _)| idx);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&cycle[min_idx..]);
    normalized.extend_from_slice(&cycle[..min_idx]);
    normalized
}

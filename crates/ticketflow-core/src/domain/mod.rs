//! Domain types for ticket documents.
//!
//! This module contains the records produced by the parser and consumed by
//! the cycle detector and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Title used when a ticket has no `# Ticket-<id>: <title>` heading.
pub const DEFAULT_TITLE: &str = "Unknown";

/// Numeric identifier of a ticket, taken from its file name.
///
/// Ids are compared as strings, so `"1"` and `"001"` are different tickets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Create a new ticket ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mermaid node identifier for this ticket (`T001`).
    pub fn node_id(&self) -> String {
        format!("T{}", self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lifecycle stage of a ticket, written in the document as a glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    /// Not started (🟡)
    #[default]
    Pending,

    /// Being worked on (🔵)
    InProgress,

    /// Completed (✅)
    Done,

    /// Waiting on something outside the ticket (🔴)
    Blocked,
}

impl TicketStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Pending,
        TicketStatus::InProgress,
        TicketStatus::Done,
        TicketStatus::Blocked,
    ];

    /// Map a status glyph to its status.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '🟡' => Some(Self::Pending),
            '🔵' => Some(Self::InProgress),
            '✅' => Some(Self::Done),
            '🔴' => Some(Self::Blocked),
            _ => None,
        }
    }

    /// The glyph this status is written as.
    pub fn glyph(self) -> char {
        match self {
            Self::Pending => '🟡',
            Self::InProgress => '🔵',
            Self::Done => '✅',
            Self::Blocked => '🔴',
        }
    }

    /// Mermaid fill color for nodes with this status.
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Done => "#90EE90",
            Self::InProgress => "#87CEEB",
            Self::Blocked => "#FFB6C1",
            Self::Pending => "#FFD700",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        };
        write!(f, "{s}")
    }
}

/// One parsed ticket document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRecord {
    /// Identifier from the file name
    pub id: TicketId,

    /// Title from the `# Ticket-<id>:` heading, or [`DEFAULT_TITLE`]
    pub title: String,

    /// Raw dependency references, in declaration order (e.g. `"ticket-003"`)
    pub depends_on: Vec<String>,

    /// Status from the `**status**:` glyph, or pending
    pub status: TicketStatus,

    /// File the record was parsed from
    pub path: PathBuf,
}

impl TicketRecord {
    /// Create a record with a default title, no dependencies and pending status.
    pub fn new(id: impl Into<TicketId>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            depends_on: Vec::new(),
            status: TicketStatus::default(),
            path: path.into(),
        }
    }
}

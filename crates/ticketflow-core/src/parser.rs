//! Ticket document parsing.
//!
//! A ticket is a markdown file named `ticket-<NNN>-<slug>.md` with loosely
//! structured metadata lines:
//!
//! ```markdown
//! # Ticket-003: Wire the API layer
//!
//! - **depends_on**: ticket-001, ticket-002
//! - **status**: 🔵
//! ```
//!
//! Each field has its own extractor returning an `Option`, so the defaulting
//! policy lives in [`parse_ticket`] alone. Extractors scan line by line and
//! use the first matching line.

use crate::domain::{DEFAULT_TITLE, TicketId, TicketRecord, TicketStatus};
use crate::error::{Error, Result};
use crate::graph::TicketGraph;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File name prefix of ticket documents.
pub const TICKET_FILE_PREFIX: &str = "ticket-";

/// File extension of ticket documents.
pub const TICKET_FILE_EXTENSION: &str = "md";

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ticket-(\d+)").expect("valid id regex"));

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid reference regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+Ticket-\d+:\s*(.+)$").expect("valid title regex"));

static DEPENDS_ON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*depends_on\*\*:\s*(.+)$").expect("valid depends_on regex"));

static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*status\*\*:\s*([🟡🔵✅🔴])").expect("valid status regex"));

/// Capture group 1 of the first line matching `re`.
fn first_capture<'a>(re: &Regex, content: &'a str) -> Option<&'a str> {
    content
        .lines()
        .find_map(|line| re.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

/// Extract the ticket id from a file stem (`ticket-001-setup` -> `001`).
pub fn extract_id(file_stem: &str) -> Option<TicketId> {
    ID_RE
        .captures(file_stem)
        .and_then(|caps| caps.get(1))
        .map(|m| TicketId::new(m.as_str()))
}

/// Extract the id a dependency reference points at.
///
/// Uses the first run of digits in the reference, so `ticket-003`,
/// `003-api` and `#003` all name ticket `003`.
pub fn reference_id(reference: &str) -> Option<TicketId> {
    REFERENCE_RE
        .find(reference)
        .map(|m| TicketId::new(m.as_str()))
}

/// Extract the title from the first `# Ticket-<id>: <title>` heading.
pub fn extract_title(content: &str) -> Option<String> {
    first_capture(&TITLE_RE, content)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// Extract dependency references from the first `**depends_on**:` line.
///
/// Returns `Some(vec![])` when the field says `none` (any case).
pub fn extract_depends_on(content: &str) -> Option<Vec<String>> {
    let raw = first_capture(&DEPENDS_ON_RE, content)?.trim();

    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }

    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Extract the status from the first `**status**: <glyph>` line.
pub fn extract_status(content: &str) -> Option<TicketStatus> {
    first_capture(&STATUS_RE, content)
        .and_then(|glyph| glyph.chars().next())
        .and_then(TicketStatus::from_glyph)
}

/// Parse one ticket document.
///
/// Returns `None` when the file name carries no `ticket-<digits>` id. Every
/// other field falls back to its default when it cannot be extracted.
pub fn parse_ticket(path: &Path, content: &str) -> Option<TicketRecord> {
    let stem = path.file_stem()?.to_str()?;
    let id = extract_id(stem)?;

    Some(TicketRecord {
        id,
        title: extract_title(content).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        depends_on: extract_depends_on(content).unwrap_or_default(),
        status: extract_status(content).unwrap_or_default(),
        path: path.to_path_buf(),
    })
}

/// Whether a file name looks like a ticket document (`ticket-*.md`).
pub fn is_ticket_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(TICKET_FILE_PREFIX));
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == TICKET_FILE_EXTENSION);

    has_prefix && has_extension
}

/// Ticket files in `dir`, sorted by file name.
pub fn ticket_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::InvalidTicketsDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_ticket_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read every ticket document in `dir` into a [`TicketGraph`].
///
/// Files are processed in file name order, which is also the iteration order
/// of the resulting graph. Files whose name has no numeric id are skipped.
///
/// # Errors
///
/// Returns an error if the directory or a ticket file cannot be read.
pub fn load_tickets(dir: &Path) -> Result<TicketGraph> {
    let files = ticket_files(dir)?;
    let mut records = Vec::with_capacity(files.len());

    for path in files {
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;

        match parse_ticket(&path, &content) {
            Some(record) => {
                tracing::debug!(
                    id = %record.id,
                    status = %record.status,
                    deps = record.depends_on.len(),
                    "Parsed ticket"
                );
                records.push(record);
            }
            None => {
                tracing::debug!(path = %path.display(), "Skipping file without a ticket id");
            }
        }
    }

    let graph = TicketGraph::from_records(records);

    for dangling in graph.dangling_references() {
        tracing::debug!(
            ticket = %dangling.ticket,
            reference = %dangling.reference,
            "Ignoring dependency on a ticket that is not in the directory"
        );
    }

    Ok(graph)
}

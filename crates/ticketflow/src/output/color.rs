//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green  (done tickets, passed checks)
//!   - Active:         blue   (in-progress tickets)
//!   - Warning/Ready:  yellow (pending tickets, warnings)
//!   - Error/Blocked:  red    (blocked tickets, cycles, errors)
//!   - Info/Reference: cyan   (ticket ids, paths)
//!   - Muted:          dimmed (field labels, separators)

use colored::Colorize;
use ticketflow_core::domain::TicketStatus;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply color to status text based on ticket status.
pub(crate) fn colorize_status(status: TicketStatus, config: &OutputConfig) -> String {
    let text = format!("{status}");
    if !config.use_colors {
        return text;
    }
    match status {
        TicketStatus::Pending => text.yellow().to_string(),
        TicketStatus::InProgress => text.blue().to_string(),
        TicketStatus::Blocked => text.red().to_string(),
        TicketStatus::Done => text.green().to_string(),
    }
}

/// Get a colored status icon, with ASCII fallback support.
pub(crate) fn colored_status_icon(status: TicketStatus, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match status {
            TicketStatus::Pending => "o",
            TicketStatus::InProgress => ">",
            TicketStatus::Blocked => "x",
            TicketStatus::Done => "+",
        }
    } else {
        match status {
            TicketStatus::Pending => "○",
            TicketStatus::InProgress => "▶",
            TicketStatus::Blocked => "✗",
            TicketStatus::Done => "✓",
        }
    };

    if !config.use_colors {
        return icon.to_string();
    }

    match status {
        TicketStatus::Pending => icon.yellow().to_string(),
        TicketStatus::InProgress => icon.blue().to_string(),
        TicketStatus::Blocked => icon.red().to_string(),
        TicketStatus::Done => icon.green().to_string(),
    }
}

/// Pass/fail marker, with ASCII fallback support.
pub(crate) fn check_mark(ok: bool, config: &OutputConfig) -> String {
    let icon = match (ok, config.use_ascii) {
        (true, false) => "✓",
        (false, false) => "✗",
        (true, true) => "+",
        (false, true) => "x",
    };
    if ok {
        success(icon, config)
    } else {
        error(icon, config)
    }
}

/// Colorize a ticket id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    info(id, config)
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

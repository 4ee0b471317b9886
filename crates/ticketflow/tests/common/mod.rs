//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the ticketflow binary in the specified directory with colors disabled
pub fn run_ticketflow_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ticketflow"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("TICKETFLOW_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ticketflow binary")
}

/// Write `ticket-<id>.md` with the given title, depends_on value and status glyph
pub fn write_ticket(dir: &Path, id: &str, title: &str, depends_on: &str, status: Option<&str>) {
    let mut content = format!("# Ticket-{id}: {title}\n\n- **depends_on**: {depends_on}\n");
    if let Some(glyph) = status {
        content.push_str(&format!("- **status**: {glyph}\n"));
    }
    content.push_str("\n## Summary\nSomething to do.\n");
    std::fs::write(dir.join(format!("ticket-{id}.md")), content)
        .expect("Failed to write ticket file");
}

/// Stdout of a finished run as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished run as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

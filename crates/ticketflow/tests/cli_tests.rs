//! Integration tests for the ticketflow CLI.
//!
//! These tests run the built binary against ticket directories in temp dirs.

use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

mod common;
use common::{run_ticketflow_in_dir, stderr, stdout, write_ticket};

const DIAGRAM_FILE: &str = "dependencies.mermaid";

const COMPLETE_TICKET: &str = "\
# Ticket-001: Project setup

- **depends_on**: none
- **estimated_time**: 2-3h
- **priority**: P1

## Summary
Set up the workspace.

## Why
Everything else builds on it.

## Scope
Cargo workspace.

## Out-of-Scope
Release automation.

## Acceptance Criteria
- [ ] **AC1**: workspace builds
- [ ] **AC2**: CI runs tests
- [ ] **AC3**: README explains layout

## Implementation Steps
1. Create the workspace.

## Test/Validation
Run the test suite.

## Files to Modify/Add
- Cargo.toml

## Definition of Done
Merged.
";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with a `tickets/` subdirectory
#[fixture]
fn tickets_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::create_dir(temp.path().join("tickets")).expect("Failed to create tickets dir");
    temp
}

fn diagram(temp: &TempDir) -> String {
    fs::read_to_string(temp.path().join("tickets").join(DIAGRAM_FILE))
        .expect("diagram should have been written")
}

// ============================================================================
// Help, Version and Usage Errors
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_ticketflow_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    assert!(out.contains("graph"));
    assert!(out.contains("validate"));
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_ticketflow_in_dir(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
#[case::no_args(&[])]
#[case::graph_without_dir(&["graph"])]
#[case::unknown_command(&["render", "tickets"])]
#[case::unknown_flag(&["graph", "tickets", "--bogus"])]
#[case::extra_positional(&["graph", "tickets", "more"])]
fn test_usage_errors_exit_one(temp_dir: TempDir, #[case] args: &[&str]) {
    let output = run_ticketflow_in_dir(temp_dir.path(), args);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"));
}

// ============================================================================
// Graph Command
// ============================================================================

#[rstest]
fn test_graph_three_tickets_two_edges(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Project setup", "none", Some("✅"));
    write_ticket(&dir, "002", "Data model", "ticket-001", Some("🔵"));
    write_ticket(&dir, "003", "API layer", "ticket-002", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Found 3 tickets"));
    assert!(out.contains("No circular dependencies detected"));
    assert!(out.contains("Dependency graph saved to:"));
    assert!(out.contains("Execution order: 001 -> 002 -> 003"));

    let written = diagram(&tickets_dir);
    assert_eq!(written.matches("-->").count(), 2);
    assert!(written.contains("    T001 --> T002"));
    assert!(written.contains("    T002 --> T003"));
    assert!(written.contains("    style T001 fill:#90EE90"));
    assert!(written.contains("    style T002 fill:#87CEEB"));
    assert!(written.contains("    style T003 fill:#FFD700"));
}

#[rstest]
fn test_graph_mutual_dependency_fails_without_writing(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "First", "ticket-002", None);
    write_ticket(&dir, "002", "Second", "ticket-001", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Circular dependencies detected involving tickets: 001, 002"));
    assert!(out.contains("Cycle 1: 001 -> 002 -> 001"));
    assert!(!dir.join(DIAGRAM_FILE).exists());
}

#[rstest]
fn test_graph_self_dependency_fails(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Loops", "ticket-001", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("involving tickets: 001"));
    assert!(!dir.join(DIAGRAM_FILE).exists());
}

#[rstest]
fn test_graph_dangling_reference_draws_no_edge(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Lonely", "ticket-099", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let written = diagram(&tickets_dir);
    assert!(written.contains("    T001[Ticket-001: Lonely]"));
    assert!(!written.contains("-->"));
    assert!(!written.contains("T099"));
}

#[rstest]
fn test_graph_missing_status_is_gold(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "No status", "none", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert!(output.status.success());
    assert!(diagram(&tickets_dir).contains("style T001 fill:#FFD700"));
}

#[rstest]
fn test_graph_long_title_truncated(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    let title = "Implement the authentication middleware layer";
    assert_eq!(title.chars().count(), 45);
    write_ticket(&dir, "001", title, "none", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert!(output.status.success());
    assert!(diagram(&tickets_dir).contains("T001[Ticket-001: Implement the authentication m]"));
}

#[rstest]
fn test_graph_diagram_has_no_trailing_newline(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Setup", "none", None);

    run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    let written = diagram(&tickets_dir);
    assert!(written.starts_with("```mermaid\ngraph TD\n"));
    assert!(written.ends_with("\n```"));
}

#[rstest]
fn test_graph_output_override(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Setup", "none", None);

    let output = run_ticketflow_in_dir(
        tickets_dir.path(),
        &["graph", "tickets", "--output", "deps.md"],
    );

    assert!(output.status.success());
    assert!(tickets_dir.path().join("deps.md").exists());
    assert!(!dir.join(DIAGRAM_FILE).exists());
}

#[rstest]
fn test_graph_config_file_sets_output_and_width(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "A rather long ticket title", "none", None);
    fs::write(
        tickets_dir.path().join(".ticketflow.yaml"),
        "graph:\n  output-file: graph.mmd\n  title-width: 8\n",
    )
    .unwrap();

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["graph", "tickets"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written = fs::read_to_string(dir.join("graph.mmd")).unwrap();
    assert!(written.contains("T001[Ticket-001: A rather]"));
}

#[rstest]
fn test_graph_invalid_config_is_fatal(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Setup", "none", None);
    let config = tickets_dir.path().join("custom.yaml");
    fs::write(&config, "graph:\n  colour: red\n").unwrap();

    let output = run_ticketflow_in_dir(
        tickets_dir.path(),
        &["--config", "custom.yaml", "graph", "tickets"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
    assert!(!dir.join(DIAGRAM_FILE).exists());
}

#[rstest]
fn test_graph_missing_directory_is_fatal(temp_dir: TempDir) {
    let output = run_ticketflow_in_dir(temp_dir.path(), &["graph", "nowhere"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error"));
}

#[rstest]
fn test_graph_json_output(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "Setup", "none", Some("✅"));
    write_ticket(&dir, "002", "Model", "ticket-001, ticket-042", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["--json", "graph", "tickets"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tickets"].as_array().unwrap().len(), 2);
    assert_eq!(json["tickets"][0]["status"], "done");
    assert_eq!(json["edges"], 1);
    assert_eq!(json["dangling"][0]["reference"], "ticket-042");
    assert_eq!(json["execution_order"], serde_json::json!(["001", "002"]));
    assert!(json["output"].as_str().unwrap().ends_with(DIAGRAM_FILE));
}

#[rstest]
fn test_graph_json_output_with_cycle(tickets_dir: TempDir) {
    let dir = tickets_dir.path().join("tickets");
    write_ticket(&dir, "001", "First", "ticket-002", None);
    write_ticket(&dir, "002", "Second", "ticket-001", None);

    let output = run_ticketflow_in_dir(tickets_dir.path(), &["--json", "graph", "tickets"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cycles"]["participants"], serde_json::json!(["001"]));
    assert_eq!(json["cycles"]["implicated"], serde_json::json!(["001", "002"]));
    assert!(json["output"].is_null());
    assert!(json["execution_order"].is_null());
}

// ============================================================================
// Validate Command
// ============================================================================

#[rstest]
fn test_validate_complete_ticket_passes(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("ticket-001.md"), COMPLETE_TICKET).unwrap();

    let output = run_ticketflow_in_dir(temp_dir.path(), &["validate", "ticket-001.md"]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("VALIDATION REPORT"));
    assert!(out.contains("Score: 12/12"));
    assert!(out.contains("All checks passed!"));
    assert!(out.contains("RESULT: Excellent - Ready for execution"));
}

#[rstest]
fn test_validate_missing_out_of_scope_fails(temp_dir: TempDir) {
    let content = COMPLETE_TICKET.replace("## Out-of-Scope\nRelease automation.\n\n", "");
    fs::write(temp_dir.path().join("ticket-001.md"), content).unwrap();

    let output = run_ticketflow_in_dir(temp_dir.path(), &["validate", "ticket-001.md"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Score: 11/12"));
    assert!(out.contains("CRITICAL: Out-of-Scope section is mandatory!"));
}

#[rstest]
fn test_validate_warnings_still_pass(temp_dir: TempDir) {
    let content = COMPLETE_TICKET.replace("2-3h", "3-5h");
    fs::write(temp_dir.path().join("ticket-001.md"), content).unwrap();

    let output = run_ticketflow_in_dir(temp_dir.path(), &["validate", "ticket-001.md"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Time estimate 3-5h is on the high side (ideal: 2-4h)"));
}

#[rstest]
fn test_validate_json_output(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("ticket-001.md"), COMPLETE_TICKET).unwrap();

    let output = run_ticketflow_in_dir(
        temp_dir.path(),
        &["validate", "ticket-001.md", "--json"],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["score"], 12);
    assert_eq!(json["acceptance_criteria"], 3);
}

#[rstest]
fn test_validate_missing_file_is_fatal(temp_dir: TempDir) {
    let output = run_ticketflow_in_dir(temp_dir.path(), &["validate", "ticket-404.md"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ticket-404.md"));
}

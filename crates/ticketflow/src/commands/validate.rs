//! Implementation of the `validate` command.

use crate::config::ValidateConfig;
use crate::error::Result;
use std::fs;
use std::path::Path;
use ticketflow_core::validate::{ValidationReport, ValidationRules, validate_ticket};

/// Read a ticket file and check it against the configured thresholds.
pub fn validate_file(path: &Path, config: &ValidateConfig) -> Result<ValidationReport> {
    let content = fs::read_to_string(path).map_err(|source| ticketflow_core::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let report = validate_ticket(&content, &ValidationRules::from(config));
    tracing::info!(
        path = %path.display(),
        score = report.score,
        valid = report.is_valid(),
        "Validated ticket file"
    );
    Ok(report)
}

//! Error types for ticketflow CLI operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for ticketflow CLI operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Loading or parsing tickets failed.
    #[error(transparent)]
    Core(#[from] ticketflow_core::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A diagram was requested for a graph containing cycles.
    #[error("Refusing to write {0}: the dependency graph has circular dependencies")]
    CyclicGraph(PathBuf),
}

/// A specialized Result type for ticketflow CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

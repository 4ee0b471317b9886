//! Error types for ticketflow-core operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for ticketflow-core operations.
///
/// Only filesystem problems are errors. Malformed ticket content never is:
/// fields fall back to their defaults and files without an id are skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a directory or ticket file failed.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The tickets path exists but is not a directory.
    #[error("Not a tickets directory: {}", .0.display())]
    InvalidTicketsDir(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A specialized Result type for ticketflow-core operations.
pub type Result<T> = std::result::Result<T, Error>;

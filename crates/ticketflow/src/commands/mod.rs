//! Command implementations.
//!
//! These hold the work behind each subcommand with no terminal output, so
//! they can be driven from tests and from [`crate::cli`] alike.

pub mod graph;
pub mod validate;

//! Ticketflow - dependency graphs for markdown ticket documents.
//!
//! This crate provides the `ticketflow` command-line interface on top of
//! [`ticketflow_core`].

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

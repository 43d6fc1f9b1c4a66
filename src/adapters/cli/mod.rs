//! CLI Adapter
//!
//! Command-line interface for the tokenscout binary.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{AuditCmd, CliApp, Command, ReportCmd};

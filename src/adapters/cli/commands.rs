//! CLI Command Handlers
//!
//! Argument definitions for the tokenscout CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TokenScout - ERC-20 token risk report aggregator
#[derive(Parser, Debug)]
#[command(
    name = "tokenscout",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "ERC-20 token risk report aggregator",
    long_about = "TokenScout aggregates token security properties, market data and \
                  liquidity lock/burn analysis from public providers and renders a \
                  chat-ready risk report."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve token statistics and print the rendered report
    Report(ReportCmd),

    /// Trigger an external audit job and follow it to completion
    Audit(AuditCmd),
}

/// Resolve and render a token report
#[derive(Parser, Debug)]
pub struct ReportCmd {
    /// Token contract address
    pub contract: String,

    /// Pair address to use when transaction history yields none
    #[arg(long)]
    pub pair: Option<String>,

    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress the liquidity lock/burn banner
    #[arg(long)]
    pub no_banner: bool,
}

/// Run an external audit job
#[derive(Parser, Debug)]
pub struct AuditCmd {
    /// Token contract address
    pub contract: String,

    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

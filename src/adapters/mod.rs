//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Providers: HTTP JSON clients for the five data sources and the audit job API
//! - CLI: Command-line interface handlers

pub mod cli;
pub mod providers;

pub use cli::CliApp;
pub use providers::{
    AuditJobClient, JsonClient, JsonClientConfig, MarketDataClient, MarketingWalletClient,
    SecondaryAuditClient, TokenSecurityClient, TransactionClient,
};

//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The five token data providers (security, market, wallet, transactions, secondary audit)
//! - The long-running external audit job service

pub mod audit_job;
pub mod mocks;
pub mod models;
pub mod providers;

// Re-export main traits and types
pub use audit_job::AuditJobSource;
pub use providers::{
    MarketDataSource, MarketingWalletSource, SecondaryAuditSource, SourceError,
    TokenSecuritySource, TransactionSource,
};

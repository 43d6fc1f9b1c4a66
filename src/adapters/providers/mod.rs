//! HTTP provider adapters
//!
//! Concrete clients for the data source and audit job ports, all sharing one
//! `JsonClient` with timeout and retry behavior.

pub mod audit;
pub mod http;
pub mod market;
pub mod token_security;

pub use audit::{AuditJobClient, SecondaryAuditClient};
pub use http::{JsonClient, JsonClientConfig};
pub use market::{MarketDataClient, MarketingWalletClient, TransactionClient};
pub use token_security::TokenSecurityClient;

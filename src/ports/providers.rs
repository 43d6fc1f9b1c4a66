//! Data source ports
//!
//! One trait per external data provider. Each fetch stands alone: the resolver
//! decides which failures are fatal and which degrade to an absent payload.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{
    MarketData, MarketingWalletData, SecondaryAuditData, TokenSecurityData, TransactionData,
};

/// Errors a data source client can produce.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("provider returned no data")]
    Missing,
}

/// Primary token security properties (flags, taxes, LP holders).
#[async_trait]
pub trait TokenSecuritySource: Send + Sync {
    async fn token_security(&self, contract: &str) -> Result<TokenSecurityData, SourceError>;
}

/// Secondary audit data carrying lock/burn reference links.
#[async_trait]
pub trait SecondaryAuditSource: Send + Sync {
    async fn secondary_audit(&self, contract: &str) -> Result<SecondaryAuditData, SourceError>;
}

/// Market data: price, supply, volume, liquidity, holder count.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn market_data(&self, contract: &str) -> Result<MarketData, SourceError>;
}

/// Marketing wallet lookup.
#[async_trait]
pub trait MarketingWalletSource: Send + Sync {
    async fn marketing_wallet(&self, contract: &str)
        -> Result<MarketingWalletData, SourceError>;
}

/// Recent dex transaction history.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn transaction_data(&self, contract: &str) -> Result<TransactionData, SourceError>;
}

//! Supplemental Data Clients
//!
//! Market data, marketing wallet and transaction history live on the same
//! backing service and share one URL convention: `<base>?contract=<address>`.

use async_trait::async_trait;

use super::http::JsonClient;
use crate::ports::models::{MarketData, MarketingWalletData, TransactionData};
use crate::ports::providers::{
    MarketDataSource, MarketingWalletSource, SourceError, TransactionSource,
};

fn contract_endpoint(base_url: &str, contract: &str) -> String {
    format!("{base_url}?contract={contract}")
}

/// Client for the market data endpoint
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: JsonClient,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for MarketDataClient {
    async fn market_data(&self, contract: &str) -> Result<MarketData, SourceError> {
        self.client
            .get_json(&contract_endpoint(&self.base_url, contract))
            .await
    }
}

/// Client for the marketing wallet endpoint
#[derive(Debug, Clone)]
pub struct MarketingWalletClient {
    client: JsonClient,
    base_url: String,
}

impl MarketingWalletClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MarketingWalletSource for MarketingWalletClient {
    async fn marketing_wallet(
        &self,
        contract: &str,
    ) -> Result<MarketingWalletData, SourceError> {
        self.client
            .get_json(&contract_endpoint(&self.base_url, contract))
            .await
    }
}

/// Client for the transaction history endpoint
#[derive(Debug, Clone)]
pub struct TransactionClient {
    client: JsonClient,
    base_url: String,
}

impl TransactionClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TransactionSource for TransactionClient {
    async fn transaction_data(&self, contract: &str) -> Result<TransactionData, SourceError> {
        self.client
            .get_json(&contract_endpoint(&self.base_url, contract))
            .await
    }
}

//! Token Security Client
//!
//! Fetches the primary security payload. The provider keys its response by
//! contract address inside a `result` envelope, usually lowercased.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::http::JsonClient;
use crate::ports::models::TokenSecurityData;
use crate::ports::providers::{SourceError, TokenSecuritySource};

/// Client for the token security endpoint
#[derive(Debug, Clone)]
pub struct TokenSecurityClient {
    client: JsonClient,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct SecurityEnvelope {
    #[serde(default)]
    result: HashMap<String, TokenSecurityData>,
}

impl TokenSecurityClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, contract: &str) -> String {
        format!("{}?contract_addresses={}", self.base_url, contract)
    }

    fn unwrap_envelope(
        envelope: SecurityEnvelope,
        contract: &str,
    ) -> Result<TokenSecurityData, SourceError> {
        let lowercase = contract.to_lowercase();
        envelope
            .result
            .get(contract)
            .or_else(|| envelope.result.get(&lowercase))
            .cloned()
            .ok_or(SourceError::Missing)
    }
}

#[async_trait]
impl TokenSecuritySource for TokenSecurityClient {
    async fn token_security(&self, contract: &str) -> Result<TokenSecurityData, SourceError> {
        let envelope: SecurityEnvelope = self.client.get_json(&self.endpoint(contract)).await?;
        Self::unwrap_envelope(envelope, contract)
    }
}

//! Audit Service Clients
//!
//! Two faces of the audit backend: the secondary audit payload (lock/burn
//! reference links, same URL convention as the other supplemental endpoints)
//! and the long-running audit job API (`POST /<token>`, `GET /<token>/status`,
//! `GET /<token>/json`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::http::JsonClient;
use crate::ports::audit_job::AuditJobSource;
use crate::ports::models::{AuditReport, AuditStatusResponse, SecondaryAuditData};
use crate::ports::providers::{SecondaryAuditSource, SourceError};

/// Client for the secondary audit data endpoint
#[derive(Debug, Clone)]
pub struct SecondaryAuditClient {
    client: JsonClient,
    base_url: String,
}

impl SecondaryAuditClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SecondaryAuditSource for SecondaryAuditClient {
    async fn secondary_audit(&self, contract: &str) -> Result<SecondaryAuditData, SourceError> {
        let url = format!("{}?contract={}", self.base_url, contract);
        self.client.get_json(&url).await
    }
}

/// Client for the audit job API
#[derive(Debug, Clone)]
pub struct AuditJobClient {
    client: JsonClient,
    base_url: String,
}

/// The finished report arrives double-encoded: a JSON document inside the
/// `data` field, itself either a string or an already-decoded object.
#[derive(Debug, Deserialize)]
struct RawAuditResult {
    #[serde(default)]
    data: Value,
}

impl AuditJobClient {
    pub fn new(client: JsonClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn decode_report(raw: RawAuditResult) -> Result<AuditReport, SourceError> {
        match raw.data {
            Value::String(encoded) => serde_json::from_str(&encoded)
                .map_err(|e| SourceError::Decode(e.to_string())),
            data @ Value::Object(_) => serde_json::from_value(data)
                .map_err(|e| SourceError::Decode(e.to_string())),
            _ => Err(SourceError::Missing),
        }
    }
}

#[async_trait]
impl AuditJobSource for AuditJobClient {
    async fn start_audit(&self, contract: &str) -> Result<(), SourceError> {
        let url = format!("{}/{}", self.base_url, contract);
        // The trigger response body carries nothing we act on
        let _: Value = self.client.post_json(&url).await?;
        Ok(())
    }

    async fn poll_status(&self, contract: &str) -> Result<AuditStatusResponse, SourceError> {
        let url = format!("{}/{}/status", self.base_url, contract);
        self.client.get_json(&url).await
    }

    async fn fetch_result(&self, contract: &str) -> Result<AuditReport, SourceError> {
        let url = format!("{}/{}/json", self.base_url, contract);
        let raw: RawAuditResult = self.client.get_json(&url).await?;
        Self::decode_report(raw)
    }
}

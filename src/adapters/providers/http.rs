//! Shared JSON Client
//!
//! Thin wrapper over reqwest used by every provider adapter: per-request
//! timeout, bounded retries with backoff on rate limiting and server errors.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::ports::providers::SourceError;

/// Configuration for the shared JSON client
#[derive(Debug, Clone)]
pub struct JsonClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Number of attempts before giving up
    pub max_retries: u32,
    /// Base delay for backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Default for JsonClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

/// HTTP JSON client shared by all provider adapters
#[derive(Debug, Clone)]
pub struct JsonClient {
    config: JsonClientConfig,
    http: Client,
}

impl JsonClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(JsonClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: JsonClientConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// GET a URL and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.execute(Method::GET, url).await?;
        decode(response).await
    }

    /// POST to a URL with an empty body and decode the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.execute(Method::POST, url).await?;
        decode(response).await
    }

    /// Execute a request with retry on 429 and 5xx
    async fn execute(&self, method: Method, url: &str) -> Result<Response, SourceError> {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            match self.http.request(method.clone(), url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * (attempt as u64 + 1),
                        );
                        tracing::warn!(
                            url,
                            status = status.as_u16(),
                            "provider throttled or failing, backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error = Some(SourceError::Status(status.as_u16()));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    if !status.is_success() {
                        return Err(SourceError::Status(status.as_u16()));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(SourceError::Transport(e.to_string()));
                    let backoff = Duration::from_millis(
                        self.config.retry_base_delay_ms * (attempt as u64 + 1),
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| SourceError::Transport("max retries exceeded".to_string())))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
    response
        .json()
        .await
        .map_err(|e| SourceError::Decode(e.to_string()))
}

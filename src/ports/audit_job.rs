//! Audit job port
//!
//! Long-running external audit jobs: trigger one, poll its status, fetch the
//! finished report. The polling loop itself lives in `application::audit_poller`.

use async_trait::async_trait;

use super::models::{AuditReport, AuditStatusResponse};
use super::providers::SourceError;

/// External audit job service.
#[async_trait]
pub trait AuditJobSource: Send + Sync {
    /// Kick off an audit for the contract. Idempotent on the provider side.
    async fn start_audit(&self, contract: &str) -> Result<(), SourceError>;

    /// Current job status, with an optional provider error message.
    async fn poll_status(&self, contract: &str) -> Result<AuditStatusResponse, SourceError>;

    /// Fetch the finished report. Only meaningful once the status is `Ended`.
    async fn fetch_result(&self, contract: &str) -> Result<AuditReport, SourceError>;
}

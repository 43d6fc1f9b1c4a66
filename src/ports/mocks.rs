use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::audit_job::AuditJobSource;
use super::models::{
    AuditReport, AuditStatusResponse, MarketData, MarketingWalletData, SecondaryAuditData,
    TokenSecurityData, TransactionData,
};
use super::providers::{
    MarketDataSource, MarketingWalletSource, SecondaryAuditSource, SourceError,
    TokenSecuritySource, TransactionSource,
};

/// Mock token security source that records calls and serves a fixed payload
#[derive(Debug, Default)]
pub struct MockSecuritySource {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<TokenSecurityData>>>,
}

impl MockSecuritySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the payload served for every call
    pub fn with_payload(self, data: TokenSecurityData) -> Self {
        *self.response.lock().unwrap() = Some(data);
        self
    }

    /// Get all recorded contract addresses
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSecuritySource for MockSecuritySource {
    async fn token_security(&self, contract: &str) -> Result<TokenSecurityData, SourceError> {
        self.calls.lock().unwrap().push(contract.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

/// Mock secondary audit source
#[derive(Debug, Default)]
pub struct MockSecondaryAuditSource {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<SecondaryAuditData>>>,
}

impl MockSecondaryAuditSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(self, data: SecondaryAuditData) -> Self {
        *self.response.lock().unwrap() = Some(data);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecondaryAuditSource for MockSecondaryAuditSource {
    async fn secondary_audit(&self, contract: &str) -> Result<SecondaryAuditData, SourceError> {
        self.calls.lock().unwrap().push(contract.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

/// Mock market data source
#[derive(Debug, Default)]
pub struct MockMarketSource {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<MarketData>>>,
}

impl MockMarketSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(self, data: MarketData) -> Self {
        *self.response.lock().unwrap() = Some(data);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataSource for MockMarketSource {
    async fn market_data(&self, contract: &str) -> Result<MarketData, SourceError> {
        self.calls.lock().unwrap().push(contract.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

/// Mock marketing wallet source
#[derive(Debug, Default)]
pub struct MockWalletSource {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<MarketingWalletData>>>,
}

impl MockWalletSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(self, data: MarketingWalletData) -> Self {
        *self.response.lock().unwrap() = Some(data);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketingWalletSource for MockWalletSource {
    async fn marketing_wallet(
        &self,
        contract: &str,
    ) -> Result<MarketingWalletData, SourceError> {
        self.calls.lock().unwrap().push(contract.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

/// Mock transaction history source
#[derive(Debug, Default)]
pub struct MockTransactionSource {
    calls: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<TransactionData>>>,
}

impl MockTransactionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(self, data: TransactionData) -> Self {
        *self.response.lock().unwrap() = Some(data);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSource for MockTransactionSource {
    async fn transaction_data(&self, contract: &str) -> Result<TransactionData, SourceError> {
        self.calls.lock().unwrap().push(contract.to_string());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

/// Mock audit job service with a scripted status sequence
#[derive(Debug, Default)]
pub struct MockAuditJob {
    started: Arc<Mutex<Vec<String>>>,
    statuses: Arc<Mutex<VecDeque<AuditStatusResponse>>>,
    report: Arc<Mutex<Option<AuditReport>>>,
}

impl MockAuditJob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append one status poll response to the script
    pub fn with_status(self, response: AuditStatusResponse) -> Self {
        self.statuses.lock().unwrap().push_back(response);
        self
    }

    /// Builder method to set the finished report
    pub fn with_report(self, report: AuditReport) -> Self {
        *self.report.lock().unwrap() = Some(report);
        self
    }

    pub fn started_contracts(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditJobSource for MockAuditJob {
    async fn start_audit(&self, contract: &str) -> Result<(), SourceError> {
        self.started.lock().unwrap().push(contract.to_string());
        Ok(())
    }

    async fn poll_status(&self, _contract: &str) -> Result<AuditStatusResponse, SourceError> {
        // The last scripted status repeats once the queue drains
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap())
        } else {
            statuses.front().cloned().ok_or(SourceError::Missing)
        }
    }

    async fn fetch_result(&self, _contract: &str) -> Result<AuditReport, SourceError> {
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or(SourceError::Missing)
    }
}

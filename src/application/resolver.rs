//! Token Resolver
//!
//! Orchestrates the five provider fetches and builds one `TokenStatistics`
//! record per request. The primary security fetch gates everything; the four
//! supplemental fetches run concurrently and each degrades to an absent
//! payload on failure.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::liquidity::{partition_holders, LOCK_THRESHOLD};
use crate::domain::rules::{evaluate, CONTRACT_SECURITY_RULES, TRADING_SECURITY_RULES};
use crate::domain::statistics::{TokenStatistics, ValidationSummary};
use crate::domain::validation::{is_fully_validated, is_locked_or_burnt, ValidationPolicy};
use crate::domain::address::is_renounced;
use crate::ports::providers::{
    MarketDataSource, MarketingWalletSource, SecondaryAuditSource, SourceError,
    TokenSecuritySource, TransactionSource,
};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Primary security data missing or unusable; nothing can be built
    #[error("no usable security data for contract {0}")]
    InvalidContract(String),

    /// The market provider explicitly reported an error for this contract
    #[error("market data provider rejected contract {0}")]
    InvalidMarketData(String),
}

/// Builds token statistics from the five data sources.
pub struct TokenResolver {
    security: Arc<dyn TokenSecuritySource>,
    secondary_audit: Arc<dyn SecondaryAuditSource>,
    market: Arc<dyn MarketDataSource>,
    marketing_wallet: Arc<dyn MarketingWalletSource>,
    transactions: Arc<dyn TransactionSource>,
    policy: ValidationPolicy,
}

impl TokenResolver {
    pub fn new(
        security: Arc<dyn TokenSecuritySource>,
        secondary_audit: Arc<dyn SecondaryAuditSource>,
        market: Arc<dyn MarketDataSource>,
        marketing_wallet: Arc<dyn MarketingWalletSource>,
        transactions: Arc<dyn TransactionSource>,
    ) -> Self {
        Self {
            security,
            secondary_audit,
            market,
            marketing_wallet,
            transactions,
            policy: ValidationPolicy::default(),
        }
    }

    /// Select the partially-validated predicate
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve statistics for a contract.
    ///
    /// `forced_pair` is used when the caller already knows the pair address;
    /// transaction history, when it yields a trade, still wins over it.
    pub async fn resolve(
        &self,
        contract: &str,
        forced_pair: Option<&str>,
    ) -> Result<TokenStatistics, ResolveError> {
        let security = self
            .security
            .token_security(contract)
            .await
            .map_err(|e| {
                tracing::warn!(contract, error = %e, "primary security fetch failed");
                ResolveError::InvalidContract(contract.to_string())
            })?;

        if !security.has_token_name() {
            return Err(ResolveError::InvalidContract(contract.to_string()));
        }

        // The supplemental fetches are independent; overlap them and keep
        // failures local to their source.
        let (secondary_audit, market, marketing_wallet, transactions) = tokio::join!(
            self.secondary_audit.secondary_audit(contract),
            self.market.market_data(contract),
            self.marketing_wallet.marketing_wallet(contract),
            self.transactions.transaction_data(contract),
        );
        let secondary_audit = recover("secondary audit", contract, secondary_audit);
        let market = recover("market data", contract, market);
        let marketing_wallet = recover("marketing wallet", contract, marketing_wallet);
        let transactions = recover("transaction history", contract, transactions);

        if market.as_ref().is_some_and(|m| m.has_provider_error()) {
            return Err(ResolveError::InvalidMarketData(contract.to_string()));
        }

        let mut pair_address = forced_pair.map(str::to_owned);
        if let Some(trade) = transactions.as_ref().and_then(|t| t.latest_trade()) {
            pair_address = trade
                .counterparty()
                .map(|c| c.address.clone())
                .filter(|a| !a.is_empty());
        }

        let breakdown = partition_holders(&security.lp_holders);
        let is_locked = breakdown.locked_above_threshold()
            && secondary_audit
                .as_ref()
                .is_some_and(|s| s.lock_reference().is_some());
        let is_burnt = breakdown.burnt_above_threshold()
            && secondary_audit
                .as_ref()
                .is_some_and(|s| s.burn_reference().is_some());

        let contract_security = evaluate(CONTRACT_SECURITY_RULES, &security.fields);
        let trading_security = evaluate(TRADING_SECURITY_RULES, &security.fields);

        let is_partially_validated =
            self.policy
                .is_partially_validated(&contract_security, &trading_security);
        let locked_or_burnt = is_locked_or_burnt(&security.lp_holders, secondary_audit.as_ref());
        let is_validated =
            is_fully_validated(is_partially_validated, locked_or_burnt, market.as_ref());

        let stats = TokenStatistics {
            contract_address: contract.to_string(),
            is_renounced: is_renounced(security.owner_address.as_deref()),
            security,
            secondary_audit,
            market,
            marketing_wallet,
            transactions,
            pair_address,
            locked_percentage: breakdown.locked_percentage,
            burnt_percentage: breakdown.burnt_percentage,
            is_locked,
            is_burnt,
            contract_security,
            trading_security,
            is_partially_validated,
            is_validated,
        };

        tracing::debug!(
            contract,
            summary = ?ValidationSummary::from(&stats),
            threshold = %LOCK_THRESHOLD,
            "resolved token statistics"
        );

        Ok(stats)
    }
}

fn recover<T>(source: &str, contract: &str, result: Result<T, SourceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(contract, source, error = %e, "supplemental fetch failed, continuing without it");
            None
        }
    }
}

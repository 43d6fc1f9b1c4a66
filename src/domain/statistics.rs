//! Token Statistics Aggregate
//!
//! The immutable record a resolution call produces: raw provider payloads,
//! derived liquidity numbers and the evaluated security checklists. Built once
//! per request, then handed to the renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::rules::EvaluatedProperty;
use crate::ports::models::{
    MarketData, MarketingWalletData, SecondaryAuditData, TokenSecurityData, TransactionData,
};

/// Everything known about one token after a resolution pass.
#[derive(Debug, Clone)]
pub struct TokenStatistics {
    /// The audited contract address, as given by the caller
    pub contract_address: String,

    /// Primary security payload (always present; resolution fails without it)
    pub security: TokenSecurityData,
    pub secondary_audit: Option<SecondaryAuditData>,
    pub market: Option<MarketData>,
    pub marketing_wallet: Option<MarketingWalletData>,
    pub transactions: Option<TransactionData>,

    /// Trading pair contract, reconciled from transaction history or the caller
    pub pair_address: Option<String>,

    /// LP share held by lock contracts
    pub locked_percentage: Decimal,
    /// LP share held by dead addresses
    pub burnt_percentage: Decimal,
    /// Locked share clears the threshold and a lock reference link exists
    pub is_locked: bool,
    /// Burnt share clears the threshold and a burn reference link exists
    pub is_burnt: bool,
    /// Ownership renounced, derived from the owner address
    pub is_renounced: bool,

    pub contract_security: Vec<EvaluatedProperty>,
    pub trading_security: Vec<EvaluatedProperty>,

    pub is_partially_validated: bool,
    pub is_validated: bool,
}

impl TokenStatistics {
    /// Canonical token name. The resolver guarantees it is non-empty.
    pub fn token_name(&self) -> &str {
        self.security.token_name.as_deref().unwrap_or_default()
    }

    /// Circulating market cap in USD, when supply and price are both known.
    pub fn market_cap(&self) -> Option<f64> {
        self.market.as_ref().and_then(|m| m.market_cap())
    }
}

/// Derived flags in one place, mostly for logging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub is_locked: bool,
    pub is_burnt: bool,
    pub is_partially_validated: bool,
    pub is_validated: bool,
}

impl From<&TokenStatistics> for ValidationSummary {
    fn from(stats: &TokenStatistics) -> Self {
        Self {
            is_locked: stats.is_locked,
            is_burnt: stats.is_burnt,
            is_partially_validated: stats.is_partially_validated,
            is_validated: stats.is_validated,
        }
    }
}

//! Provider-shaped payloads shared by all data source ports
//!
//! Every struct here mirrors what a provider actually sends, not what we wish it
//! sent: fields are optional, numeric flags arrive as strings or numbers, and
//! unknown fields are preserved where rule evaluation needs to see them.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One liquidity-pool token holder as reported by the security provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiquidityHolder {
    /// Holder address (hex string, not validated locally)
    #[serde(default)]
    pub address: String,
    /// Share of the LP supply as a decimal string, e.g. "0.95"
    #[serde(default)]
    pub percent: String,
    /// Whether the provider flags this holder as a lock contract
    #[serde(default, deserialize_with = "flag_from_any")]
    pub is_locked: bool,
}

impl LiquidityHolder {
    /// Parsed share of the LP supply. Unparseable input counts as zero
    /// so a single bad row cannot poison a percentage sum.
    pub fn percent_value(&self) -> Decimal {
        Decimal::from_str(self.percent.trim()).unwrap_or_default()
    }
}

/// Primary token security payload.
///
/// The typed fields are the ones the resolver reads directly; everything else
/// stays in `fields` so the rule tables can look raw flags up by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSecurityData {
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default, alias = "holderScore")]
    pub holder_score: Option<Value>,
    #[serde(default)]
    pub lp_holders: Vec<LiquidityHolder>,
    /// Remaining raw provider fields, keyed by provider field name
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TokenSecurityData {
    /// A payload is usable only when it names the token.
    pub fn has_token_name(&self) -> bool {
        self.token_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Market data payload (price, supply, volume, liquidity, holders).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketData {
    /// Provider-reported failure marker; any truthy value means the
    /// provider could not serve this contract
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, alias = "circSupply")]
    pub circ_supply: Option<f64>,
    #[serde(default, alias = "totalSupply")]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub volume_24h_usd: Option<f64>,
    #[serde(default)]
    pub liquidity_usd: Option<f64>,
    #[serde(default)]
    pub holder_count: Option<f64>,
}

impl MarketData {
    /// True when the provider explicitly reported an error for this contract.
    pub fn has_provider_error(&self) -> bool {
        self.error.as_ref().is_some_and(json_truthy)
    }

    /// Circulating market cap, when both inputs are known.
    pub fn market_cap(&self) -> Option<f64> {
        Some(self.circ_supply? * self.price_usd?)
    }
}

/// Marketing wallet lookup payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketingWalletData {
    #[serde(default, alias = "marketingAddress")]
    pub marketing_address: Option<String>,
}

/// Recent transaction history payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionData {
    #[serde(default)]
    pub data: Option<TransactionWindow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionWindow {
    #[serde(default, alias = "txHistory")]
    pub tx_history: Option<TransactionHistory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionHistory {
    #[serde(default, alias = "dexTrades")]
    pub dex_trades: Vec<DexTrade>,
}

impl TransactionData {
    /// Most recent dex trade, if the provider returned any.
    pub fn latest_trade(&self) -> Option<&DexTrade> {
        self.data
            .as_ref()?
            .tx_history
            .as_ref()?
            .dex_trades
            .first()
    }
}

/// One dex trade with both legs of the pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexTrade {
    /// Primary side of the trade, "buy" or "sell" (any casing)
    #[serde(default)]
    pub side: String,
    #[serde(default, alias = "buyCurrency")]
    pub buy_currency: Option<TradeCurrency>,
    #[serde(default, alias = "sellCurrency")]
    pub sell_currency: Option<TradeCurrency>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeCurrency {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub address: String,
}

impl DexTrade {
    /// The currency on the side opposite the trade's primary side.
    ///
    /// For the audited token's latest trade this is the paired currency,
    /// which is how the pair address gets resolved.
    pub fn counterparty(&self) -> Option<&TradeCurrency> {
        if self.side.eq_ignore_ascii_case("buy") {
            self.sell_currency.as_ref()
        } else {
            self.buy_currency.as_ref()
        }
    }
}

/// Secondary audit payload carrying external lock/burn reference links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecondaryAuditData {
    #[serde(default, alias = "lpLockLink")]
    pub lp_lock_link: Option<String>,
    #[serde(default, alias = "burnLink")]
    pub burn_link: Option<String>,
}

impl SecondaryAuditData {
    /// Non-empty liquidity lock reference, if any.
    pub fn lock_reference(&self) -> Option<&str> {
        self.lp_lock_link.as_deref().filter(|l| !l.is_empty())
    }

    /// Non-empty burn reference, if any.
    pub fn burn_reference(&self) -> Option<&str> {
        self.burn_link.as_deref().filter(|l| !l.is_empty())
    }

    /// True when either reference link is present.
    pub fn has_any_reference(&self) -> bool {
        self.lock_reference().is_some() || self.burn_reference().is_some()
    }
}

/// Status of a long-running audit job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pending,
    Ended,
    Errored,
    #[serde(other)]
    Unknown,
}

impl Default for AuditStatus {
    fn default() -> Self {
        AuditStatus::Unknown
    }
}

/// Audit job status poll response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStatusResponse {
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// Finished audit report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub issues: Vec<AuditIssue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditIssue {
    #[serde(default, alias = "issueExplanation")]
    pub issue_explanation: String,
    #[serde(default, alias = "issueCodeDiffUrl")]
    pub issue_code_diff_url: Option<String>,
}

/// Integer truthiness for provider flags that arrive as `1`, `"1"`, `0` or `"0"`.
///
/// Strings are parsed as numbers (leading integer part wins); anything that
/// does not parse counts as cleared.
pub fn int_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .map(|i| i != 0)
                .or_else(|_| t.parse::<f64>().map(|f| f.trunc() != 0.0))
                .unwrap_or(false)
        }
        _ => false,
    }
}

/// General JSON truthiness: null, false, zero and "" are false, everything
/// else (including objects and arrays) is true.
pub fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn flag_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_truthy(&value))
}

//! Validation Policies
//!
//! Aggregate verdicts over the evaluated checklists. The partially-validated
//! predicate has shipped in two shapes across integrations, so it is a named,
//! selectable policy rather than a hardcoded expression.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{find_property, EvaluatedProperty};
use crate::ports::models::{LiquidityHolder, MarketData, SecondaryAuditData};

/// Which partially-validated predicate to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Non-mintable and non-honeypot
    #[default]
    Lenient,
    /// Lenient plus non-proxy, non-blacklisted and non-modifiable tax
    Strict,
}

impl ValidationPolicy {
    /// Partially-validated verdict over both checklists.
    ///
    /// A property missing from its table counts against the token.
    pub fn is_partially_validated(
        &self,
        contract_security: &[EvaluatedProperty],
        trading_security: &[EvaluatedProperty],
    ) -> bool {
        let positive = |props: &[EvaluatedProperty], label: &str| {
            find_property(props, label).map(|p| p.positive).unwrap_or(false)
        };

        let lenient = positive(contract_security, "Mintable")
            && positive(trading_security, "Honeypot");

        match self {
            ValidationPolicy::Lenient => lenient,
            ValidationPolicy::Strict => {
                lenient
                    && positive(contract_security, "Proxy")
                    && positive(trading_security, "Blacklist")
                    && positive(trading_security, "Modifiable Tax")
            }
        }
    }
}

/// Liquidity counts as locked-or-burnt when the holder list is non-empty and
/// the secondary audit carries at least one lock/burn reference link.
pub fn is_locked_or_burnt(
    holders: &[LiquidityHolder],
    secondary: Option<&SecondaryAuditData>,
) -> bool {
    !holders.is_empty() && secondary.is_some_and(|s| s.has_any_reference())
}

/// Fully validated: partially validated, liquidity locked-or-burnt, and both
/// circulating supply and price known and non-zero.
pub fn is_fully_validated(
    partially_validated: bool,
    locked_or_burnt: bool,
    market: Option<&MarketData>,
) -> bool {
    let known_nonzero = |v: Option<f64>| v.is_some_and(|x| x != 0.0);
    partially_validated
        && locked_or_burnt
        && market.is_some_and(|m| {
            known_nonzero(m.circ_supply) && known_nonzero(m.price_usd)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::{evaluate, CONTRACT_SECURITY_RULES, TRADING_SECURITY_RULES};
    use serde_json::{json, Map, Value};

    fn checklists(raw: Value) -> (Vec<EvaluatedProperty>, Vec<EvaluatedProperty>) {
        let map: Map<String, Value> = match raw {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        };
        (
            evaluate(CONTRACT_SECURITY_RULES, &map),
            evaluate(TRADING_SECURITY_RULES, &map),
        )
    }

    #[test]
    fn test_lenient_requires_non_mintable_and_non_honeypot() {
        let (contract, trading) = checklists(json!({"is_mintable": "0", "is_honeypot": "0"}));
        assert!(ValidationPolicy::Lenient.is_partially_validated(&contract, &trading));

        let (contract, trading) = checklists(json!({"is_mintable": "1", "is_honeypot": "0"}));
        assert!(!ValidationPolicy::Lenient.is_partially_validated(&contract, &trading));

        let (contract, trading) = checklists(json!({"is_mintable": "0", "is_honeypot": "1"}));
        assert!(!ValidationPolicy::Lenient.is_partially_validated(&contract, &trading));
    }

    #[test]
    fn test_mintable_sinks_both_policies_regardless_of_other_flags() {
        let (contract, trading) = checklists(json!({
            "is_mintable": "1",
            "is_honeypot": "0",
            "is_proxy": "0",
            "is_blacklisted": "0",
            "slippage_modifiable": "0",
            "is_open_source": "1"
        }));
        assert!(!ValidationPolicy::Lenient.is_partially_validated(&contract, &trading));
        assert!(!ValidationPolicy::Strict.is_partially_validated(&contract, &trading));
    }

    #[test]
    fn test_strict_adds_proxy_blacklist_and_tax_modifiability() {
        let clean = json!({
            "is_mintable": "0",
            "is_honeypot": "0",
            "is_proxy": "0",
            "is_blacklisted": "0",
            "slippage_modifiable": "0"
        });
        let (contract, trading) = checklists(clean);
        assert!(ValidationPolicy::Strict.is_partially_validated(&contract, &trading));

        let proxied = json!({
            "is_mintable": "0",
            "is_honeypot": "0",
            "is_proxy": "1",
            "is_blacklisted": "0",
            "slippage_modifiable": "0"
        });
        let (contract, trading) = checklists(proxied);
        // Lenient does not care about the proxy flag, strict does
        assert!(ValidationPolicy::Lenient.is_partially_validated(&contract, &trading));
        assert!(!ValidationPolicy::Strict.is_partially_validated(&contract, &trading));
    }

    #[test]
    fn test_locked_or_burnt_needs_holders_and_a_link() {
        let holders = vec![LiquidityHolder {
            address: "0xlock".into(),
            percent: "0.95".into(),
            is_locked: true,
        }];
        let linked = SecondaryAuditData {
            lp_lock_link: Some("https://locker/123".into()),
            burn_link: None,
        };

        assert!(is_locked_or_burnt(&holders, Some(&linked)));
        assert!(!is_locked_or_burnt(&[], Some(&linked)));
        assert!(!is_locked_or_burnt(&holders, None));
        assert!(!is_locked_or_burnt(
            &holders,
            Some(&SecondaryAuditData::default())
        ));
    }

    #[test]
    fn test_fully_validated_needs_market_fundamentals() {
        let market = MarketData {
            circ_supply: Some(1_000_000.0),
            price_usd: Some(0.01),
            ..Default::default()
        };
        assert!(is_fully_validated(true, true, Some(&market)));
        assert!(!is_fully_validated(false, true, Some(&market)));
        assert!(!is_fully_validated(true, false, Some(&market)));
        assert!(!is_fully_validated(true, true, None));

        let zero_price = MarketData {
            circ_supply: Some(1_000_000.0),
            price_usd: Some(0.0),
            ..Default::default()
        };
        assert!(!is_fully_validated(true, true, Some(&zero_price)));
    }
}

//! Security Rule Tables
//!
//! The provider exposes a few dozen raw flags per token. Each rule below names
//! one raw field, how to read it, and when its value counts in the token's
//! favor. The tables are fixed data: display order matters downstream, both
//! for rendering and for lookup by label.
//!
//! Parsing never fails. A missing or garbled field degrades to a defined
//! default and renders as "No"/"Unknown" with a negative mark.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::ports::models::int_truthy;

/// How a raw provider field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer-truthiness flag ("1"/"0", 1/0)
    Flag,
    /// Decimal ratio, e.g. a tax rate of "0.05"
    Percent,
    /// Raw string passthrough
    Text,
    /// Placeholder evaluated elsewhere and spliced in at render time
    Marker,
}

/// When an evaluated value counts in the token's favor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Favorable {
    /// Flag set is good (e.g. open source)
    WhenSet,
    /// Flag cleared is good (e.g. honeypot)
    WhenClear,
    /// Only an exactly-zero rate is good (taxes)
    WhenZero,
    /// A non-empty value is good (owner address known)
    WhenPresent,
    /// Always positive (markers)
    Always,
}

/// One security property rule: a fixed, declarative record.
#[derive(Debug, Clone, Copy)]
pub struct SecurityRule {
    /// Raw provider field name
    pub field: &'static str,
    /// User-facing label, also the lookup key
    pub label: &'static str,
    pub kind: ValueKind,
    pub favorable: Favorable,
}

/// Typed value produced by applying a rule to a raw field.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Flag(bool),
    Percent(Option<Decimal>),
    Text(Option<String>),
    Marker,
}

/// One evaluated rule instance, ready for rendering.
#[derive(Debug, Clone)]
pub struct EvaluatedProperty {
    pub label: &'static str,
    pub value: PropertyValue,
    pub positive: bool,
    /// Pre-formatted display line: `*<label>:* <value> ✅|❌`
    pub line: String,
}

/// Label of the ownership-renounced placeholder rule
pub const RENOUNCED_MARKER: &str = "{{renounced}}";

/// Exact line the placeholder rule renders to; the report renderer replaces
/// this line verbatim with the resolver-computed verdict
pub const RENOUNCED_PLACEHOLDER_LINE: &str = "*{{renounced}}:*  ✅";

/// Contract security checklist, in display order.
pub static CONTRACT_SECURITY_RULES: &[SecurityRule] = &[
    SecurityRule { field: "is_open_source", label: "Open Source", kind: ValueKind::Flag, favorable: Favorable::WhenSet },
    SecurityRule { field: "", label: RENOUNCED_MARKER, kind: ValueKind::Marker, favorable: Favorable::Always },
    SecurityRule { field: "is_proxy", label: "Proxy", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "is_mintable", label: "Mintable", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "can_take_back_ownership", label: "Take Back Ownership", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "owner_address", label: "Owner Address", kind: ValueKind::Text, favorable: Favorable::WhenPresent },
    SecurityRule { field: "owner_change_balance", label: "Owner Change Balance", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "hidden_owner", label: "Hidden Owner", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "selfdestruct", label: "Self-destruct", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "external_call", label: "External Call", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
];

/// Trading security checklist, in display order.
pub static TRADING_SECURITY_RULES: &[SecurityRule] = &[
    SecurityRule { field: "buy_tax", label: "Buy Tax", kind: ValueKind::Percent, favorable: Favorable::WhenZero },
    SecurityRule { field: "sell_tax", label: "Sell Tax", kind: ValueKind::Percent, favorable: Favorable::WhenZero },
    SecurityRule { field: "cannot_buy", label: "Cannot be Bought", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "cannot_sell_all", label: "Cannot Sell All", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "slippage_modifiable", label: "Modifiable Tax", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "is_honeypot", label: "Honeypot", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "transfer_pausable", label: "Pausable Transfer", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "is_blacklisted", label: "Blacklist", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "is_whitelisted", label: "Whitelist", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "is_in_dex", label: "In main Dex", kind: ValueKind::Flag, favorable: Favorable::WhenSet },
    SecurityRule { field: "is_anti_whale", label: "Anti Whale", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "anti_whale_modifiable", label: "Modifiable anti whale", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "trading_cooldown", label: "Trading Cooldown", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
    SecurityRule { field: "personal_slippage_modifiable", label: "Personal Slippage Modifiable", kind: ValueKind::Flag, favorable: Favorable::WhenClear },
];

/// Evaluate a rule table against raw provider fields, preserving table order.
pub fn evaluate(rules: &[SecurityRule], raw: &Map<String, Value>) -> Vec<EvaluatedProperty> {
    rules
        .iter()
        .map(|rule| evaluate_rule(rule, raw.get(rule.field)))
        .collect()
}

/// Find an evaluated property by its display label.
pub fn find_property<'a>(
    properties: &'a [EvaluatedProperty],
    label: &str,
) -> Option<&'a EvaluatedProperty> {
    properties.iter().find(|p| p.label == label)
}

fn evaluate_rule(rule: &SecurityRule, raw: Option<&Value>) -> EvaluatedProperty {
    let value = match rule.kind {
        ValueKind::Flag => PropertyValue::Flag(raw.map(int_truthy).unwrap_or(false)),
        ValueKind::Percent => PropertyValue::Percent(raw.and_then(decimal_value)),
        ValueKind::Text => PropertyValue::Text(raw.and_then(text_value)),
        ValueKind::Marker => PropertyValue::Marker,
    };
    let positive = is_favorable(rule.favorable, &value);
    let line = format_line(rule.label, &format_value(&value), positive);
    EvaluatedProperty {
        label: rule.label,
        value,
        positive,
        line,
    }
}

fn decimal_value(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => n.as_f64().and_then(Decimal::from_f64),
        _ => None,
    }
}

fn text_value(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn is_favorable(favorable: Favorable, value: &PropertyValue) -> bool {
    match favorable {
        Favorable::WhenSet => matches!(value, PropertyValue::Flag(true)),
        Favorable::WhenClear => matches!(value, PropertyValue::Flag(false)),
        Favorable::WhenZero => {
            matches!(value, PropertyValue::Percent(Some(d)) if d.is_zero())
        }
        Favorable::WhenPresent => {
            matches!(value, PropertyValue::Text(Some(s)) if !s.is_empty())
        }
        Favorable::Always => true,
    }
}

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Flag(true) => "Yes".to_string(),
        PropertyValue::Flag(false) => "No".to_string(),
        PropertyValue::Percent(Some(rate)) => {
            format!("{}%", (rate * dec!(100)).normalize())
        }
        PropertyValue::Percent(None) => "Unknown".to_string(),
        PropertyValue::Text(Some(s)) if !s.is_empty() => s.clone(),
        PropertyValue::Text(_) => "Unknown".to_string(),
        PropertyValue::Marker => String::new(),
    }
}

fn format_line(label: &str, value: &str, positive: bool) -> String {
    let mark = if positive { "✅" } else { "❌" };
    format!("*{label}:* {value} {mark}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_tables_keep_display_order() {
        assert_eq!(CONTRACT_SECURITY_RULES.len(), 10);
        assert_eq!(TRADING_SECURITY_RULES.len(), 14);
        assert_eq!(CONTRACT_SECURITY_RULES[0].label, "Open Source");
        assert_eq!(CONTRACT_SECURITY_RULES[1].label, RENOUNCED_MARKER);
        assert_eq!(TRADING_SECURITY_RULES[5].label, "Honeypot");

        let raw = fields(json!({}));
        let evaluated = evaluate(CONTRACT_SECURITY_RULES, &raw);
        let labels: Vec<&str> = evaluated.iter().map(|p| p.label).collect();
        let expected: Vec<&str> = CONTRACT_SECURITY_RULES.iter().map(|r| r.label).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_flag_rule_positive_and_negative() {
        let raw = fields(json!({"is_mintable": "1", "is_honeypot": "0"}));
        let trading = evaluate(TRADING_SECURITY_RULES, &raw);

        let honeypot = find_property(&trading, "Honeypot").unwrap();
        assert!(honeypot.positive);
        assert_eq!(honeypot.line, "*Honeypot:* No ✅");

        let contract = evaluate(CONTRACT_SECURITY_RULES, &raw);
        let mintable = find_property(&contract, "Mintable").unwrap();
        assert!(!mintable.positive);
        assert_eq!(mintable.line, "*Mintable:* Yes ❌");
    }

    #[test]
    fn test_open_source_positive_when_set() {
        let raw = fields(json!({"is_open_source": "1"}));
        let contract = evaluate(CONTRACT_SECURITY_RULES, &raw);
        let open_source = find_property(&contract, "Open Source").unwrap();
        assert!(open_source.positive);
        assert_eq!(open_source.line, "*Open Source:* Yes ✅");
    }

    #[test]
    fn test_tax_positive_only_at_exactly_zero() {
        let raw = fields(json!({"buy_tax": "0", "sell_tax": "0.05"}));
        let trading = evaluate(TRADING_SECURITY_RULES, &raw);

        let buy = find_property(&trading, "Buy Tax").unwrap();
        assert!(buy.positive);
        assert_eq!(buy.line, "*Buy Tax:* 0% ✅");

        let sell = find_property(&trading, "Sell Tax").unwrap();
        assert!(!sell.positive);
        assert_eq!(sell.line, "*Sell Tax:* 5% ❌");
    }

    #[test]
    fn test_fractional_tax_display_trims_zeros() {
        let raw = fields(json!({"sell_tax": "0.055"}));
        let trading = evaluate(TRADING_SECURITY_RULES, &raw);
        let sell = find_property(&trading, "Sell Tax").unwrap();
        assert_eq!(sell.line, "*Sell Tax:* 5.5% ❌");
    }

    #[test]
    fn test_missing_fields_do_not_panic_and_render_unknown() {
        let raw = fields(json!({}));
        let trading = evaluate(TRADING_SECURITY_RULES, &raw);

        let buy = find_property(&trading, "Buy Tax").unwrap();
        assert_eq!(buy.value, PropertyValue::Percent(None));
        assert!(!buy.positive);
        assert_eq!(buy.line, "*Buy Tax:* Unknown ❌");

        // Missing flags read as cleared; favorability still applies per rule
        let honeypot = find_property(&trading, "Honeypot").unwrap();
        assert!(honeypot.positive);
        let in_dex = find_property(&trading, "In main Dex").unwrap();
        assert!(!in_dex.positive);
    }

    #[test]
    fn test_garbled_percent_renders_unknown_not_nan() {
        let raw = fields(json!({"buy_tax": "banana"}));
        let trading = evaluate(TRADING_SECURITY_RULES, &raw);
        let buy = find_property(&trading, "Buy Tax").unwrap();
        assert_eq!(buy.line, "*Buy Tax:* Unknown ❌");
        assert!(!buy.line.contains("NaN"));
    }

    #[test]
    fn test_owner_address_text_rule() {
        let raw = fields(json!({"owner_address": "0xAb5801a7"}));
        let contract = evaluate(CONTRACT_SECURITY_RULES, &raw);
        let owner = find_property(&contract, "Owner Address").unwrap();
        assert!(owner.positive);
        assert_eq!(owner.line, "*Owner Address:* 0xAb5801a7 ✅");

        let empty = fields(json!({"owner_address": ""}));
        let contract = evaluate(CONTRACT_SECURITY_RULES, &empty);
        let owner = find_property(&contract, "Owner Address").unwrap();
        assert!(!owner.positive);
        assert_eq!(owner.line, "*Owner Address:* Unknown ❌");
    }

    #[test]
    fn test_marker_rule_renders_placeholder_line() {
        let raw = fields(json!({}));
        let contract = evaluate(CONTRACT_SECURITY_RULES, &raw);
        let marker = find_property(&contract, RENOUNCED_MARKER).unwrap();
        assert!(marker.positive);
        assert_eq!(marker.line, RENOUNCED_PLACEHOLDER_LINE);
    }
}

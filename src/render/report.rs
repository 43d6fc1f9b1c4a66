//! Report Renderer
//!
//! Turns a `TokenStatistics` record into the final chat message. Pure
//! function: all I/O happened in the resolver, all policy lives in the
//! options. The message is assembled raw and escaped exactly once at the end.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use super::abbrev::abbreviate;
use super::escape::{defang, escape, escape_strict_extra, EscapeDialect};
use crate::domain::rules::RENOUNCED_PLACEHOLDER_LINE;
use crate::domain::statistics::TokenStatistics;

/// Rendering options.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Append the liquidity lock/burn status banner
    pub show_lock_status: bool,
    pub dialect: EscapeDialect,
    /// Explorer base URL, e.g. `https://etherscan.io`
    pub explorer_base: String,
    /// Swap UI base URL
    pub swap_base: String,
    /// Pair chart base URL
    pub chart_base: String,
    /// Attribution line appended to every report
    pub attribution: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_lock_status: false,
            dialect: EscapeDialect::Standard,
            explorer_base: "https://etherscan.io".to_string(),
            swap_base: "https://app.uniswap.org/#/swap".to_string(),
            chart_base: "https://www.dextools.io/app/en/ether/pair-explorer".to_string(),
            attribution: "Powered by TokenScout".to_string(),
        }
    }
}

const DISCLAIMER: &str = "Disclaimer: Nothing in this report is financial advice but rather a \
technical review of an ERC-20 token smart contract. Automated checks may require an additional \
manual review.";

/// Render the full report for one token.
pub fn render(stats: &TokenStatistics, options: &ReportOptions) -> String {
    let name = display_name(stats.token_name(), options.dialect);
    let market = stats.market.as_ref();

    let total_supply = money(market.and_then(|m| m.total_supply), 5);
    let circ_supply = money(market.and_then(|m| m.circ_supply), 5);
    let market_cap = money(stats.market_cap(), 5);
    let price = money(market.and_then(|m| m.price_usd), 5);
    let volume = money(market.and_then(|m| m.volume_24h_usd), 5);
    let liquidity = plain(market.and_then(|m| m.liquidity_usd), 4);
    let holders = plain(market.and_then(|m| m.holder_count), 2);
    let holder_score = free_form(
        score_display(stats.security.holder_score.as_ref()),
        options.dialect,
    );

    let marketing_wallet = stats
        .marketing_wallet
        .as_ref()
        .and_then(|w| w.marketing_address.as_deref())
        .filter(|a| !a.is_empty())
        .map(|a| format!("{}/address/{}", options.explorer_base, a))
        .unwrap_or_else(|| "Unknown".to_string());

    let pair_address = stats
        .pair_address
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|a| format!("[{a}]({}/address/{a})", options.explorer_base))
        .unwrap_or_else(|| "Unknown".to_string());

    let mut message = format!(
        "__*${name} Token Stats*__\n\n\
         🛒 *Total Supply:* {total_supply}\n\
         🏦 *Circ. Supply:* {circ_supply}\n\
         💰 *Marketcap:* {market_cap}\n\
         💸 *Price:* {price}\n\
         📊 *Volume:* {volume}\n\
         🔐 *Liquidity:* {}\n\
         👥 *Holders:* {holders}\n\
         #️⃣ *Holder score:* {holder_score}\n\
         📢 *Marketing Wallet:* {marketing_wallet}\n\
         💵 *Liquidity*: {liquidity} \\({}, {}\\)\n\
         🔗 *Pair address*: {pair_address}",
        money(market.and_then(|m| m.liquidity_usd), 4),
        lock_fragment(stats),
        burn_fragment(stats),
    );

    if options.show_lock_status {
        if !stats.is_locked && !stats.is_burnt {
            message.push_str("\n\n\n🟥 Waiting for liquidity lock/burn.\n");
        } else {
            message.push_str("\n\n\n🟩 Liquidity is locked/burnt.\n");
        }
    }

    let renounced_line = format!(
        "*Renounced:* {}",
        if stats.is_renounced { "Yes ✅" } else { "No ❌" }
    );
    let contract_block = stats
        .contract_security
        .iter()
        .map(|p| p.line.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .replace(RENOUNCED_PLACEHOLDER_LINE, &renounced_line);

    let trading_block = stats
        .trading_security
        .iter()
        .map(|p| p.line.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    message.push_str(&format!(
        "\n\n__*${name} Token Contract Security*__\n\n{contract_block}"
    ));
    message.push_str(&format!(
        "\n\n__*${name} Token Trading Security*__\n\n{trading_block}"
    ));

    let contract = &stats.contract_address;
    let swap_link = format!(
        "{}?inputCurrency={contract}&outputCurrency=ETH",
        options.swap_base
    );
    let explorer_link = format!("{}/token/{contract}", options.explorer_base);
    let chart_link = format!("{}/{contract}", options.chart_base);
    message.push_str(&format!(
        "\n\n[Swap]({swap_link}) \\| [Explorer]({explorer_link}) \\| [Chart]({chart_link})"
    ));

    message.push_str(&format!("\n\n_{DISCLAIMER}_"));
    message.push_str(&format!("\n\n_{}_", options.attribution));

    escape(&message)
}

fn display_name(name: &str, dialect: EscapeDialect) -> String {
    free_form(defang(name), dialect)
}

fn free_form(text: String, dialect: EscapeDialect) -> String {
    match dialect {
        EscapeDialect::Standard => text,
        EscapeDialect::Strict => escape_strict_extra(&text),
    }
}

fn money(value: Option<f64>, digits: u32) -> String {
    value
        .map(|v| format!("${}", abbreviate(v, digits)))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn plain(value: Option<f64>, digits: u32) -> String {
    value
        .map(|v| abbreviate(v, digits))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn score_display(score: Option<&Value>) -> String {
    match score {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "Unknown".to_string(),
    }
}

fn percent_display(value: Decimal) -> String {
    format!("{}", (value * dec!(100)).round().normalize())
}

fn lock_fragment(stats: &TokenStatistics) -> String {
    let pct = percent_display(stats.locked_percentage);
    let link = stats
        .secondary_audit
        .as_ref()
        .and_then(|s| s.lock_reference());
    match (stats.is_locked, link) {
        (true, Some(link)) => format!("[{pct}% locked]({link})"),
        _ => format!("{pct}% locked"),
    }
}

fn burn_fragment(stats: &TokenStatistics) -> String {
    let pct = percent_display(stats.burnt_percentage);
    let link = stats
        .secondary_audit
        .as_ref()
        .and_then(|s| s.burn_reference());
    match (stats.is_burnt, link) {
        (true, Some(link)) => format!("[{pct}% burnt]({link})"),
        _ => format!("{pct}% burnt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::is_renounced;
    use crate::domain::rules::{evaluate, CONTRACT_SECURITY_RULES, TRADING_SECURITY_RULES};
    use crate::domain::statistics::TokenStatistics;
    use crate::ports::models::{MarketData, SecondaryAuditData, TokenSecurityData};
    use crate::render::escape::ZERO_WIDTH_NON_JOINER;
    use serde_json::json;

    fn stats_from(security_json: serde_json::Value) -> TokenStatistics {
        let security: TokenSecurityData = serde_json::from_value(security_json).unwrap();
        let contract_security = evaluate(CONTRACT_SECURITY_RULES, &security.fields);
        let trading_security = evaluate(TRADING_SECURITY_RULES, &security.fields);
        TokenStatistics {
            contract_address: "0xc0ffee".to_string(),
            is_renounced: is_renounced(security.owner_address.as_deref()),
            security,
            secondary_audit: None,
            market: None,
            marketing_wallet: None,
            transactions: None,
            pair_address: None,
            locked_percentage: Decimal::ZERO,
            burnt_percentage: Decimal::ZERO,
            is_locked: false,
            is_burnt: false,
            contract_security,
            trading_security,
            is_partially_validated: false,
            is_validated: false,
        }
    }

    #[test]
    fn test_title_defangs_and_escapes_periods_once() {
        let stats = stats_from(json!({"token_name": "A.B"}));
        let report = render(&stats, &ReportOptions::default());
        let expected = format!("__*$A\\.{ZERO_WIDTH_NON_JOINER}B Token Stats*__");
        assert!(report.starts_with(&expected), "got: {report}");
        assert!(!report.contains("\\\\."));
    }

    #[test]
    fn test_missing_market_data_renders_unknown_not_nan() {
        let stats = stats_from(json!({"token_name": "FOO"}));
        let report = render(&stats, &ReportOptions::default());
        assert!(report.contains("*Marketcap:* Unknown"));
        assert!(report.contains("*Holder score:* Unknown"));
        assert!(!report.contains("NaN"));
    }

    #[test]
    fn test_market_numbers_are_abbreviated() {
        let mut stats = stats_from(json!({"token_name": "FOO"}));
        stats.market = Some(MarketData {
            circ_supply: Some(10_000_000_000.0),
            total_supply: Some(10_000_000_000.0),
            price_usd: Some(0.0005),
            volume_24h_usd: Some(1_234_000.0),
            liquidity_usd: Some(250_000.0),
            holder_count: Some(1_523.0),
            ..Default::default()
        });
        let report = render(&stats, &ReportOptions::default());
        assert!(report.contains("*Total Supply:* $10B"));
        assert!(report.contains("*Marketcap:* $5M"));
        assert!(report.contains("*Holders:* 1\\.5K"));
    }

    #[test]
    fn test_renounced_placeholder_is_spliced() {
        let renounced = stats_from(json!({
            "token_name": "FOO",
            "owner_address": "0x000000000000000000000000000000000000dead"
        }));
        let report = render(&renounced, &ReportOptions::default());
        assert!(report.contains("*Renounced:* Yes ✅"));
        assert!(!report.contains("renounced}}"));

        let owned = stats_from(json!({
            "token_name": "FOO",
            "owner_address": "0xAb5801a7"
        }));
        let report = render(&owned, &ReportOptions::default());
        assert!(report.contains("*Renounced:* No ❌"));
    }

    #[test]
    fn test_lock_banner_variants() {
        let stats = stats_from(json!({"token_name": "FOO"}));
        let options = ReportOptions {
            show_lock_status: true,
            ..Default::default()
        };
        let report = render(&stats, &options);
        assert!(report.contains("🟥 Waiting for liquidity lock/burn"));

        let mut locked = stats_from(json!({"token_name": "FOO"}));
        locked.is_locked = true;
        let report = render(&locked, &options);
        assert!(report.contains("🟩 Liquidity is locked/burnt"));

        let silent = render(&stats, &ReportOptions::default());
        assert!(!silent.contains("🟥"));
        assert!(!silent.contains("🟩"));
    }

    #[test]
    fn test_locked_percentage_links_to_reference() {
        let mut stats = stats_from(json!({"token_name": "FOO"}));
        stats.locked_percentage = rust_decimal_macros::dec!(0.95);
        stats.is_locked = true;
        stats.secondary_audit = Some(SecondaryAuditData {
            lp_lock_link: Some("https://locker/42".to_string()),
            burn_link: None,
        });
        let report = render(&stats, &ReportOptions::default());
        assert!(report.contains("[95% locked](https://locker/42)"));
        assert!(report.contains("0% burnt"));
    }

    #[test]
    fn test_footer_links_and_attribution() {
        let stats = stats_from(json!({"token_name": "FOO"}));
        let report = render(&stats, &ReportOptions::default());
        assert!(report
            .contains("(https://app\\.uniswap\\.org/\\#/swap?inputCurrency\\=0xc0ffee&outputCurrency\\=ETH)"));
        assert!(report.contains("[Swap]"));
        assert!(report.contains("[Explorer]"));
        assert!(report.contains("[Chart]"));
        assert!(report.contains("_Powered by TokenScout_"));
    }

    #[test]
    fn test_strict_dialect_escapes_free_form_values() {
        let stats = stats_from(json!({"token_name": "FOO (v2)"}));
        let options = ReportOptions {
            dialect: EscapeDialect::Strict,
            ..Default::default()
        };
        let report = render(&stats, &options);
        assert!(report.contains("$FOO \\(v2\\) Token Stats"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let stats = stats_from(json!({
            "token_name": "A.B",
            "is_mintable": "0",
            "buy_tax": "0.05"
        }));
        let options = ReportOptions::default();
        assert_eq!(render(&stats, &options), render(&stats, &options));
    }
}

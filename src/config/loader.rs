//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::validation::ValidationPolicy;
use crate::render::{EscapeDialect, ReportOptions};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersSection,
    #[serde(default)]
    pub resolver: ResolverSection,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub audit: AuditSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Provider endpoints section
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersSection {
    /// Token security endpoint (chain-qualified base URL)
    #[serde(default = "default_token_security_url")]
    pub token_security_url: String,
    /// Market data endpoint
    #[serde(default = "default_market_url")]
    pub market_url: String,
    /// Marketing wallet endpoint
    #[serde(default = "default_marketing_wallet_url")]
    pub marketing_wallet_url: String,
    /// Transaction history endpoint
    #[serde(default = "default_transaction_url")]
    pub transaction_url: String,
    /// Secondary audit data endpoint
    #[serde(default = "default_secondary_audit_url")]
    pub secondary_audit_url: String,
    /// Audit job API base URL
    #[serde(default = "default_audit_job_url")]
    pub audit_job_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            token_security_url: default_token_security_url(),
            market_url: default_market_url(),
            marketing_wallet_url: default_marketing_wallet_url(),
            transaction_url: default_transaction_url(),
            secondary_audit_url: default_secondary_audit_url(),
            audit_job_url: default_audit_job_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ProvidersSection {
    /// Token security URL with environment variable override
    /// Checks TOKENSCOUT_TOKEN_SECURITY_URL first, falls back to config value
    pub fn get_token_security_url(&self) -> String {
        env_or("TOKENSCOUT_TOKEN_SECURITY_URL", &self.token_security_url)
    }

    /// Audit job URL with environment variable override
    /// Checks TOKENSCOUT_AUDIT_JOB_URL first, falls back to config value
    pub fn get_audit_job_url(&self) -> String {
        env_or("TOKENSCOUT_AUDIT_JOB_URL", &self.audit_job_url)
    }
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| fallback.to_string())
}

/// Resolver section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResolverSection {
    /// Which partially-validated predicate to apply: "lenient" or "strict"
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

/// Report rendering section
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Append the liquidity lock/burn banner line
    #[serde(default = "default_true")]
    pub show_lock_status: bool,
    /// Escape free-form values with the strict character set
    #[serde(default)]
    pub strict_escaping: bool,
    #[serde(default = "default_explorer_base")]
    pub explorer_base: String,
    #[serde(default = "default_swap_base")]
    pub swap_base: String,
    #[serde(default = "default_chart_base")]
    pub chart_base: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            show_lock_status: true,
            strict_escaping: false,
            explorer_base: default_explorer_base(),
            swap_base: default_swap_base(),
            chart_base: default_chart_base(),
            attribution: default_attribution(),
        }
    }
}

impl ReportSection {
    /// Bridge to renderer options
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            show_lock_status: self.show_lock_status,
            dialect: if self.strict_escaping {
                EscapeDialect::Strict
            } else {
                EscapeDialect::Standard
            },
            explorer_base: self.explorer_base.clone(),
            swap_base: self.swap_base.clone(),
            chart_base: self.chart_base.clone(),
            attribution: self.attribution.clone(),
        }
    }
}

/// Audit polling section
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSection {
    /// Seconds between status polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_token_security_url() -> String {
    "https://api.gopluslabs.io/api/v1/token_security/1".to_string()
}
fn default_market_url() -> String {
    "https://data.tokenscout.dev/token-market-data".to_string()
}
fn default_marketing_wallet_url() -> String {
    "https://data.tokenscout.dev/marketing-wallet".to_string()
}
fn default_transaction_url() -> String {
    "https://data.tokenscout.dev/transaction-data".to_string()
}
fn default_secondary_audit_url() -> String {
    "https://data.tokenscout.dev/token-audit".to_string()
}
fn default_audit_job_url() -> String {
    "https://api.tokenscout.dev/audit".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_retries() -> u32 {
    3
}
fn default_true() -> bool {
    true
}
fn default_explorer_base() -> String {
    "https://etherscan.io".to_string()
}
fn default_swap_base() -> String {
    "https://app.uniswap.org/#/swap".to_string()
}
fn default_chart_base() -> String {
    "https://www.dextools.io/app/en/ether/pair-explorer".to_string()
}
fn default_attribution() -> String {
    "Powered by TokenScout".to_string()
}
fn default_poll_interval_secs() -> u64 {
    1
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("token_security_url", &self.providers.token_security_url),
            ("market_url", &self.providers.market_url),
            ("marketing_wallet_url", &self.providers.marketing_wallet_url),
            ("transaction_url", &self.providers.transaction_url),
            ("secondary_audit_url", &self.providers.secondary_audit_url),
            ("audit_job_url", &self.providers.audit_job_url),
        ];
        for (name, url) in urls {
            if url.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} cannot be empty"
                )));
            }
        }

        if self.providers.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.audit.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.audit.poll_interval_secs, 1);
        assert_eq!(config.resolver.validation_policy, ValidationPolicy::Lenient);
        assert!(config.report.show_lock_status);
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[providers]
token_security_url = "https://sec.example/v1/1"
market_url = "https://data.example/market"
marketing_wallet_url = "https://data.example/wallet"
transaction_url = "https://data.example/tx"
secondary_audit_url = "https://data.example/audit"
audit_job_url = "https://jobs.example/audit"
timeout_secs = 5
max_retries = 2

[resolver]
validation_policy = "strict"

[report]
show_lock_status = false
strict_escaping = true
attribution = "Powered by Example"

[audit]
poll_interval_secs = 3

[logging]
level = "debug"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.providers.token_security_url, "https://sec.example/v1/1");
        assert_eq!(config.providers.timeout_secs, 5);
        assert_eq!(config.resolver.validation_policy, ValidationPolicy::Strict);
        assert!(!config.report.show_lock_status);
        assert!(config.report.strict_escaping);
        assert_eq!(config.audit.poll_interval_secs, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let file = write_config(
            r#"
[report]
attribution = "Powered by Example"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert!(!config.providers.market_url.is_empty());
        assert_eq!(config.report.attribution, "Powered by Example");
        assert_eq!(config.report.explorer_base, "https://etherscan.io");
    }

    #[test]
    fn test_empty_url_rejected() {
        let file = write_config(
            r#"
[providers]
market_url = ""
"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let file = write_config(
            r#"
[audit]
poll_interval_secs = 0
"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_report_options_bridge() {
        let mut section = ReportSection::default();
        section.strict_escaping = true;
        section.show_lock_status = false;
        let options = section.options();
        assert_eq!(options.dialect, EscapeDialect::Strict);
        assert!(!options.show_lock_status);
    }
}

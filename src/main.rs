//! TokenScout - ERC-20 Token Risk Report Aggregator
//!
//! Resolves token statistics from public providers and renders risk reports.

mod adapters;
mod application;
mod config;
mod domain;
mod ports;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::cli::{AuditCmd, CliApp, Command, ReportCmd};
use crate::adapters::providers::{
    AuditJobClient, JsonClient, JsonClientConfig, MarketDataClient, MarketingWalletClient,
    SecondaryAuditClient, TokenSecurityClient, TransactionClient,
};
use crate::application::{AuditEvent, AuditPoller, TokenResolver};
use crate::config::{load_config, Config};
use crate::ports::audit_job::AuditJobSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (endpoint overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Report(cmd) => report_command(cmd).await,
        Command::Audit(cmd) => audit_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

fn load_config_or_default(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path).context("Failed to load configuration"),
        None => Ok(Config::default()),
    }
}

fn json_client(config: &Config) -> Result<JsonClient> {
    JsonClient::with_config(JsonClientConfig {
        timeout: Duration::from_secs(config.providers.timeout_secs),
        max_retries: config.providers.max_retries,
        ..Default::default()
    })
    .context("Failed to create HTTP client")
}

fn build_resolver(config: &Config, client: &JsonClient) -> TokenResolver {
    let providers = &config.providers;
    TokenResolver::new(
        Arc::new(TokenSecurityClient::new(
            client.clone(),
            providers.get_token_security_url(),
        )),
        Arc::new(SecondaryAuditClient::new(
            client.clone(),
            providers.secondary_audit_url.clone(),
        )),
        Arc::new(MarketDataClient::new(
            client.clone(),
            providers.market_url.clone(),
        )),
        Arc::new(MarketingWalletClient::new(
            client.clone(),
            providers.marketing_wallet_url.clone(),
        )),
        Arc::new(TransactionClient::new(
            client.clone(),
            providers.transaction_url.clone(),
        )),
    )
    .with_policy(config.resolver.validation_policy)
}

async fn report_command(cmd: ReportCmd) -> Result<()> {
    let config = load_config_or_default(cmd.config.as_deref())?;
    let client = json_client(&config)?;
    let resolver = build_resolver(&config, &client);

    let stats = resolver
        .resolve(&cmd.contract, cmd.pair.as_deref())
        .await
        .with_context(|| format!("Failed to resolve statistics for {}", cmd.contract))?;

    let mut options = config.report.options();
    if cmd.no_banner {
        options.show_lock_status = false;
    }

    println!("{}", render::render(&stats, &options));
    Ok(())
}

async fn audit_command(cmd: AuditCmd) -> Result<()> {
    let config = load_config_or_default(cmd.config.as_deref())?;
    let client = json_client(&config)?;

    let audit_client: Arc<dyn AuditJobSource> = Arc::new(AuditJobClient::new(
        client,
        config.providers.get_audit_job_url(),
    ));

    audit_client
        .start_audit(&cmd.contract)
        .await
        .with_context(|| format!("Failed to start audit for {}", cmd.contract))?;
    println!("Audit started for {}", cmd.contract);

    let poller = AuditPoller::new(
        audit_client,
        Duration::from_secs(config.audit.poll_interval_secs),
    );

    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let cancel = CancellationToken::new();

    // Ctrl+C stops the polling loop cleanly
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        ctrl_c_cancel.cancel();
    });

    let contract = cmd.contract.clone();
    let poll_task = tokio::spawn(async move { poller.run(&contract, tx, cancel).await });

    while let Some(event) = rx.recv().await {
        match event {
            AuditEvent::StatusChanged { status, at } => {
                println!("[{}] status: {:?}", at.format("%H:%M:%S"), status);
            }
            AuditEvent::Completed { report, at } => {
                println!("[{}] audit finished", at.format("%H:%M:%S"));
                if report.issues.is_empty() {
                    println!("No code issues detected.");
                } else {
                    for (i, issue) in report.issues.iter().enumerate() {
                        println!("\nIssue #{}\n{}", i + 1, issue.issue_explanation);
                        if let Some(url) = &issue.issue_code_diff_url {
                            println!("Recommendation: {url}");
                        }
                    }
                }
            }
            AuditEvent::Failed { message, at } => {
                println!("[{}] ❌ {}", at.format("%H:%M:%S"), message);
            }
        }
    }

    poll_task.await.ok();
    Ok(())
}

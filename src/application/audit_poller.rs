//! Audit Poller
//!
//! Drives a long-running external audit job to completion: polls the job
//! status on a fixed interval and emits events to a caller-supplied sink.
//! Cancellation is explicit via a `CancellationToken`; there is no ambient
//! timer state.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::ports::audit_job::AuditJobSource;
use crate::ports::models::{AuditReport, AuditStatus};

/// Events emitted while an audit job runs.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// The job status changed since the last poll
    StatusChanged {
        status: AuditStatus,
        at: DateTime<Utc>,
    },
    /// The job finished and its report was fetched
    Completed {
        report: AuditReport,
        at: DateTime<Utc>,
    },
    /// The job failed, or polling itself failed
    Failed {
        message: String,
        at: DateTime<Utc>,
    },
}

/// Polls an audit job until it ends, fails, or is cancelled.
pub struct AuditPoller {
    source: Arc<dyn AuditJobSource>,
    interval: Duration,
}

impl AuditPoller {
    pub fn new(source: Arc<dyn AuditJobSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Run the polling loop for one contract.
    ///
    /// Terminates on completion, failure, cancellation, or a dropped sink.
    pub async fn run(
        &self,
        contract: &str,
        sink: mpsc::Sender<AuditEvent>,
        cancel: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut last_status: Option<AuditStatus> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(contract, "audit polling cancelled");
                    return;
                }
                _ = ticker.tick() => {
                    match self.source.poll_status(contract).await {
                        Ok(response) => match response.status {
                            AuditStatus::Ended => {
                                let event = match self.source.fetch_result(contract).await {
                                    Ok(report) => AuditEvent::Completed {
                                        report,
                                        at: Utc::now(),
                                    },
                                    Err(e) => AuditEvent::Failed {
                                        message: format!("failed to fetch audit report: {e}"),
                                        at: Utc::now(),
                                    },
                                };
                                let _ = sink.send(event).await;
                                return;
                            }
                            AuditStatus::Errored | AuditStatus::Unknown => {
                                let message = response.error.unwrap_or_else(|| {
                                    "audit provider reported an unspecified failure".to_string()
                                });
                                let _ = sink.send(AuditEvent::Failed {
                                    message,
                                    at: Utc::now(),
                                }).await;
                                return;
                            }
                            status => {
                                if last_status != Some(status) {
                                    last_status = Some(status);
                                    if sink.send(AuditEvent::StatusChanged {
                                        status,
                                        at: Utc::now(),
                                    }).await.is_err() {
                                        // Receiver gone, nobody is listening
                                        return;
                                    }
                                }
                            }
                        },
                        Err(e) => {
                            let _ = sink.send(AuditEvent::Failed {
                                message: e.to_string(),
                                at: Utc::now(),
                            }).await;
                            return;
                        }
                    }
                }
            }
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry controller: one failure notification in, at most one retry out.

use crate::allowlist::{self, ManagedRun};
use crate::config::ControllerConfig;
use crate::confirm::confirm_failure;
use crate::decode::decode;
use crate::error::SkipReason;
use crate::identifiers;
use crate::ledger::check_retry_limit;
use crate::signature::require_failure;
use crate::trigger::trigger_retry;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::Instrument;
use xr_adapters::JobControl;
use xr_core::{ConfigPath, ManagedTransfers, NotificationEvent, RetryDecision, RunPath, RunRecord};

/// A retry that was requested from the job-control API.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryTriggered {
    pub config: ConfigPath,
    pub failed_run: RunPath,
    pub requested_run_time: DateTime<Utc>,
    pub decision: RetryDecision,
    pub new_run: RunRecord,
}

/// Result of handling one notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Retried(RetryTriggered),
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_retried(&self) -> bool {
        matches!(self, Outcome::Retried(_))
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Outcome::Skipped(reason) => Some(reason),
            Outcome::Retried(_) => None,
        }
    }
}

/// Stateless pipeline from failure notification to retry request.
///
/// Holds no per-invocation state; clones share the API client and the
/// managed mapping, so concurrent `handle` calls are independent.
#[derive(Clone)]
pub struct RetryController<J> {
    job_control: J,
    managed: Arc<ManagedTransfers>,
    config: ControllerConfig,
}

impl<J: JobControl> RetryController<J> {
    pub fn new(job_control: J, managed: ManagedTransfers, config: ControllerConfig) -> Self {
        Self {
            job_control,
            managed: Arc::new(managed),
            config,
        }
    }

    pub fn managed(&self) -> &ManagedTransfers {
        &self.managed
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Handle one notification. Never fails: every stop is an [`Outcome::Skipped`]
    /// logged at the level its reason calls for.
    pub async fn handle(&self, event: &NotificationEvent) -> Outcome {
        let span = tracing::info_span!(
            "retry.handle",
            message_id = event.log_id(),
            publish_time = event.log_publish_time()
        );
        async {
            match self.run(event).await {
                Ok(retried) => Outcome::Retried(retried),
                Err(reason) => {
                    reason.log();
                    Outcome::Skipped(reason)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, event: &NotificationEvent) -> Result<RetryTriggered, SkipReason> {
        let record = decode(event)?;
        require_failure(&record, &self.config.failure_marker)?;
        let ids = identifiers::extract(&record)?;
        let ManagedRun {
            config,
            run,
            max_retries,
        } = allowlist::admit(&self.managed, &ids)?;

        tracing::info!(run = %run, "Validating failure for {}", run.run_id());
        let confirmed = confirm_failure(
            &self.job_control,
            &run,
            self.config.poll_attempts,
            self.config.poll_delay(),
        )
        .await?;

        let Some(slot) = confirmed.effective_time() else {
            tracing::error!(run = %run, "confirmed run has neither schedule nor run time");
            return Err(SkipReason::HistoryCheckFailed(config));
        };

        let decision = check_retry_limit(
            &self.job_control,
            &config,
            slot,
            max_retries,
            self.config.history_page_size,
        )
        .await;
        let Some(attempts) = decision.attempt_count else {
            return Err(SkipReason::HistoryCheckFailed(config));
        };
        tracing::info!(
            config = %config,
            slot = %slot,
            "Retry check: {attempts} attempts found (limit {max_retries})"
        );
        if !decision.eligible {
            return Err(SkipReason::RetryLimitReached {
                config,
                attempts,
                limit: max_retries,
            });
        }

        let new_run = trigger_retry(&self.job_control, &config, slot).await?;
        tracing::info!(
            config = %config,
            new_run = %new_run.name,
            "Retry triggered for {} at {slot}",
            config.config_id()
        );

        Ok(RetryTriggered {
            config,
            failed_run: run,
            requested_run_time: slot,
            decision,
            new_run,
        })
    }
}

#[cfg(test)]
#[path = "controller_tests/mod.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry ledger: attempt counts re-derived from run history.

use chrono::{DateTime, Utc};
use xr_adapters::JobControl;
use xr_core::{ConfigPath, RetryDecision, RunRecord};

/// Number of runs whose effective time equals `slot`.
///
/// Runs without an effective time never match.
pub fn count_attempts(runs: &[RunRecord], slot: DateTime<Utc>) -> u32 {
    let count = runs
        .iter()
        .filter(|run| run.effective_time() == Some(slot))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Count prior attempts for `slot` in the most recent `page_size` runs and
/// decide eligibility against `limit`.
///
/// A history error yields an unverified (ineligible) decision.
pub async fn check_retry_limit<J: JobControl>(
    job_control: &J,
    config: &ConfigPath,
    slot: DateTime<Utc>,
    limit: u32,
    page_size: u32,
) -> RetryDecision {
    match job_control.list_runs(config, page_size).await {
        Ok(runs) => RetryDecision::evaluate(Some(count_attempts(&runs, slot)), limit),
        Err(e) => {
            tracing::error!(
                config = %config,
                error = %e,
                "failed to read run history, treating retry budget as exhausted"
            );
            RetryDecision::unverified(limit)
        }
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::SkipReason;
use chrono::{DateTime, Utc};
use xr_adapters::JobControl;
use xr_core::{ConfigPath, RunRecord};

/// Request one manual run of `config` for `slot`. Never retried locally.
pub async fn trigger_retry<J: JobControl>(
    job_control: &J,
    config: &ConfigPath,
    slot: DateTime<Utc>,
) -> Result<RunRecord, SkipReason> {
    job_control
        .start_manual_run(config, slot)
        .await
        .map_err(|e| SkipReason::TriggerFailed {
            config: config.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll a run until the job-control API reports a terminal failure.

use crate::error::SkipReason;
use std::time::Duration;
use xr_adapters::JobControl;
use xr_core::{RunPath, RunRecord};

/// Fetch `run` up to `attempts` times, `delay` apart.
///
/// Returns the record once its state is `FAILED` or `CANCELLED`. Any API
/// error, or a record naming a run other than `run`, aborts immediately; exhausting the attempts without a terminal
/// failure is reported the same way. No sleep follows the final attempt.
pub async fn confirm_failure<J: JobControl>(
    job_control: &J,
    run: &RunPath,
    attempts: u32,
    delay: Duration,
) -> Result<RunRecord, SkipReason> {
    let mut last_state = None;

    for attempt in 1..=attempts {
        let record = job_control
            .get_run(run)
            .await
            .map_err(|e| SkipReason::UnconfirmedFailure {
                run: run.clone(),
                reason: e.to_string(),
            })?;

        if record.name != run.as_str() {
            return Err(SkipReason::UnconfirmedFailure {
                run: run.clone(),
                reason: format!("job-control returned a different run: {:?}", record.name),
            });
        }

        if record.state.is_terminal_failure() {
            tracing::info!(state = %record.state, attempt, "failure confirmed");
            return Ok(record);
        }

        tracing::info!(
            state = %record.state,
            "Waiting for terminal state... ({attempt}/{attempts})"
        );
        last_state = Some(record.state);

        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }

    let reason = match last_state {
        Some(state) => format!("still {state} after {attempts} attempts"),
        None => "no attempts made".to_string(),
    };
    Err(SkipReason::UnconfirmedFailure {
        run: run.clone(),
        reason,
    })
}

#[cfg(test)]
#[path = "confirm_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller pipeline tests

mod confirmation;
mod duplicates;
mod filtering;
mod logging;
mod retry_limit;

use super::*;
use crate::test_helpers::{failed_run_path, notification, setup, setup_with, TestContext};
use serde_json::json;
use xr_adapters::{JobControlCall, JobControlError};
use xr_core::test_support::{
    config_path, failure_entry, log_entry, run, scheduled_run, ts, RUN_ID,
};
use xr_core::RunState;

const SLOT: &str = "2026-03-01T06:00:00Z";

/// The failed run as the API reports it once it has settled.
fn failed_record() -> RunRecord {
    scheduled_run(RUN_ID, RunState::Failed, SLOT)
}

/// `count` runs already recorded for the slot, the failed original first.
fn slot_history(count: usize) -> Vec<RunRecord> {
    (0..count)
        .map(|i| match i {
            0 => failed_record(),
            n => run(&format!("retry-{n}"), RunState::Failed, None, Some(SLOT)),
        })
        .collect()
}

/// Script a confirmed failure with `prior_attempts` runs in the slot.
fn seed_failure(ctx: &TestContext, prior_attempts: usize) {
    ctx.job_control.set_run(&failed_run_path(), failed_record());
    ctx.job_control.set_history(&config_path(), slot_history(prior_attempts));
}

fn assert_no_api_calls(ctx: &TestContext) {
    assert_eq!(ctx.job_control.calls(), vec![]);
}

#[tokio::test(start_paused = true)]
async fn happy_path_triggers_one_retry_for_same_slot() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    let Outcome::Retried(retried) = outcome else {
        panic!("expected retry, got {outcome:?}");
    };
    assert_eq!(retried.config, config_path());
    assert_eq!(retried.failed_run, failed_run_path());
    assert_eq!(retried.requested_run_time, ts(SLOT));
    assert_eq!(retried.decision.attempt_count, Some(1));
    assert_eq!(retried.new_run.effective_time(), Some(ts(SLOT)));

    assert_eq!(
        ctx.job_control.calls(),
        vec![
            JobControlCall::GetRun {
                run: failed_run_path().to_string()
            },
            JobControlCall::ListRuns {
                config: config_path().to_string(),
                page_size: 20,
            },
            JobControlCall::StartManualRun {
                config: config_path().to_string(),
                requested_run_time: ts(SLOT),
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn trigger_error_is_swallowed() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control
        .fail_start_run(JobControlError::Transient("deadline exceeded".to_string()));

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::TriggerFailed { .. })
    ));
    assert_eq!(ctx.job_control.started().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn run_without_any_timestamp_fails_closed() {
    let ctx = setup(3);
    ctx.job_control
        .set_run(&failed_run_path(), run(RUN_ID, RunState::Failed, None, None));

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::HistoryCheckFailed(config_path()))
    );
    assert!(ctx.job_control.started().is_empty());
}

#[tokio::test(start_paused = true)]
async fn custom_failure_marker_is_honoured() {
    let job_control = xr_adapters::FakeJobControl::new();
    let managed = ManagedTransfers::from_entries([(config_path().to_string(), 3)]).unwrap();
    let config = ControllerConfig {
        failure_marker: "Backfill aborted".to_string(),
        ..crate::test_helpers::test_config()
    };
    let controller = RetryController::new(job_control.clone(), managed, config);
    job_control.set_run(&failed_run_path(), failed_record());

    let default_marker = controller.handle(&notification(&failure_entry())).await;
    let custom_marker = controller
        .handle(&notification(&log_entry("Backfill aborted: source missing")))
        .await;

    assert_eq!(
        default_marker,
        Outcome::Skipped(SkipReason::NonMatchingSignature)
    );
    assert!(custom_marker.is_retried());
}

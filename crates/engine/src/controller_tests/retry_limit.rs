// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry ceiling and history fail-safe.

use super::*;

#[yare::parameterized(
    first_retry  = { 1, true },
    second_retry = { 2, true },
    last_retry   = { 3, true },
    exhausted    = { 4, false },
    well_past    = { 9, false },
)]
#[test_macro(tokio::test(start_paused = true))]
async fn ceiling_of_three(prior_attempts: usize, retried: bool) {
    let ctx = setup(3);
    seed_failure(&ctx, prior_attempts);

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert_eq!(outcome.is_retried(), retried, "{outcome:?}");
    assert_eq!(ctx.job_control.started().len(), usize::from(retried));
    if !retried {
        assert_eq!(
            outcome,
            Outcome::Skipped(SkipReason::RetryLimitReached {
                config: config_path(),
                attempts: prior_attempts as u32,
                limit: 3,
            })
        );
    }
}

#[tokio::test(start_paused = true)]
async fn zero_ceiling_never_retries() {
    let ctx = setup(0);
    seed_failure(&ctx, 1);

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::RetryLimitReached { attempts: 1, limit: 0, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn history_error_never_retries() {
    let ctx = setup(u32::MAX);
    seed_failure(&ctx, 1);
    ctx.job_control
        .fail_list_runs(JobControlError::Transient("connection reset".to_string()));

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::HistoryCheckFailed(config_path()))
    );
    assert!(ctx.job_control.started().is_empty());
}

#[tokio::test(start_paused = true)]
async fn manual_retries_group_with_scheduled_original() {
    // Two prior manual retries carry only a run time equal to the slot.
    let ctx = setup(2);
    seed_failure(&ctx, 3);

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::RetryLimitReached { attempts: 3, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn manual_failed_run_groups_by_run_time() {
    // The failed run itself was a manual retry with no schedule time.
    let ctx = setup(3);
    ctx.job_control.set_run(
        &failed_run_path(),
        run(RUN_ID, RunState::Failed, None, Some(SLOT)),
    );
    ctx.job_control.set_history(
        &config_path(),
        vec![
            run(RUN_ID, RunState::Failed, None, Some(SLOT)),
            scheduled_run("original", RunState::Failed, SLOT),
            scheduled_run("yesterday", RunState::Succeeded, "2026-02-28T06:00:00Z"),
        ],
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    let Outcome::Retried(retried) = outcome else {
        panic!("expected retry, got {outcome:?}");
    };
    assert_eq!(retried.decision.attempt_count, Some(2));
    assert_eq!(retried.requested_run_time, ts(SLOT));
}

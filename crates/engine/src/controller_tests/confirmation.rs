// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-state confirmation before any retry.

use super::*;
use tokio::time::Instant;

fn get_run_calls(ctx: &TestContext) -> usize {
    ctx.job_control
        .calls()
        .iter()
        .filter(|c| matches!(c, JobControlCall::GetRun { .. }))
        .count()
}

#[tokio::test(start_paused = true)]
async fn still_running_after_every_poll_never_triggers() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.set_run(
        &failed_run_path(),
        scheduled_run(RUN_ID, RunState::Running, SLOT),
    );

    let start = Instant::now();
    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::UnconfirmedFailure { .. })
    ));
    let attempts = ctx.controller.config().poll_attempts;
    assert_eq!(get_run_calls(&ctx), attempts as usize);
    assert_eq!(
        start.elapsed(),
        ctx.controller.config().poll_delay() * (attempts - 1)
    );
    assert!(ctx.job_control.started().is_empty());
}

#[tokio::test(start_paused = true)]
async fn succeeded_run_is_not_retried() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.set_run(
        &failed_run_path(),
        scheduled_run(RUN_ID, RunState::Succeeded, SLOT),
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(!outcome.is_retried());
    assert!(ctx.job_control.started().is_empty());
}

#[tokio::test(start_paused = true)]
async fn lagging_read_path_is_waited_out() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.script_run(
        &failed_run_path(),
        [
            Ok(scheduled_run(RUN_ID, RunState::Running, SLOT)),
            Ok(failed_record()),
        ],
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(outcome.is_retried(), "{outcome:?}");
    assert_eq!(get_run_calls(&ctx), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_run_is_retried() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.set_run(
        &failed_run_path(),
        scheduled_run(RUN_ID, RunState::Cancelled, SLOT),
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(outcome.is_retried(), "{outcome:?}");
}

#[tokio::test(start_paused = true)]
async fn api_error_while_polling_aborts() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.script_run(
        &failed_run_path(),
        [Err(JobControlError::Auth("token expired".to_string()))],
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::UnconfirmedFailure { .. })
    ));
    assert_eq!(get_run_calls(&ctx), 1);
    assert_eq!(ctx.job_control.calls().len(), 1);
}

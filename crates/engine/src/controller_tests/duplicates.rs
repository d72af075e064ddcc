// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duplicate and repeated delivery of the same failure.

use super::*;

#[tokio::test(start_paused = true)]
async fn duplicate_delivery_after_last_retry_is_a_no_op() {
    let ctx = setup(1);
    seed_failure(&ctx, 1);
    let event = notification(&failure_entry());

    let first = ctx.controller.handle(&event).await;
    let second = ctx.controller.handle(&event).await;

    assert!(first.is_retried(), "{first:?}");
    assert_eq!(
        second,
        Outcome::Skipped(SkipReason::RetryLimitReached {
            config: config_path(),
            attempts: 2,
            limit: 1,
        })
    );
    assert_eq!(ctx.job_control.started().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn repeated_failures_stop_at_ceiling() {
    // Each retry fails in turn and re-enters the pipeline.
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    let event = notification(&failure_entry());

    let mut outcomes = Vec::new();
    for _ in 0..6 {
        outcomes.push(ctx.controller.handle(&event).await);
    }

    let retries = outcomes.iter().filter(|o| o.is_retried()).count();
    assert_eq!(retries, 3);
    assert!(outcomes[3..].iter().all(|o| !o.is_retried()));
    assert_eq!(
        ctx.job_control
            .history(&config_path())
            .iter()
            .filter(|r| r.effective_time() == Some(ts(SLOT)))
            .count(),
        4
    );
}

#[tokio::test(start_paused = true)]
async fn concurrent_handles_share_nothing_but_the_client() {
    let ctx = setup(5);
    seed_failure(&ctx, 1);
    let event = notification(&failure_entry());
    let a = ctx.controller.clone();
    let b = ctx.controller.clone();

    let (first, second) = tokio::join!(a.handle(&event), b.handle(&event));

    assert!(first.is_retried());
    assert!(second.is_retried());
    assert_eq!(ctx.job_control.started().len(), 2);
}

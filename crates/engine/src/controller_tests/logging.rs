// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log output of the pipeline.

use super::*;
use crate::test_helpers::with_tracing;
use serial_test::serial;

#[test]
#[serial(tracing)]
fn retry_logs_each_stage_inside_handle_span() {
    let ctx = setup(3);
    seed_failure(&ctx, 2);

    let (logs, outcome) =
        with_tracing(|| async { ctx.controller.handle(&notification(&failure_entry())).await });

    assert!(outcome.is_retried());
    assert!(logs.contains("retry.handle"), "Logs:\n{logs}");
    assert!(logs.contains("message_id=\"msg-1\""), "Logs:\n{logs}");
    assert!(logs.contains(&format!("Validating failure for {RUN_ID}")), "Logs:\n{logs}");
    assert!(logs.contains("Retry check: 2 attempts found (limit 3)"), "Logs:\n{logs}");
    assert!(logs.contains("Retry triggered for"), "Logs:\n{logs}");
}

#[test]
#[serial(tracing)]
fn handle_span_carries_publish_time() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    let event = notification(&failure_entry()).with_publish_time("2026-03-01T06:00:07Z");

    let (logs, _) = with_tracing(|| async { ctx.controller.handle(&event).await });

    assert!(
        logs.contains("publish_time=\"2026-03-01T06:00:07Z\""),
        "Logs:\n{logs}"
    );
}

#[test]
#[serial(tracing)]
fn poll_progress_is_logged() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control.set_run(
        &failed_run_path(),
        scheduled_run(RUN_ID, RunState::Running, SLOT),
    );

    let (logs, outcome) =
        with_tracing(|| async { ctx.controller.handle(&notification(&failure_entry())).await });

    assert!(!outcome.is_retried());
    assert!(logs.contains("Waiting for terminal state... (1/3)"), "Logs:\n{logs}");
    assert!(logs.contains("Waiting for terminal state... (3/3)"), "Logs:\n{logs}");
    assert!(logs.contains("WARN"), "Logs:\n{logs}");
}

#[test]
#[serial(tracing)]
fn history_failure_logs_error() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    ctx.job_control
        .fail_list_runs(JobControlError::Api {
            status: 403,
            message: "permission denied".to_string(),
        });

    let (logs, _) =
        with_tracing(|| async { ctx.controller.handle(&notification(&failure_entry())).await });

    assert!(logs.contains("ERROR"), "Logs:\n{logs}");
    assert!(logs.contains("permission denied"), "Logs:\n{logs}");
    assert!(logs.contains("history_check_failed"), "Logs:\n{logs}");
}

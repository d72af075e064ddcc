// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use xr_adapters::{FakeJobControl, JobControlCall, JobControlError};
use xr_core::test_support::{config_path, run, scheduled_run, ts};
use xr_core::RunState;

const SLOT: &str = "2026-03-01T06:00:00Z";
const OTHER_SLOT: &str = "2026-02-28T06:00:00Z";

fn slot_runs(n: usize) -> Vec<RunRecord> {
    (0..n)
        .map(|i| scheduled_run(&format!("r{i}"), RunState::Failed, SLOT))
        .collect()
}

#[test]
fn counts_only_matching_slot() {
    let mut runs = slot_runs(2);
    runs.push(scheduled_run("old", RunState::Succeeded, OTHER_SLOT));
    runs.push(scheduled_run("older", RunState::Failed, OTHER_SLOT));

    assert_eq!(count_attempts(&runs, ts(SLOT)), 2);
    assert_eq!(count_attempts(&runs, ts(OTHER_SLOT)), 2);
    assert_eq!(count_attempts(&runs, ts("2026-01-01T00:00:00Z")), 0);
}

#[test]
fn manual_runs_group_by_run_time() {
    // A manual run carries no schedule time; its run time is the slot.
    let runs = vec![
        run("manual", RunState::Pending, None, Some(SLOT)),
        scheduled_run("original", RunState::Failed, SLOT),
    ];
    assert_eq!(count_attempts(&runs, ts(SLOT)), 2);
}

#[test]
fn schedule_time_takes_precedence_over_run_time() {
    // Scheduled runs start a few seconds after their slot; only the schedule
    // time identifies the slot.
    let runs = vec![run("r", RunState::Failed, Some(OTHER_SLOT), Some(SLOT))];
    assert_eq!(count_attempts(&runs, ts(SLOT)), 0);
    assert_eq!(count_attempts(&runs, ts(OTHER_SLOT)), 1);
}

#[test]
fn runs_without_times_never_match() {
    let runs = vec![run("r", RunState::Failed, None, None)];
    assert_eq!(count_attempts(&runs, ts(SLOT)), 0);
}

#[yare::parameterized(
    original_only     = { 1, 3, true },
    below_limit       = { 2, 3, true },
    at_limit          = { 3, 3, true },
    past_limit        = { 4, 3, false },
    zero_limit        = { 1, 0, false },
    empty_history     = { 0, 0, true },
)]
#[test_macro(tokio::test)]
async fn eligibility_boundary(in_history: usize, limit: u32, eligible: bool) {
    let fake = FakeJobControl::new();
    fake.set_history(&config_path(), slot_runs(in_history));

    let decision = check_retry_limit(&fake, &config_path(), ts(SLOT), limit, 20).await;

    assert_eq!(decision.eligible, eligible);
    assert_eq!(decision.attempt_count, Some(in_history as u32));
    assert_eq!(decision.limit, limit);
}

#[tokio::test]
async fn requests_configured_page_size() {
    let fake = FakeJobControl::new();

    check_retry_limit(&fake, &config_path(), ts(SLOT), 3, 7).await;

    assert_eq!(
        fake.calls(),
        vec![JobControlCall::ListRuns {
            config: config_path().to_string(),
            page_size: 7,
        }]
    );
}

#[tokio::test]
async fn window_bounds_visibility() {
    // Older slot runs fall outside a small window and go uncounted.
    let mut runs: Vec<RunRecord> = (0..5)
        .map(|i| scheduled_run(&format!("n{i}"), RunState::Succeeded, OTHER_SLOT))
        .collect();
    runs.extend(slot_runs(3));
    let fake = FakeJobControl::new();
    fake.set_history(&config_path(), runs);

    let decision = check_retry_limit(&fake, &config_path(), ts(SLOT), 2, 5).await;

    assert_eq!(decision.attempt_count, Some(0));
    assert!(decision.eligible);
}

#[yare::parameterized(
    transient = { JobControlError::Transient("connection reset".to_string()) },
    api       = { JobControlError::Api { status: 403, message: "denied".to_string() } },
    auth      = { JobControlError::Auth("no credentials".to_string()) },
)]
#[test_macro(tokio::test)]
async fn history_error_is_never_eligible(error: JobControlError) {
    let fake = FakeJobControl::new();
    fake.fail_list_runs(error);

    for limit in [0, 1, 100, u32::MAX] {
        let decision = check_retry_limit(&fake, &config_path(), ts(SLOT), limit, 20).await;
        assert!(!decision.eligible);
        assert_eq!(decision.attempt_count, None);
    }
}

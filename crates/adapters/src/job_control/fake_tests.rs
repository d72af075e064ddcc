// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use xr_core::test_support::{config_path, scheduled_run, ts};

#[tokio::test]
async fn scripted_run_sequence_repeats_last() {
    let fake = FakeJobControl::new();
    let path = config_path().run("r1");
    fake.script_run(
        &path,
        [
            Ok(scheduled_run("r1", RunState::Running, "2026-03-01T06:00:00Z")),
            Ok(scheduled_run("r1", RunState::Failed, "2026-03-01T06:00:00Z")),
        ],
    );

    assert_eq!(fake.get_run(&path).await.unwrap().state, RunState::Running);
    assert_eq!(fake.get_run(&path).await.unwrap().state, RunState::Failed);
    assert_eq!(fake.get_run(&path).await.unwrap().state, RunState::Failed);
    assert_eq!(fake.calls().len(), 3);
}

#[tokio::test]
async fn unknown_run_is_not_found() {
    let fake = FakeJobControl::new();
    let err = fake.get_run(&config_path().run("nope")).await.unwrap_err();
    assert!(matches!(err, JobControlError::NotFound(_)));
}

#[tokio::test]
async fn list_runs_honours_page_size() {
    let fake = FakeJobControl::new();
    let runs = (0..5)
        .map(|i| scheduled_run(&format!("r{i}"), RunState::Failed, "2026-03-01T06:00:00Z"))
        .collect();
    fake.set_history(&config_path(), runs);

    let page = fake.list_runs(&config_path(), 3).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(
        fake.calls(),
        vec![JobControlCall::ListRuns {
            config: config_path().to_string(),
            page_size: 3,
        }]
    );
}

#[tokio::test]
async fn start_manual_run_prepends_history() {
    let fake = FakeJobControl::new();
    fake.set_history(
        &config_path(),
        vec![scheduled_run("r1", RunState::Failed, "2026-03-01T06:00:00Z")],
    );

    let started = fake
        .start_manual_run(&config_path(), ts("2026-03-01T06:00:00Z"))
        .await
        .unwrap();

    let history = fake.history(&config_path());
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], started);
    assert_eq!(started.effective_time(), Some(ts("2026-03-01T06:00:00Z")));
    assert_eq!(fake.started().len(), 1);
}

#[tokio::test]
async fn injected_failures() {
    let fake = FakeJobControl::new();
    fake.fail_list_runs(JobControlError::Transient("boom".to_string()));
    fake.fail_start_run(JobControlError::Api {
        status: 400,
        message: "bad".to_string(),
    });

    assert!(fake.list_runs(&config_path(), 20).await.is_err());
    assert!(fake
        .start_manual_run(&config_path(), ts("2026-03-01T06:00:00Z"))
        .await
        .is_err());
    assert!(fake.history(&config_path()).is_empty());
}

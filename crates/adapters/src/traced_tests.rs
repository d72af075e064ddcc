// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job_control::{FakeJobControl, JobControlCall};
use serial_test::{parallel, serial};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use xr_core::test_support::{config_path, scheduled_run, ts};
use xr_core::RunState;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

/// Assert that captured logs contain the expected substring
fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}",);
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
#[serial(tracing)]
fn traced_get_run_logs_span_and_state() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeJobControl::new();
        let path = config_path().run("r1");
        fake.set_run(
            &path,
            scheduled_run("r1", RunState::Failed, "2026-03-01T06:00:00Z"),
        );
        TracedJobControl::new(fake).get_run(&path).await
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "job_control.get_run");
    assert_log(&logs, "run path", "runs/r1");
    assert_log(&logs, "state", "state=FAILED");
    assert_log(&logs, "elapsed", "elapsed_ms=");
}

#[test]
#[serial(tracing)]
fn traced_get_run_logs_error() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeJobControl::new();
        TracedJobControl::new(fake)
            .get_run(&config_path().run("missing"))
            .await
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "get_run failed");
    assert_log(&logs, "error level", "ERROR");
}

#[test]
#[serial(tracing)]
fn traced_list_runs_logs_count() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeJobControl::new();
        fake.set_history(
            &config_path(),
            vec![
                scheduled_run("r2", RunState::Failed, "2026-03-02T06:00:00Z"),
                scheduled_run("r1", RunState::Succeeded, "2026-03-01T06:00:00Z"),
            ],
        );
        TracedJobControl::new(fake).list_runs(&config_path(), 20).await
    });

    assert_eq!(result.unwrap().len(), 2);
    assert_log(&logs, "span name", "job_control.list_runs");
    assert_log(&logs, "page size", "page_size=20");
    assert_log(&logs, "count", "count=2");
}

#[test]
#[serial(tracing)]
fn traced_start_manual_run_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeJobControl::new();
        TracedJobControl::new(fake)
            .start_manual_run(&config_path(), ts("2026-03-01T06:00:00Z"))
            .await
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "job_control.start_manual_run");
    assert_log(&logs, "entry", "starting");
    assert_log(&logs, "completion", "run started");
}

#[test]
#[serial(tracing)]
fn traced_start_manual_run_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeJobControl::new();
        fake.fail_start_run(JobControlError::Transient("unavailable".to_string()));
        TracedJobControl::new(fake)
            .start_manual_run(&config_path(), ts("2026-03-01T06:00:00Z"))
            .await
    });

    assert!(result.is_err());
    assert_log(&logs, "failure", "start failed");
    assert_log(&logs, "error detail", "unavailable");
}

// =============================================================================
// Delegation tests
// =============================================================================

#[tokio::test]
#[parallel(tracing)]
async fn traced_delegates_every_call() {
    let fake = FakeJobControl::new();
    let traced = TracedJobControl::new(fake.clone());
    let path = config_path().run("r1");
    fake.set_run(
        &path,
        scheduled_run("r1", RunState::Cancelled, "2026-03-01T06:00:00Z"),
    );

    traced.get_run(&path).await.unwrap();
    traced.list_runs(&config_path(), 7).await.unwrap();
    traced
        .start_manual_run(&config_path(), ts("2026-03-01T06:00:00Z"))
        .await
        .unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            JobControlCall::GetRun {
                run: path.to_string()
            },
            JobControlCall::ListRuns {
                config: config_path().to_string(),
                page_size: 7,
            },
            JobControlCall::StartManualRun {
                config: config_path().to_string(),
                requested_run_time: ts("2026-03-01T06:00:00Z"),
            },
        ]
    );
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{ControllerConfig, RetryController};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use xr_adapters::FakeJobControl;
use xr_core::test_support::{config_path, RUN_ID};
use xr_core::{ManagedTransfers, NotificationEvent, RunPath};

/// Convenience alias for the controller under test.
pub(crate) type TestController = RetryController<FakeJobControl>;

/// Encode a log entry the way the notification transport does.
pub(crate) fn notification(entry: &Value) -> NotificationEvent {
    NotificationEvent::new(STANDARD.encode(entry.to_string())).with_message_id("msg-1")
}

/// Encode raw bytes as a notification payload.
pub(crate) fn raw_notification(bytes: &[u8]) -> NotificationEvent {
    NotificationEvent::new(STANDARD.encode(bytes))
}

/// Path of the run named by the default failure entry.
pub(crate) fn failed_run_path() -> RunPath {
    config_path().run(RUN_ID)
}

/// Controller settings with a short poll cadence.
pub(crate) fn test_config() -> ControllerConfig {
    ControllerConfig {
        poll_attempts: 3,
        poll_delay_ms: 10,
        ..ControllerConfig::default()
    }
}

/// Test context holding the controller and its fake job-control handle.
pub(crate) struct TestContext {
    pub controller: TestController,
    pub job_control: FakeJobControl,
}

/// A controller managing the default config with the given retry ceiling.
pub(crate) fn setup(max_retries: u32) -> TestContext {
    let managed = ManagedTransfers::from_entries([(config_path().to_string(), max_retries)])
        .unwrap();
    setup_with(managed)
}

/// A controller managing exactly `managed`.
pub(crate) fn setup_with(managed: ManagedTransfers) -> TestContext {
    let job_control = FakeJobControl::new();
    let controller = RetryController::new(job_control.clone(), managed, test_config());
    TestContext {
        controller,
        job_control,
    }
}

/// A writer that captures log output for testing
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    logs: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
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

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` on a paused current-thread runtime with captured tracing output.
pub(crate) fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

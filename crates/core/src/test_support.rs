// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ConfigPath, RunRecord, RunState};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

pub const PROJECT: &str = "acme-finance";
pub const LOCATION: &str = "us";
pub const CONFIG_ID: &str = "69657df0-0000-22f1-a447";
pub const RUN_ID: &str = "6a1f0000-0000-2b3c";
pub const FAILURE_MESSAGE: &str = "Transfer run failed: INTERNAL: quota exceeded";

/// Parse an RFC 3339 timestamp.
pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or_default()
}

pub fn config_path() -> ConfigPath {
    ConfigPath::new(PROJECT, LOCATION, CONFIG_ID)
}

// ── Run record factories ────────────────────────────────────────────────────

pub fn run(id: &str, state: RunState, schedule_time: Option<&str>, run_time: Option<&str>) -> RunRecord {
    RunRecord {
        name: config_path().run(id).to_string(),
        state,
        schedule_time: schedule_time.map(ts),
        run_time: run_time.map(ts),
    }
}

/// A scheduled run: schedule time set, run time a few seconds later.
pub fn scheduled_run(id: &str, state: RunState, schedule_time: &str) -> RunRecord {
    RunRecord {
        name: config_path().run(id).to_string(),
        state,
        schedule_time: Some(ts(schedule_time)),
        run_time: Some(ts(schedule_time) + chrono::Duration::seconds(5)),
    }
}

// ── Log entry factories ─────────────────────────────────────────────────────

/// A transfer-run log entry with every identifier in `resource.labels`.
pub fn log_entry(message: &str) -> Value {
    json!({
        "insertId": "abc123",
        "logName": format!("projects/{PROJECT}/logs/bigquerydatatransfer.googleapis.com%2Ftransfer_config"),
        "severity": "ERROR",
        "resource": {
            "type": "bigquery_dts_config",
            "labels": {
                "project_id": PROJECT,
                "location": LOCATION,
                "config_id": CONFIG_ID,
                "run_id": RUN_ID,
            }
        },
        "labels": {},
        "jsonPayload": {
            "message": message,
            "@type": "type.googleapis.com/google.cloud.bigquery.datatransfer.logging.v1.TransferRunLog",
        }
    })
}

/// The canonical failure entry for the default config and run.
pub fn failure_entry() -> Value {
    log_entry(FAILURE_MESSAGE)
}

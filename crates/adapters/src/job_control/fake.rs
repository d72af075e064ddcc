// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job-control adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{JobControl, JobControlError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use xr_core::{ConfigPath, RunPath, RunRecord, RunState};

/// Recorded job-control call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobControlCall {
    GetRun {
        run: String,
    },
    ListRuns {
        config: String,
        page_size: u32,
    },
    StartManualRun {
        config: String,
        requested_run_time: DateTime<Utc>,
    },
}

#[derive(Default)]
struct FakeJobControlState {
    /// Scripted `get_run` responses; the last one repeats once the rest are consumed
    run_responses: HashMap<String, VecDeque<Result<RunRecord, JobControlError>>>,
    /// Per-config history, most recent first
    history: HashMap<String, Vec<RunRecord>>,
    list_error: Option<JobControlError>,
    start_error: Option<JobControlError>,
    calls: Vec<JobControlCall>,
    next_id: u64,
}

/// Fake job-control adapter for testing
///
/// Manual runs started through the fake are prepended to the config's
/// history, so later `list_runs` calls observe them.
#[derive(Clone, Default)]
pub struct FakeJobControl {
    inner: Arc<Mutex<FakeJobControlState>>,
}

impl FakeJobControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<JobControlCall> {
        self.inner.lock().calls.clone()
    }

    /// Recorded `start_manual_run` calls
    pub fn started(&self) -> Vec<JobControlCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, JobControlCall::StartManualRun { .. }))
            .collect()
    }

    /// Script the sequence of `get_run` results for a run
    pub fn script_run(
        &self,
        run: &RunPath,
        responses: impl IntoIterator<Item = Result<RunRecord, JobControlError>>,
    ) {
        self.inner
            .lock()
            .run_responses
            .insert(run.to_string(), responses.into_iter().collect());
    }

    /// Make `get_run` always return this record
    pub fn set_run(&self, run: &RunPath, record: RunRecord) {
        self.script_run(run, [Ok(record)]);
    }

    /// Replace a config's history (most recent first)
    pub fn set_history(&self, config: &ConfigPath, runs: Vec<RunRecord>) {
        self.inner.lock().history.insert(config.to_string(), runs);
    }

    /// Current history of a config (most recent first)
    pub fn history(&self, config: &ConfigPath) -> Vec<RunRecord> {
        self.inner
            .lock()
            .history
            .get(config.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Make every `list_runs` call fail with this error
    pub fn fail_list_runs(&self, error: JobControlError) {
        self.inner.lock().list_error = Some(error);
    }

    /// Make every `start_manual_run` call fail with this error
    pub fn fail_start_run(&self, error: JobControlError) {
        self.inner.lock().start_error = Some(error);
    }
}

#[async_trait]
impl JobControl for FakeJobControl {
    async fn get_run(&self, run: &RunPath) -> Result<RunRecord, JobControlError> {
        let mut inner = self.inner.lock();

        inner.calls.push(JobControlCall::GetRun {
            run: run.to_string(),
        });

        let Some(queue) = inner.run_responses.get_mut(run.as_str()) else {
            return Err(JobControlError::NotFound(run.to_string()));
        };
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.unwrap_or_else(|| Err(JobControlError::NotFound(run.to_string())))
    }

    async fn list_runs(
        &self,
        config: &ConfigPath,
        page_size: u32,
    ) -> Result<Vec<RunRecord>, JobControlError> {
        let mut inner = self.inner.lock();

        inner.calls.push(JobControlCall::ListRuns {
            config: config.to_string(),
            page_size,
        });

        if let Some(err) = &inner.list_error {
            return Err(err.clone());
        }

        Ok(inner
            .history
            .get(config.as_str())
            .map(|runs| runs.iter().take(page_size as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn start_manual_run(
        &self,
        config: &ConfigPath,
        requested_run_time: DateTime<Utc>,
    ) -> Result<RunRecord, JobControlError> {
        let mut inner = self.inner.lock();

        inner.calls.push(JobControlCall::StartManualRun {
            config: config.to_string(),
            requested_run_time,
        });

        if let Some(err) = &inner.start_error {
            return Err(err.clone());
        }

        inner.next_id += 1;
        let record = RunRecord {
            name: config.run(&format!("fake-{}", inner.next_id)).to_string(),
            state: RunState::Pending,
            schedule_time: Some(requested_run_time),
            run_time: Some(requested_run_time),
        };
        inner
            .history
            .entry(config.to_string())
            .or_default()
            .insert(0, record.clone());

        Ok(record)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

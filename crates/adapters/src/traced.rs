// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::job_control::{JobControl, JobControlError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::Instrument;
use xr_core::{ConfigPath, RunPath, RunRecord};

/// Wrapper that adds tracing to any JobControl
#[derive(Clone)]
pub struct TracedJobControl<J> {
    inner: J,
}

impl<J> TracedJobControl<J> {
    pub fn new(inner: J) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<J: JobControl> JobControl for TracedJobControl<J> {
    async fn get_run(&self, run: &RunPath) -> Result<RunRecord, JobControlError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.get_run(run).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => tracing::debug!(state = %r.state, elapsed_ms, "fetched"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "get_run failed"),
            }
            result
        }
        .instrument(tracing::info_span!("job_control.get_run", run = %run))
        .await
    }

    async fn list_runs(
        &self,
        config: &ConfigPath,
        page_size: u32,
    ) -> Result<Vec<RunRecord>, JobControlError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.list_runs(config, page_size).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(runs) => tracing::debug!(count = runs.len(), elapsed_ms, "listed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list_runs failed"),
            }
            result
        }
        .instrument(tracing::info_span!("job_control.list_runs", config = %config, page_size))
        .await
    }

    async fn start_manual_run(
        &self,
        config: &ConfigPath,
        requested_run_time: DateTime<Utc>,
    ) -> Result<RunRecord, JobControlError> {
        let span = tracing::info_span!(
            "job_control.start_manual_run",
            config = %config,
            requested_run_time = %requested_run_time
        );
        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.start_manual_run(config, requested_run_time).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => tracing::info!(run = r.name.as_str(), elapsed_ms, "run started"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

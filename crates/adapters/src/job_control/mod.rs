// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-control adapters: read and start transfer runs

mod rest;

pub use rest::{RestJobControl, RestJobControlConfig, DEFAULT_ENDPOINT};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobControl, JobControlCall};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use xr_core::{ConfigPath, RunPath, RunRecord};

/// Errors from job-control operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobControlError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transient error: {0}")]
    Transient(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// Capability interface over a run-oriented transfer control plane.
///
/// Implementations hold no per-invocation state and are shared across
/// concurrent invocations.
#[async_trait]
pub trait JobControl: Clone + Send + Sync + 'static {
    /// Fetch the current record of a single run
    async fn get_run(&self, run: &RunPath) -> Result<RunRecord, JobControlError>;

    /// List at most `page_size` runs of a config, most recent first
    async fn list_runs(
        &self,
        config: &ConfigPath,
        page_size: u32,
    ) -> Result<Vec<RunRecord>, JobControlError>;

    /// Start a manual run of a config at the given logical time
    async fn start_manual_run(
        &self,
        config: &ConfigPath,
        requested_run_time: DateTime<Utc>,
    ) -> Result<RunRecord, JobControlError>;
}

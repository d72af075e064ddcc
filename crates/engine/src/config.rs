// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller tuning knobs

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Substring a log message must contain to be treated as a run failure.
pub const DEFAULT_FAILURE_MARKER: &str = "Transfer run failed";

/// Fixed-cadence settings for confirmation polling and history scanning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub failure_marker: String,
    /// Maximum `get_run` calls while waiting for a terminal failure state
    pub poll_attempts: u32,
    /// Delay between consecutive `get_run` calls
    pub poll_delay_ms: u64,
    /// Number of most recent runs inspected when counting attempts
    pub history_page_size: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            failure_marker: DEFAULT_FAILURE_MARKER.to_string(),
            poll_attempts: 5,
            poll_delay_ms: 3000,
            history_page_size: 20,
        }
    }
}

impl ControllerConfig {
    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.failure_marker.is_empty() {
            return Err(ConfigError::Invalid {
                field: "failure_marker",
                message: "must not be empty".to_string(),
            });
        }
        if self.poll_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_attempts",
                message: "must be at least 1".to_string(),
            });
        }
        if self.history_page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "history_page_size",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

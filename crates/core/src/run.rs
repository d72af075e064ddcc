// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer run records as reported by the job-control API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a transfer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    #[default]
    #[serde(rename = "TRANSFER_STATE_UNSPECIFIED")]
    Unspecified,
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    /// A state this controller does not recognise.
    #[serde(other)]
    Unknown,
}

impl RunState {
    /// Returns true for `FAILED` and `CANCELLED`, the only states a retry may follow.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, RunState::Failed | RunState::Cancelled)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Unspecified => "TRANSFER_STATE_UNSPECIFIED",
            RunState::Pending => "PENDING",
            RunState::Running => "RUNNING",
            RunState::Succeeded => "SUCCEEDED",
            RunState::Failed => "FAILED",
            RunState::Cancelled => "CANCELLED",
            RunState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// A single transfer run. Owned by the job-control service; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: RunState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_time: Option<DateTime<Utc>>,
}

impl RunRecord {
    /// The retry-grouping key: schedule time if present, else run time.
    ///
    /// An original run and every retry of it share this value.
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.schedule_time.or(self.run_time)
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

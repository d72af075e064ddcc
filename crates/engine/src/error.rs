// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the retry pipeline

use thiserror::Error;
use xr_core::{ConfigPath, RunPath};

/// Why an invocation ended without triggering a retry.
///
/// Every variant is a clean no-op for the delivery mechanism; the variant
/// only decides how loudly it is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("failed to decode log entry: {0}")]
    DecodeFailure(String),
    #[error("message does not carry the failure signature")]
    NonMatchingSignature,
    #[error("log entry missing or invalid transfer labels: {missing}")]
    MissingIdentifiers { missing: String },
    #[error("config {} not in managed list", .0.config_id())]
    NotManaged(ConfigPath),
    #[error("could not confirm final failure state for {run}: {reason}")]
    UnconfirmedFailure { run: RunPath, reason: String },
    #[error("retry limit reached for {}: {attempts} attempts (limit {limit})", .config.config_id())]
    RetryLimitReached {
        config: ConfigPath,
        attempts: u32,
        limit: u32,
    },
    #[error("could not verify retry history for {}", .0.config_id())]
    HistoryCheckFailed(ConfigPath),
    #[error("failed to trigger retry for {}: {reason}", .config.config_id())]
    TriggerFailed { config: ConfigPath, reason: String },
}

impl SkipReason {
    /// Short stable name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::DecodeFailure(_) => "decode_failure",
            SkipReason::NonMatchingSignature => "non_matching_signature",
            SkipReason::MissingIdentifiers { .. } => "missing_identifiers",
            SkipReason::NotManaged(_) => "not_managed",
            SkipReason::UnconfirmedFailure { .. } => "unconfirmed_failure",
            SkipReason::RetryLimitReached { .. } => "retry_limit_reached",
            SkipReason::HistoryCheckFailed(_) => "history_check_failed",
            SkipReason::TriggerFailed { .. } => "trigger_failed",
        }
    }

    /// Emit this reason at its designated level.
    pub fn log(&self) {
        let kind = self.kind();
        match self {
            SkipReason::NonMatchingSignature => tracing::debug!(kind, "skipping: {}", self),
            SkipReason::NotManaged(_) => tracing::info!(kind, "ignored: {}", self),
            SkipReason::DecodeFailure(_)
            | SkipReason::MissingIdentifiers { .. }
            | SkipReason::UnconfirmedFailure { .. }
            | SkipReason::RetryLimitReached { .. } => tracing::warn!(kind, "stopping: {}", self),
            SkipReason::HistoryCheckFailed(_) | SkipReason::TriggerFailed { .. } => {
                tracing::error!(kind, "stopping: {}", self)
            }
        }
    }
}

/// Errors from validating controller settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid controller setting {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

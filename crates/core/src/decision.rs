// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry eligibility for one schedule slot.

use serde::Serialize;

/// Outcome of counting prior attempts against a retry ceiling.
///
/// `attempt_count` counts every run recorded for the slot, the original
/// included. `None` means the count could not be verified and is treated as
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryDecision {
    pub eligible: bool,
    pub attempt_count: Option<u32>,
    pub limit: u32,
}

impl RetryDecision {
    /// Eligible iff the count is known and `attempt_count <= limit`.
    pub fn evaluate(attempt_count: Option<u32>, limit: u32) -> Self {
        Self {
            eligible: attempt_count.is_some_and(|n| n <= limit),
            attempt_count,
            limit,
        }
    }

    /// A decision for a slot whose history could not be read.
    pub fn unverified(limit: u32) -> Self {
        Self::evaluate(None, limit)
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;

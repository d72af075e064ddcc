// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure signature filter

use crate::decode::LogRecord;
use crate::error::SkipReason;

/// Pass records whose message contains `marker` (case-sensitive).
pub fn require_failure(record: &LogRecord, marker: &str) -> Result<(), SkipReason> {
    if record.message().contains(marker) {
        Ok(())
    } else {
        Err(SkipReason::NonMatchingSignature)
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

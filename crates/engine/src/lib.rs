// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Transfer retry pipeline
//!
//! Decodes a failure notification, confirms the failure with the job-control
//! API, re-derives the slot's attempt count from run history and requests at
//! most one manual run.

mod allowlist;
mod config;
mod confirm;
mod controller;
mod decode;
mod error;
mod identifiers;
mod ledger;
mod signature;
mod trigger;

#[cfg(test)]
mod test_helpers;

pub use allowlist::{admit, ManagedRun};
pub use config::{ControllerConfig, DEFAULT_FAILURE_MARKER};
pub use confirm::confirm_failure;
pub use controller::{Outcome, RetryController, RetryTriggered};
pub use decode::{decode, LogRecord};
pub use error::{ConfigError, SkipReason};
pub use identifiers::extract as extract_identifiers;
pub use ledger::{check_retry_limit, count_attempts};
pub use signature::require_failure;
pub use trigger::trigger_retry;

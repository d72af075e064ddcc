// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external job-control service

pub mod job_control;
pub mod traced;

pub use job_control::{
    JobControl, JobControlError, RestJobControl, RestJobControlConfig, DEFAULT_ENDPOINT,
};
pub use traced::TracedJobControl;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use job_control::{FakeJobControl, JobControlCall};

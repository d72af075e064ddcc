// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! xr-core: Domain types for the transfer retry controller

pub mod decision;
pub mod event;
pub mod id;
pub mod managed;
pub mod run;
pub mod transfer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use decision::RetryDecision;
pub use event::NotificationEvent;
pub use managed::{ManagedError, ManagedTransfers};
pub use run::{RunRecord, RunState};
pub use transfer::{is_segment, ConfigPath, PathError, RunPath, TransferIdentifiers};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Managed-config allowlist gate

use crate::error::SkipReason;
use xr_core::{ConfigPath, ManagedTransfers, RunPath, TransferIdentifiers};

/// A run that passed the allowlist, with its config's retry ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedRun {
    pub config: ConfigPath,
    pub run: RunPath,
    pub max_retries: u32,
}

/// Admit only runs whose config path is in the managed mapping.
///
/// Matching is exact on the full canonical path.
pub fn admit(
    managed: &ManagedTransfers,
    ids: &TransferIdentifiers,
) -> Result<ManagedRun, SkipReason> {
    let config = ids.config_path();
    match managed.max_retries(&config) {
        Some(max_retries) => Ok(ManagedRun {
            run: ids.run_path(),
            config,
            max_retries,
        }),
        None => Err(SkipReason::NotManaged(config)),
    }
}

#[cfg(test)]
#[path = "allowlist_tests.rs"]
mod tests;

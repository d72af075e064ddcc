// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The allowlist of transfer configs this controller may retry.

use crate::transfer::{ConfigPath, PathError};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from building the managed-transfer allowlist
#[derive(Debug, Error)]
pub enum ManagedError {
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Immutable mapping of config path to its retry ceiling.
///
/// A config absent from this mapping is never retried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedTransfers {
    entries: BTreeMap<ConfigPath, u32>,
}

impl ManagedTransfers {
    /// Build from raw `path -> max_retries` pairs, validating every path.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ManagedError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(path, max)| Ok((ConfigPath::parse(path.as_ref())?, max)))
            .collect::<Result<BTreeMap<_, _>, ManagedError>>()?;
        Ok(Self { entries })
    }

    /// Retry ceiling for a config, or `None` if it is not managed.
    pub fn max_retries(&self, path: &ConfigPath) -> Option<u32> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigPath, u32)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
#[path = "managed_tests.rs"]
mod tests;

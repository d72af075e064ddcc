// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer config and run resource names.
//!
//! Resource names follow the job-control API layout:
//! `projects/{project}/locations/{location}/transferConfigs/{config}` for a
//! config and `{config}/runs/{run}` for a single run of it.

use serde::Serialize;
use thiserror::Error;

crate::define_name! {
    /// Fully-qualified name of a transfer config.
    pub struct ConfigPath;
}

crate::define_name! {
    /// Fully-qualified name of a single transfer run.
    pub struct RunPath;
}

/// Errors from parsing resource names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid transfer config path: {0}")]
    InvalidConfigPath(String),
}

impl ConfigPath {
    pub fn new(project_id: &str, location: &str, config_id: &str) -> Self {
        Self(format!(
            "projects/{}/locations/{}/transferConfigs/{}",
            project_id, location, config_id
        ))
    }

    /// Parse a config path, rejecting anything that is not exactly
    /// `projects/*/locations/*/transferConfigs/*` with valid segments.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let parts: Vec<&str> = raw.split('/').collect();
        match parts.as_slice() {
            ["projects", project, "locations", location, "transferConfigs", config]
                if [project, location, config].iter().all(|s| is_segment(s)) =>
            {
                Ok(Self::new(project, location, config))
            }
            _ => Err(PathError::InvalidConfigPath(raw.to_string())),
        }
    }

    /// Name of a run belonging to this config.
    pub fn run(&self, run_id: &str) -> RunPath {
        RunPath(format!("{}/runs/{}", self.0, run_id))
    }

    /// The trailing config id segment.
    pub fn config_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }
}

/// True if `value` can stand as one resource-name segment: non-empty, no
/// `/`, and not a dot segment a URL parser would resolve.
pub fn is_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains('/') && value != "." && value != ".."
}

impl RunPath {
    /// The trailing run id segment.
    pub fn run_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }
}

/// Identifiers of a failed run as reported by a notification.
///
/// All four fields are single resource-name segments (see [`is_segment`]);
/// an extractor that cannot fill every field must reject the record rather
/// than build a partial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferIdentifiers {
    pub project_id: String,
    pub location: String,
    pub config_id: String,
    pub run_id: String,
}

impl TransferIdentifiers {
    /// Build identifiers, returning `None` if any field is missing or not a
    /// single segment.
    pub fn from_parts(
        project_id: Option<&str>,
        location: Option<&str>,
        config_id: Option<&str>,
        run_id: Option<&str>,
    ) -> Option<Self> {
        let present = |v: Option<&str>| v.filter(|s| is_segment(s)).map(str::to_string);
        Some(Self {
            project_id: present(project_id)?,
            location: present(location)?,
            config_id: present(config_id)?,
            run_id: present(run_id)?,
        })
    }

    pub fn config_path(&self) -> ConfigPath {
        ConfigPath::new(&self.project_id, &self.location, &self.config_id)
    }

    pub fn run_path(&self) -> RunPath {
        self.config_path().run(&self.run_id)
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer identifier extraction from log labels

use crate::decode::LogRecord;
use crate::error::SkipReason;
use xr_core::{is_segment, TransferIdentifiers};

const PROJECT_ID: &str = "project_id";
const LOCATION: &str = "location";
const CONFIG_ID: &str = "config_id";
const RUN_ID: &str = "run_id";

/// Read the four run identifiers from `resource.labels`.
///
/// `run_id` falls back to the top-level `labels` map, where the logging
/// pipeline sometimes places it. Empty values count as missing; values that
/// are not a single resource-name segment are rejected like missing ones.
pub fn extract(record: &LogRecord) -> Result<TransferIdentifiers, SkipReason> {
    let project_id = record.resource_label(PROJECT_ID);
    let location = record.resource_label(LOCATION);
    let config_id = record.resource_label(CONFIG_ID);
    let run_id = record
        .resource_label(RUN_ID)
        .filter(|s| !s.is_empty())
        .or_else(|| record.label(RUN_ID));

    TransferIdentifiers::from_parts(project_id, location, config_id, run_id).ok_or_else(|| {
        let missing: Vec<&str> = [
            (PROJECT_ID, project_id),
            (LOCATION, location),
            (CONFIG_ID, config_id),
            (RUN_ID, run_id),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_some_and(is_segment))
        .map(|(k, _)| k)
        .collect();
        SkipReason::MissingIdentifiers {
            missing: missing.join(", "),
        }
    })
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::str::FromStr;

use crate::lifecycle::{LifecycleError, LogFormat, Overrides};

/// Settings file when `XR_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "xfer-retry.toml";

/// Listen port when neither `PORT` nor `XR_PORT` is set
pub const DEFAULT_PORT: u16 = 8080;

/// Settings file path: XR_CONFIG > ./xfer-retry.toml
pub fn config_path() -> PathBuf {
    std::env::var("XR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Listen port: PORT > XR_PORT > 8080
pub fn port() -> Result<u16, LifecycleError> {
    Ok(parsed("PORT")?
        .or(parsed("XR_PORT")?)
        .unwrap_or(DEFAULT_PORT))
}

/// Settings overrides from XR_POLL_ATTEMPTS, XR_POLL_DELAY_MS,
/// XR_HISTORY_PAGE_SIZE and XR_DTS_ENDPOINT
pub fn overrides() -> Result<Overrides, LifecycleError> {
    Ok(Overrides {
        poll_attempts: parsed("XR_POLL_ATTEMPTS")?,
        poll_delay_ms: parsed("XR_POLL_DELAY_MS")?,
        history_page_size: parsed("XR_HISTORY_PAGE_SIZE")?,
        endpoint: std::env::var("XR_DTS_ENDPOINT").ok().filter(|s| !s.is_empty()),
    })
}

/// Log output format from XR_LOG_FORMAT (`json` or `pretty`)
pub fn log_format() -> LogFormat {
    std::env::var("XR_LOG_FORMAT")
        .map(|v| LogFormat::parse(&v))
        .unwrap_or_default()
}

/// Log file from XR_LOG_PATH; stderr when unset
pub fn log_path() -> Option<PathBuf> {
    std::env::var("XR_LOG_PATH")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn parsed<T: FromStr>(var: &'static str) -> Result<Option<T>, LifecycleError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LifecycleError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

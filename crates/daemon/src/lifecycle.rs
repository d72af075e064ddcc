// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: settings loading and startup.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;
use xr_adapters::{
    JobControlError, RestJobControl, RestJobControlConfig, TracedJobControl, DEFAULT_ENDPOINT,
};
use xr_core::{ManagedError, ManagedTransfers};
use xr_engine::{ConfigError, ControllerConfig, RetryController};

use crate::env;

/// Job-control client wrapped with tracing
pub type DaemonJobControl = TracedJobControl<RestJobControl>;

/// Controller with the production job-control client
pub type DaemonController = RetryController<DaemonJobControl>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is pretty.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// `[job_control]` table of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobControlSettings {
    pub endpoint: String,
    pub request_timeout_ms: u64,
    pub auth: bool,
}

impl Default for JobControlSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_ms: 30_000,
            auth: true,
        }
    }
}

impl JobControlSettings {
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if self.request_timeout_ms == 0 {
            return Err(LifecycleError::InvalidSetting {
                field: "job_control.request_timeout_ms",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl From<JobControlSettings> for RestJobControlConfig {
    fn from(settings: JobControlSettings) -> Self {
        Self {
            endpoint: settings.endpoint,
            request_timeout: Duration::from_millis(settings.request_timeout_ms),
            auth: settings.auth,
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub controller: ControllerConfig,
    pub job_control: JobControlSettings,
    /// Canonical config path -> max retries
    pub managed: BTreeMap<String, u32>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, LifecycleError> {
        let content = std::fs::read_to_string(path).map_err(|source| LifecycleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, LifecycleError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides on top of the file values.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(n) = overrides.poll_attempts {
            self.controller.poll_attempts = n;
        }
        if let Some(ms) = overrides.poll_delay_ms {
            self.controller.poll_delay_ms = ms;
        }
        if let Some(n) = overrides.history_page_size {
            self.controller.history_page_size = n;
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.job_control.endpoint = endpoint.clone();
        }
    }
}

/// Values that take precedence over the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub poll_attempts: Option<u32>,
    pub poll_delay_ms: Option<u64>,
    pub history_page_size: Option<u32>,
    pub endpoint: Option<String>,
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings file this configuration was read from
    pub settings_path: PathBuf,
    pub port: u16,
    pub log_format: LogFormat,
    /// Log file; stderr when unset
    pub log_path: Option<PathBuf>,
    pub controller: ControllerConfig,
    pub job_control: RestJobControlConfig,
    pub managed: ManagedTransfers,
}

impl Config {
    /// Load configuration from the settings file and environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let settings_path = env::config_path();
        let mut settings = Settings::load(&settings_path)?;
        settings.apply(&env::overrides()?);

        let mut config = Self::from_settings(settings_path, settings, env::port()?)?;
        config.log_format = env::log_format();
        config.log_path = env::log_path();
        Ok(config)
    }

    /// Validate settings and build the configuration.
    pub fn from_settings(
        settings_path: PathBuf,
        settings: Settings,
        port: u16,
    ) -> Result<Self, LifecycleError> {
        settings.controller.validate()?;
        settings.job_control.validate()?;
        let managed = ManagedTransfers::from_entries(settings.managed)?;

        Ok(Self {
            settings_path,
            port,
            log_format: LogFormat::default(),
            log_path: None,
            controller: settings.controller,
            job_control: settings.job_control.into(),
            managed,
        })
    }
}

/// Errors from daemon startup
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid managed transfers: {0}")]
    Managed(#[from] ManagedError),

    #[error(transparent)]
    Controller(#[from] ConfigError),

    #[error("Invalid setting {field}: {message}")]
    InvalidSetting {
        field: &'static str,
        message: String,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid log path: {0}")]
    InvalidLogPath(PathBuf),

    #[error("Failed to create job-control client: {0}")]
    JobControl(#[from] JobControlError),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of daemon startup
pub struct StartupResult {
    pub controller: DaemonController,
    /// Bound socket to serve push deliveries on
    pub listener: TcpListener,
}

/// Build the job-control client and controller, then bind the listen socket.
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    let client = RestJobControl::new(config.job_control.clone()).await?;
    let controller = RetryController::new(
        TracedJobControl::new(client),
        config.managed.clone(),
        config.controller.clone(),
    );

    for (path, max_retries) in config.managed.iter() {
        info!(config = %path, max_retries, "managing transfer config");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(addr, e))?;

    Ok(StartupResult {
        controller,
        listener,
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

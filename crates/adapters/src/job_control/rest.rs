// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BigQuery Data Transfer REST client.
//!
//! Speaks the v1 REST surface directly over `reqwest`:
//!
//! - `GET  /v1/{run}`                         -> run resource
//! - `GET  /v1/{config}/runs?pageSize=N`      -> `{ transferRuns: [...] }`
//! - `POST /v1/{config}:startManualRuns`      -> `{ runs: [...] }`
//!
//! Access tokens come from Google application-default credentials through
//! `gcp_auth`; auth can be disabled for local emulators.

use super::{JobControl, JobControlError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gcp_auth::TokenProvider;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use xr_core::{ConfigPath, RunPath, RunRecord};

/// Public Data Transfer API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://bigquerydatatransfer.googleapis.com";

const SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform"];

/// Connection settings for [`RestJobControl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestJobControlConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Attach application-default credentials to every request.
    pub auth: bool,
}

impl Default for RestJobControlConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            auth: true,
        }
    }
}

/// Job-control client for the BigQuery Data Transfer service.
#[derive(Clone)]
pub struct RestJobControl {
    endpoint: String,
    client: reqwest::Client,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

// Manual Debug implementation since TokenProvider doesn't implement Debug
impl std::fmt::Debug for RestJobControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestJobControl")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.token_provider.is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTransferRunsResponse {
    #[serde(default)]
    transfer_runs: Vec<RunRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartManualTransferRunsRequest {
    requested_run_time: String,
}

#[derive(Debug, Deserialize)]
struct StartManualTransferRunsResponse {
    #[serde(default)]
    runs: Vec<RunRecord>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl RestJobControl {
    /// Build a client, resolving credentials when `config.auth` is set.
    pub async fn new(config: RestJobControlConfig) -> Result<Self, JobControlError> {
        let token_provider = if config.auth {
            let provider = gcp_auth::provider()
                .await
                .map_err(|e| JobControlError::Auth(format!("failed to initialize GCP auth: {e}")))?;
            Some(provider)
        } else {
            None
        };

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| JobControlError::Transient(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
            token_provider,
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/v1/{}", self.endpoint, resource)
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, JobControlError> {
        let Some(provider) = &self.token_provider else {
            return Ok(request);
        };
        let token = provider
            .token(SCOPES)
            .await
            .map_err(|e| JobControlError::Auth(format!("failed to get access token: {e}")))?;
        Ok(request.bearer_auth(token.as_str()))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, JobControlError> {
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| JobControlError::Transient(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return response.json::<T>().await.map_err(|e| JobControlError::Api {
                status,
                message: format!("invalid response body: {e}"),
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(error_for_status(status, &body))
    }
}

/// Map a non-success HTTP status and body to a job-control error.
pub(crate) fn error_for_status(status: u16, body: &str) -> JobControlError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(r) if r.error.status.is_empty() => r.error.message,
        Ok(r) => format!("{} ({})", r.error.message, r.error.status),
        Err(_) => body.to_string(),
    };
    match status {
        404 => JobControlError::NotFound(message),
        429 | 500..=599 => JobControlError::Transient(message),
        _ => JobControlError::Api { status, message },
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[async_trait]
impl JobControl for RestJobControl {
    async fn get_run(&self, run: &RunPath) -> Result<RunRecord, JobControlError> {
        let request = self.client.get(self.url(run.as_str()));
        self.execute(request).await
    }

    async fn list_runs(
        &self,
        config: &ConfigPath,
        page_size: u32,
    ) -> Result<Vec<RunRecord>, JobControlError> {
        let url = format!("{}/runs?pageSize={}", self.url(config.as_str()), page_size);
        let response: ListTransferRunsResponse = self.execute(self.client.get(url)).await?;
        Ok(response.transfer_runs)
    }

    async fn start_manual_run(
        &self,
        config: &ConfigPath,
        requested_run_time: DateTime<Utc>,
    ) -> Result<RunRecord, JobControlError> {
        let url = format!("{}:startManualRuns", self.url(config.as_str()));
        let body = StartManualTransferRunsRequest {
            requested_run_time: format_time(requested_run_time),
        };
        let response: StartManualTransferRunsResponse =
            self.execute(self.client.post(url).json(&body)).await?;
        response
            .runs
            .into_iter()
            .next()
            .ok_or_else(|| JobControlError::Api {
                status: 200,
                message: "startManualRuns returned no runs".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;

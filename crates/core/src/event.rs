// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound failure notifications.

use serde::{Deserialize, Serialize};

/// A pub/sub message carrying one base64-encoded log entry.
///
/// Only `data` drives decisions; the delivery metadata is carried for logging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    #[serde(default)]
    pub data: String,
    #[serde(default, alias = "message_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, alias = "publish_time", skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
}

impl NotificationEvent {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    pub fn with_publish_time(mut self, time: impl Into<String>) -> Self {
        self.publish_time = Some(time.into());
        self
    }

    /// Message id for log fields, `-` when the transport did not supply one.
    pub fn log_id(&self) -> &str {
        self.message_id.as_deref().unwrap_or("-")
    }

    /// Publish time for log fields, `-` when absent.
    pub fn log_publish_time(&self) -> &str {
        self.publish_time.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push delivery envelopes.
//!
//! Two shapes are accepted on the push endpoint:
//!
//! - Pub/Sub push: `{"message": {"data": ..., "messageId": ...}, "subscription": ...}`
//! - CloudEvent (structured): `{"data": {"message": {...}}, ...}`

use serde::Deserialize;
use thiserror::Error;
use xr_core::NotificationEvent;

/// Errors from unwrapping a push body
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("body is not a push envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("envelope carries no message")]
    MissingMessage,
}

#[derive(Debug, Deserialize)]
struct PushEnvelope {
    #[serde(default)]
    message: Option<NotificationEvent>,
    #[serde(default)]
    data: Option<CloudEventData>,
    #[serde(default)]
    subscription: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CloudEventData {
    #[serde(default)]
    message: Option<NotificationEvent>,
}

/// Extract the notification carried by a push body.
pub fn parse(body: &[u8]) -> Result<NotificationEvent, EnvelopeError> {
    let envelope: PushEnvelope = serde_json::from_slice(body)?;
    if let Some(subscription) = &envelope.subscription {
        tracing::trace!(subscription, "push envelope");
    }
    envelope
        .message
        .or_else(|| envelope.data.and_then(|d| d.message))
        .ok_or(EnvelopeError::MissingMessage)
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;

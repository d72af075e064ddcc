// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification decoding: base64 -> UTF-8 -> JSON log entry.

use crate::error::SkipReason;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use xr_core::NotificationEvent;

/// Standard alphabet, accepting payloads with or without padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded structured log entry.
///
/// Accessors read missing or wrongly-typed fields as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord(Value);

impl LogRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `jsonPayload.message`, or the empty string.
    pub fn message(&self) -> &str {
        self.str_at("/jsonPayload/message").unwrap_or_default()
    }

    /// A value from `resource.labels`.
    pub fn resource_label(&self, key: &str) -> Option<&str> {
        self.0
            .get("resource")
            .and_then(|r| r.get("labels"))
            .and_then(|l| l.get(key))
            .and_then(Value::as_str)
    }

    /// A value from the top-level `labels`.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0
            .get("labels")
            .and_then(|l| l.get(key))
            .and_then(Value::as_str)
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(Value::as_str)
    }
}

/// Decode the log entry carried by a notification.
pub fn decode(event: &NotificationEvent) -> Result<LogRecord, SkipReason> {
    let data = event.data.trim();
    if data.is_empty() {
        return Err(SkipReason::DecodeFailure("empty payload".to_string()));
    }

    let bytes = PAYLOAD_ENGINE
        .decode(data)
        .map_err(|e| SkipReason::DecodeFailure(format!("invalid base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| SkipReason::DecodeFailure(format!("invalid utf-8: {e}")))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| SkipReason::DecodeFailure(format!("invalid json: {e}")))?;

    if !value.is_object() {
        return Err(SkipReason::DecodeFailure(
            "log entry is not a JSON object".to_string(),
        ));
    }
    Ok(LogRecord(value))
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;

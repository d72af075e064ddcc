// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn deserializes_pubsub_message() {
    let json = r#"{
        "data": "eyJhIjoxfQ==",
        "messageId": "1234",
        "publishTime": "2026-03-01T06:00:09.123Z",
        "attributes": {"logging.googleapis.com/timestamp": "x"}
    }"#;
    let event: NotificationEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.data, "eyJhIjoxfQ==");
    assert_eq!(event.message_id.as_deref(), Some("1234"));
    assert_eq!(event.log_id(), "1234");
    assert_eq!(event.log_publish_time(), "2026-03-01T06:00:09.123Z");
}

#[test]
fn accepts_snake_case_metadata() {
    let json = r#"{"data": "e30=", "message_id": "77", "publish_time": "t"}"#;
    let event: NotificationEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.message_id.as_deref(), Some("77"));
    assert_eq!(event.publish_time.as_deref(), Some("t"));
}

#[test]
fn missing_data_is_empty() {
    let event: NotificationEvent = serde_json::from_str("{}").unwrap();
    assert_eq!(event.data, "");
    assert_eq!(event.log_id(), "-");
    assert_eq!(event.log_publish_time(), "-");
}

#[test]
fn builder_sets_message_id() {
    let event = NotificationEvent::new("e30=").with_message_id("m-1");
    assert_eq!(event.log_id(), "m-1");
}

#[test]
fn builder_sets_publish_time() {
    let event = NotificationEvent::new("e30=").with_publish_time("2026-03-01T06:00:07Z");
    assert_eq!(event.log_publish_time(), "2026-03-01T06:00:07Z");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stages that stop before any API call: decode, signature, identifiers, allowlist.

use super::*;
use crate::test_helpers::raw_notification;

#[yare::parameterized(
    empty       = { NotificationEvent::new("") },
    not_base64  = { NotificationEvent::new("not//base64!!") },
    not_utf8    = { raw_notification(&[0xc3, 0x28]) },
    plain_text  = { raw_notification(b"Transfer run failed") },
    json_array  = { raw_notification(b"[\"Transfer run failed\"]") },
    json_null   = { raw_notification(b"null") },
)]
#[test_macro(tokio::test)]
async fn malformed_payload_makes_no_calls(event: NotificationEvent) {
    let ctx = setup(3);
    seed_failure(&ctx, 1);

    let outcome = ctx.controller.handle(&event).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::DecodeFailure(_))
    ));
    assert_no_api_calls(&ctx);
}

#[yare::parameterized(
    success  = { "Transfer run succeeded" },
    progress = { "Transfer run started: 12 files" },
    other    = { "Dispatched run to data source" },
)]
#[test_macro(tokio::test)]
async fn unrelated_message_stops_before_extraction(message: &str) {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    // No identifiers at all: reaching extraction would report MissingIdentifiers.
    let entry = json!({"jsonPayload": {"message": message}});

    let outcome = ctx.controller.handle(&notification(&entry)).await;

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NonMatchingSignature));
    assert_no_api_calls(&ctx);
}

#[tokio::test(start_paused = true)]
async fn run_id_from_top_level_labels_is_used() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    let mut entry = failure_entry();
    if let Some(labels) = entry["resource"]["labels"].as_object_mut() {
        labels.remove("run_id");
    }
    entry["labels"] = json!({"run_id": RUN_ID});

    let outcome = ctx.controller.handle(&notification(&entry)).await;

    assert!(outcome.is_retried(), "{outcome:?}");
}

#[tokio::test]
async fn run_id_missing_everywhere_makes_no_calls() {
    let ctx = setup(3);
    let mut entry = failure_entry();
    if let Some(labels) = entry["resource"]["labels"].as_object_mut() {
        labels.remove("run_id");
    }

    let outcome = ctx.controller.handle(&notification(&entry)).await;

    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::MissingIdentifiers {
            missing: "run_id".to_string()
        })
    );
    assert_no_api_calls(&ctx);
}

#[tokio::test]
async fn unmanaged_config_never_reaches_the_api() {
    let other = ConfigPath::new("acme-finance", "us", "someone-elses-config");
    let managed = ManagedTransfers::from_entries([(other.to_string(), 5)]).unwrap();
    let ctx = setup_with(managed);
    seed_failure(&ctx, 1);

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NotManaged(config_path())));
    assert_no_api_calls(&ctx);
}

#[tokio::test(start_paused = true)]
async fn run_id_escaping_its_config_makes_no_calls() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    // A URL parser would resolve this onto another config's run; make that
    // run look failed so only the identifier check stands in the way.
    let traversal = "../../foreign/runs/r1";
    let foreign = ConfigPath::new("acme-finance", "us", "foreign").run("r1");
    ctx.job_control.set_run(
        &config_path().run(traversal),
        RunRecord {
            name: foreign.to_string(),
            ..failed_record()
        },
    );
    let mut entry = failure_entry();
    entry["resource"]["labels"]["run_id"] = json!(traversal);

    let outcome = ctx.controller.handle(&notification(&entry)).await;

    assert_eq!(
        outcome,
        Outcome::Skipped(SkipReason::MissingIdentifiers {
            missing: "run_id".to_string()
        })
    );
    assert_no_api_calls(&ctx);
}

#[tokio::test(start_paused = true)]
async fn confirmed_record_of_another_run_never_triggers() {
    let ctx = setup(3);
    seed_failure(&ctx, 1);
    let foreign = ConfigPath::new("acme-finance", "us", "foreign").run(RUN_ID);
    ctx.job_control.set_run(
        &failed_run_path(),
        RunRecord {
            name: foreign.to_string(),
            ..failed_record()
        },
    );

    let outcome = ctx.controller.handle(&notification(&failure_entry())).await;

    assert!(matches!(
        outcome.skip_reason(),
        Some(SkipReason::UnconfirmedFailure { .. })
    ));
    assert!(ctx.job_control.started().is_empty());
    assert_eq!(ctx.job_control.calls().len(), 1);
}

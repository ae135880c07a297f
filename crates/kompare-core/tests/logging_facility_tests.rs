#![allow(clippy::unwrap_used, clippy::expect_used)]

use kompare_core::diff::{compare_detailed, Verbosity};
use kompare_core::errors::KompareError;
use kompare_core::logging_facility::test_capture::init_test_capture;
use kompare_core::{log_op_end, log_op_error, log_op_start};
use kompare_core_types::schema::{
    EVENT_COUNT_MISMATCH, EVENT_CRITERION_SKIPPED, EVENT_END, EVENT_END_ERROR,
    EVENT_SHAPE_UNRECOGNIZED, EVENT_START, FIELD_ERR_CODE,
};
use serde_json::json;
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, source_len = 3);

    let starts: Vec<_> = capture
        .events_named(EVENT_START)
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name))
        .collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("source_len"), Some("3"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends: Vec<_> = capture
        .events_named(EVENT_END)
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, KompareError::BothCollectionsUnrecognized, duration_ms = 10);

    let errors: Vec<_> = capture
        .events_named(EVENT_END_ERROR)
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::ERROR);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_STRUCTURAL"));
}

#[test]
fn test_compare_logs_start_and_end() {
    let capture = init_test_capture();
    let source = json!([{"Name": "log-start-end-a"}]);

    compare_detailed(&source, &source, &["Name"], Verbosity::Quiet).unwrap();

    capture.assert_event_exists("compare", EVENT_START);
    capture.assert_event_exists("compare", EVENT_END);
}

#[test]
fn test_skipped_criterion_is_logged_at_warn() {
    let capture = init_test_capture();
    let source = json!([{"Name": "log-skip-record", "Spec": {}}]);
    let target = json!([{"Name": "log-skip-record"}]);

    compare_detailed(&source, &target, &["Spec"], Verbosity::Quiet).unwrap();

    let skipped: Vec<_> = capture
        .events_named(EVENT_CRITERION_SKIPPED)
        .into_iter()
        .filter(|e| e.field("record_name") == Some("log-skip-record"))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, Level::WARN);
    assert_eq!(skipped[0].field("criterion"), Some("Spec"));
    assert_eq!(skipped[0].field("side"), Some("target"));
    assert_eq!(skipped[0].field(FIELD_ERR_CODE), Some("ERR_FIELD_NOT_FOUND"));
    let error = skipped[0].field("error").unwrap();
    assert!(error.contains("(record: log-skip-record)"));
    assert!(error.contains("(criterion: Spec)"));
}

#[test]
fn test_count_mismatch_and_unrecognized_shape_are_logged() {
    let capture = init_test_capture();
    let source = json!({"kind": "LogProbeList", "items": [{"Name": "x"}]});

    compare_detailed(&source, &json!("nope"), &["Name"], Verbosity::Quiet).unwrap();

    assert!(
        capture.count_events(|e| {
            e.event.as_deref() == Some(EVENT_COUNT_MISMATCH)
                && e.field("kind") == Some("LogProbeList")
        }) >= 1
    );
    assert!(
        capture.count_events(|e| {
            e.event.as_deref() == Some(EVENT_SHAPE_UNRECOGNIZED) && e.level == Level::WARN
        }) >= 1
    );
}

#[test]
fn test_structural_failure_is_logged_as_error() {
    let capture = init_test_capture();

    let _ = compare_detailed(&json!(1), &json!(2), &["Name"], Verbosity::Quiet);

    assert!(
        capture.count_events(|e| {
            e.op.as_deref() == Some("compare")
                && e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field(FIELD_ERR_CODE) == Some("ERR_STRUCTURAL")
        }) >= 1
    );
}

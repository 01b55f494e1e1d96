#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use aggtree_core::aggs::StatsAggregation;
use aggtree_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_AGG_COUNT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND,
};
use aggtree_core::errors::AggTreeError;
use aggtree_core::logging_facility::test_capture::init_test_capture;
use aggtree_core::model::Script;
use aggtree_core::{log_op_end, log_op_error, log_op_start};
use aggtree_core::{render_aggregations, Aggregation, Aggregations};
use common::{in_stock_filter, stats};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, agg_count = 2u64);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get(FIELD_DURATION_MS),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = AggTreeError::PathNotSelectable {
        path: "a".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| {
            e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR)
        })
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_PATH_NOT_SELECTABLE".to_string())
    );
    assert_eq!(
        error_events[0].fields.get(FIELD_ERR_KIND),
        Some(&"PathNotSelectable".to_string())
    );
}

#[test]
fn test_capture_is_installed_as_global_subscriber() {
    let capture = init_test_capture();
    assert!(capture.is_installed());

    let again = init_test_capture();
    assert!(again.is_installed());
}

#[test]
fn test_render_logs_start_and_end() {
    let capture = init_test_capture();
    let aggs = Aggregations::new().with("grades", stats("grade"));

    render_aggregations(&aggs).unwrap();

    capture.assert_event_exists("render_aggregations", EVENT_START);
    capture.assert_event_exists("render_aggregations", EVENT_END);
    let counted = capture.count_events(|e| {
        e.op.as_deref() == Some("render_aggregations")
            && e.event.as_deref() == Some(EVENT_START)
            && e.fields.get(FIELD_AGG_COUNT).is_some()
    });
    assert!(counted >= 1);
}

#[test]
fn test_render_failure_logs_end_error() {
    let capture = init_test_capture();
    let mut root = in_stock_filter();
    root.inject(
        Box::new(StatsAggregation::new().script(Script::new(""))),
        &["broken"],
    )
    .unwrap();
    let aggs = Aggregations::new().with("root", root);

    assert!(render_aggregations(&aggs).is_err());

    let failures = capture.count_events(|e| {
        e.op.as_deref() == Some("render_aggregations")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get(FIELD_ERR_CODE).map(String::as_str) == Some("ERR_INVALID_SCRIPT")
    });
    assert!(failures >= 1, "Expected an end_error event for the failed render");
}

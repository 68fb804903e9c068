#![allow(clippy::unwrap_used, clippy::expect_used)]

use ceosdb_core::errors::CeosError;
use ceosdb_core::logging_facility::test_capture::init_test_capture;
use ceosdb_core::types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_GROUP_COUNT, FIELD_RUN_ID, FIELD_SEED_DIGEST,
};
use ceosdb_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CeosError::MissionNotFound { mission_id: 7 };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_event.field(FIELD_ERR_KIND), Some("NotFound"));
}

#[test]
fn test_boundary_has_single_start_and_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name, run_id = "r1");
    log_op_end!(op_name, duration_ms = 3, group_count = 12);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });
    assert_eq!(starts, 1);
    assert_eq!(ends, 1);

    let end = capture
        .events_for_op(op_name)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field(FIELD_GROUP_COUNT), Some("12"));
}

#[test]
fn test_start_carries_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_start_fields_unique_5";

    log_op_start!(op_name, run_id = "r9", seed_digest = "abc");

    let start = capture
        .events_for_op(op_name)
        .into_iter()
        .next()
        .expect("Should have start event");
    assert_eq!(start.field(FIELD_RUN_ID), Some("r9"));
    assert_eq!(start.field(FIELD_SEED_DIGEST), Some("abc"));
    assert!(start.component.as_deref().unwrap().contains("logging_facility_tests"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_missing_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_classification_logs_each_subject() {
    use ceosdb_core::{classify_all, Catalog, GateThresholds, MissionAttributeIndex};

    let capture = init_test_capture();
    let mut catalog = Catalog::new();
    catalog.insert_instrument_type("Unique logging test type");

    let index = MissionAttributeIndex::build(&catalog);
    classify_all(&index, GateThresholds::default());

    let logged = capture.count_events(|e| {
        e.field("subject") == Some("instrument_type:Unique logging test type")
    });
    assert_eq!(logged, 1);
}

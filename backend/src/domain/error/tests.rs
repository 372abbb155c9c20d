//! Tests for error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn trace_id() -> TraceId {
    "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("fixture provides a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let error = trace_id.scope(async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise error");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn serialises_trace_id_and_details_when_present() {
    let error = Error::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "userName" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "userName");
}

#[rstest]
fn without_details_clears_details() {
    let error = Error::internal("boom")
        .with_details(json!({ "secret": "x" }))
        .without_details();
    assert!(error.details().is_none());
}

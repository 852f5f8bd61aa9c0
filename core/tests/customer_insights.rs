//! Customer insight aggregator tests — grouping and short-call ratios.

use callmetrics_core::customer::{customer_level_insights, SHORT_CALL_THRESHOLD_SECS};
use callmetrics_core::error::MetricsError;
use callmetrics_core::record::CallRecord;

fn call(id: &str, customer_id: &str, duration: f64) -> CallRecord {
    serde_json::from_value(serde_json::json!({
        "call_id": id,
        "duration": duration,
        "reason": "slow internet",
        "customer": {"customer_id": customer_id},
    }))
    .unwrap()
}

#[test]
fn one_short_of_four_calls_is_25_percent() {
    let calls = vec![
        call("a", "C1", 40.0),
        call("b", "C1", 300.0),
        call("c", "C1", 600.0),
        call("d", "C1", 120.0),
    ];
    let insights = customer_level_insights(&calls, SHORT_CALL_THRESHOLD_SECS).unwrap();
    let insight = &insights["C1"];
    assert_eq!(insight.total_calls, 4);
    assert_eq!(insight.short_calls, 1);
    assert_eq!(insight.short_call_percentage, 25.0);
    assert!((insight.total_duration - 1060.0).abs() < 1e-9);
}

#[test]
fn calls_group_by_customer_id() {
    let calls = vec![
        call("a", "C1", 100.0),
        call("b", "C2", 200.0),
        call("c", "C1", 300.0),
    ];
    let insights = customer_level_insights(&calls, 50.0).unwrap();
    assert_eq!(insights.len(), 2);
    assert_eq!(insights["C1"].total_calls, 2);
    assert_eq!(insights["C2"].total_calls, 1);
    assert!((insights["C1"].total_duration - 400.0).abs() < 1e-9);
}

#[test]
fn short_call_boundary_is_exclusive() {
    // Exactly at the threshold is not short.
    let calls = vec![call("a", "C1", 50.0), call("b", "C1", 49.999)];
    let insights = customer_level_insights(&calls, 50.0).unwrap();
    assert_eq!(insights["C1"].short_calls, 1);
}

#[test]
fn percentage_rounds_to_two_decimals() {
    let calls = vec![
        call("a", "C1", 10.0),
        call("b", "C1", 300.0),
        call("c", "C1", 300.0),
    ];
    let insights = customer_level_insights(&calls, 50.0).unwrap();
    assert_eq!(insights["C1"].short_call_percentage, 33.33);
}

#[test]
fn missing_customer_fails_fast() {
    let mut bad = call("b", "C1", 100.0);
    bad.customer = None;
    let calls = vec![call("a", "C1", 100.0), bad];

    let err = customer_level_insights(&calls, 50.0).unwrap_err();
    assert!(
        matches!(err, MetricsError::MissingField { field: "customer.customer_id", .. }),
        "expected MissingField(customer.customer_id), got {err:?}"
    );
}

#[test]
fn missing_duration_fails_fast() {
    let mut bad = call("b", "C1", 100.0);
    bad.duration = None;
    let calls = vec![bad];

    let err = customer_level_insights(&calls, 50.0).unwrap_err();
    assert!(
        matches!(err, MetricsError::MissingField { field: "duration", .. }),
        "expected MissingField(duration), got {err:?}"
    );
}

#[test]
fn empty_call_set_yields_empty_map() {
    let insights = customer_level_insights(&[], 50.0).unwrap();
    assert!(insights.is_empty());
}

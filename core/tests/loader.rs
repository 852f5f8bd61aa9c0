//! Record-store loader tests — per-line skip policy and validation.

use callmetrics_core::record::CallRecord;
use callmetrics_core::store::CallStore;
use std::io::Cursor;

fn load(lines: &str) -> Vec<CallRecord> {
    let _ = env_logger::builder().is_test(true).try_init();
    CallStore::load_from(Cursor::new(lines.to_string())).unwrap()
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let input = r#"{"call_id": "c1", "duration": 120.0}
not json at all
{"call_id": "c2", "duration": 300.0}
"#;
    let calls = load(input);
    assert_eq!(
        calls.len(),
        2,
        "both valid records should survive the malformed line"
    );
    assert_eq!(calls[0].call_id, "c1");
    assert_eq!(calls[1].call_id, "c2");
}

#[test]
fn records_without_call_id_are_dropped() {
    let input = r#"{"duration": 120.0, "reason": "no id"}
{"call_id": "c1"}
"#;
    let calls = load(input);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].call_id, "c1");
}

#[test]
fn non_string_call_id_is_dropped() {
    let input = r#"{"call_id": null, "duration": 10.0}
{"call_id": 17, "duration": 10.0}
{"call_id": "ok"}
"#;
    let calls = load(input);
    assert_eq!(calls.len(), 1, "only the string call_id survives");
    assert_eq!(calls[0].call_id, "ok");
}

#[test]
fn optional_fields_are_not_validated_at_load() {
    let calls = load(r#"{"call_id": "bare"}"#);
    assert_eq!(
        calls.len(),
        1,
        "a record carrying only call_id is valid at load time"
    );
    let call = &calls[0];
    assert!(call.duration.is_none());
    assert!(call.reason.is_none());
    assert!(call.customer.is_none());
    assert!(call.events.is_empty());
}

#[test]
fn unknown_keys_are_ignored() {
    let input = r#"{"call_id": "c1", "recording_url": "https://example.com/r/1.wav", "queue_name": "Support Queue"}"#;
    let calls = load(input);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].queue_name.as_deref(), Some("Support Queue"));
}

#[test]
fn blank_lines_are_ignored() {
    let input = "\n{\"call_id\": \"c1\"}\n\n   \n{\"call_id\": \"c2\"}\n";
    let calls = load(input);
    assert_eq!(calls.len(), 2);
}

#[test]
fn events_and_nested_structures_deserialize() {
    let input = r#"{"call_id": "c1", "duration": 240.0, "reason": "call drop", "customer": {"customer_id": "C77", "name": "Nina Patel"}, "agent": {"agent_id": "A12"}, "events": [{"event_type": "ringing", "timestamp": "2025-03-01T10:00:00Z"}, {"event_type": "answered", "timestamp": "2025-03-01T10:00:07Z", "details": {"channel": "mobile"}}]}"#;
    let calls = load(input);
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.customer_id().unwrap(), "C77");
    assert_eq!(call.events.len(), 2);
    assert_eq!(call.events[1].event_type.as_deref(), Some("answered"));
}

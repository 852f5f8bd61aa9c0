//! Deterministic synthetic call-record generation.
//!
//! Produces datasets shaped like the production record source: weighted
//! contact-reason categories, the standard event ladder, and both
//! timestamp encodings. Same seed = byte-identical records. Used by the
//! runner's `generate` mode and by tests needing bulk fixtures.

use crate::record::{AgentRef, CallEvent, CallRecord, CustomerRef};
use crate::rng::SampleRng;
use chrono::{DateTime, Duration, Utc};

struct ReasonCategory {
    name: &'static str,
    weight: f64,
    reasons: &'static [&'static str],
}

const CATEGORIES: &[ReasonCategory] = &[
    ReasonCategory {
        name: "billing",
        weight: 0.25,
        reasons: &[
            "billing dispute",
            "refund request",
            "double charge",
            "late fee dispute",
            "promo not applied",
            "incorrect bill amount",
            "payment not reflected",
            "duplicate invoice",
        ],
    },
    ReasonCategory {
        name: "internet",
        weight: 0.25,
        reasons: &[
            "slow internet",
            "no internet",
            "intermittent connectivity",
            "mobile data not working",
            "router not working",
            "5G not available",
            "network congestion",
            "streaming buffering",
        ],
    },
    ReasonCategory {
        name: "voice",
        weight: 0.20,
        reasons: &[
            "call drop",
            "cannot make calls",
            "poor call quality",
            "no signal",
            "echo on call",
            "call forwarding not working",
            "roaming call issue",
        ],
    },
    ReasonCategory {
        name: "sim",
        weight: 0.15,
        reasons: &[
            "SIM activation issue",
            "lost SIM replacement",
            "block SIM",
            "SIM not detected",
            "porting request delay",
            "eSIM activation",
        ],
    },
    ReasonCategory {
        name: "plans",
        weight: 0.10,
        reasons: &[
            "change plan",
            "upgrade package",
            "plan downgrade",
            "plan cancellation",
            "add-on not activated",
            "data pack expired",
        ],
    },
    ReasonCategory {
        name: "account",
        weight: 0.05,
        reasons: &[
            "update contact info",
            "account locked",
            "change password",
            "unable to login",
            "KYC update required",
        ],
    },
];

/// The lifecycle every generated call walks through, in order.
const EVENT_LADDER: &[&str] = &[
    "ringing",
    "answered",
    "greeting",
    "interaction",
    "resolution",
    "ended",
];

const DISPOSITIONS: &[&str] = &["resolved", "unresolved", "escalated"];
const DISPOSITION_WEIGHTS: &[f64] = &[0.7, 0.2, 0.1];

const FIRST_NAMES: &[&str] = &[
    "Ava", "Liam", "Maya", "Noah", "Priya", "Omar", "Sofia", "Ethan", "Ines", "Jonas", "Leila",
    "Marcus", "Nina", "Victor", "Wei", "Zara",
];
const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brown", "Chen", "Dube", "Eriksen", "Fischer", "Garcia", "Haddad", "Ivanov",
    "Jensen", "Khan", "Larsen", "Moreau", "Novak", "Okafor", "Patel",
];

/// 2025-01-01T00:00:00Z. Generated calls start within ~180 days of this.
const BASE_EPOCH_SECS: i64 = 1_735_689_600;
const START_WINDOW_SECS: u64 = 180 * 24 * 3600;

/// Generate `count` synthetic call records from `seed`.
pub fn generate_calls(seed: u64, count: usize) -> Vec<CallRecord> {
    let mut rng = SampleRng::new(seed);
    (0..count).map(|i| generate_record(&mut rng, i)).collect()
}

fn generate_record(rng: &mut SampleRng, index: usize) -> CallRecord {
    let (reason, category) = pick_reason(rng);
    let duration = rng.range_u64(180, 1800) as f64;
    let start = base_instant() + Duration::seconds(rng.range_u64(0, START_WINDOW_SECS) as i64);
    let end = start + Duration::seconds(duration as i64);
    let disposition = DISPOSITIONS[rng.pick_weighted(DISPOSITION_WEIGHTS)];
    let customer_name = format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES));
    let agent_name = format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES));
    let events = generate_events(rng, start, reason);

    CallRecord {
        call_id: format!("call-{index:06}"),
        duration: Some(duration),
        reason: Some(reason.to_string()),
        customer: Some(CustomerRef {
            customer_id: format!("C{}", rng.range_u64(1000, 9999)),
            name: Some(customer_name),
            phone_number: None,
            email: None,
        }),
        agent: Some(AgentRef {
            agent_id: format!("A{}", rng.range_u64(100, 999)),
            name: Some(agent_name),
            extension: Some(rng.range_u64(100, 999).to_string()),
        }),
        events,
        notes: Some(format!(
            "Customer called regarding {reason}. Issue was {disposition}."
        )),
        disposition: Some(disposition.to_string()),
        category: Some(category.to_string()),
        queue_name: Some("Support Queue".to_string()),
        call_type: Some(if rng.chance(0.5) { "inbound" } else { "outbound" }.to_string()),
        start_time: Some(format_plain(start)),
        end_time: Some(format_plain(end)),
    }
}

fn pick_reason(rng: &mut SampleRng) -> (&'static str, &'static str) {
    let weights: Vec<f64> = CATEGORIES.iter().map(|c| c.weight).collect();
    let category = &CATEGORIES[rng.pick_weighted(&weights)];
    (*rng.pick(category.reasons), category.name)
}

fn generate_events(rng: &mut SampleRng, start: DateTime<Utc>, reason: &str) -> Vec<CallEvent> {
    let mut events = Vec::with_capacity(EVENT_LADDER.len());
    let mut t = start;
    for step in EVENT_LADDER {
        t += Duration::seconds(rng.range_u64(5, 60) as i64);
        // Roughly a third of events carry sub-second precision, so both
        // source encodings stay represented in generated data.
        let timestamp = if rng.chance(0.3) {
            format_fractional(t + Duration::milliseconds(rng.range_u64(0, 999) as i64))
        } else {
            format_plain(t)
        };
        let details = match *step {
            "interaction" => Some(serde_json::json!({
                "customer_request": format!("I need help with {reason}.")
            })),
            "resolution" => Some(serde_json::json!({
                "solution": format!("{reason} addressed")
            })),
            _ => None,
        };
        events.push(CallEvent {
            event_type: Some(step.to_string()),
            timestamp: Some(timestamp),
            details,
        });
    }
    events
}

fn base_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_EPOCH_SECS, 0).expect("fixed base instant is valid")
}

fn format_plain(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn format_fractional(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

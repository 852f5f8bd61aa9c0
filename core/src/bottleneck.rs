//! Event bottleneck detection.
//!
//! RULE: events are consumed in input order. The detector trusts the
//! source's insertion order, not the timestamps — gaps are signed, and a
//! negative gap (out-of-order timestamps) is kept and can win the max.
//! Sorting by timestamp here would hide exactly the data-quality
//! problems the signed gaps expose.

use crate::record::CallRecord;
use crate::timestamp::parse_timestamp;
use serde::{Deserialize, Serialize};

/// One adjacent event-pair transition and its wall-clock gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub from: String,
    pub to: String,
    pub duration_secs: f64,
}

/// Compute the signed gap for every usable adjacent event pair.
///
/// A pair is skipped — never fatal for the call — when either event
/// lacks a timestamp or an event-type label, or when a timestamp fails
/// to parse (the failure is logged for diagnosis).
pub fn transition_gaps(call: &CallRecord) -> Vec<Bottleneck> {
    let mut gaps = Vec::new();
    for pair in call.events.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let (Some(prev_ts), Some(curr_ts)) = (&prev.timestamp, &curr.timestamp) else {
            continue;
        };
        let (Some(from), Some(to)) = (&prev.event_type, &curr.event_type) else {
            continue;
        };
        let start = match parse_timestamp(prev_ts) {
            Ok(t) => t,
            Err(err) => {
                log::warn!("call {}: skipping event pair: {err}", call.call_id);
                continue;
            }
        };
        let end = match parse_timestamp(curr_ts) {
            Ok(t) => t,
            Err(err) => {
                log::warn!("call {}: skipping event pair: {err}", call.call_id);
                continue;
            }
        };

        let gap = end - start;
        let duration_secs = match gap.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.0,
            None => gap.num_milliseconds() as f64 / 1000.0,
        };
        gaps.push(Bottleneck {
            from: from.clone(),
            to: to.clone(),
            duration_secs,
        });
    }
    gaps
}

/// The single slowest transition of a call, or `None` when fewer than
/// two usable events exist.
///
/// Stable max over signed durations: on a tie the first-encountered
/// transition wins.
pub fn longest_segment(call: &CallRecord) -> Option<Bottleneck> {
    let mut longest: Option<Bottleneck> = None;
    for gap in transition_gaps(call) {
        match &longest {
            Some(best) if gap.duration_secs <= best.duration_secs => {}
            _ => longest = Some(gap),
        }
    }
    longest
}

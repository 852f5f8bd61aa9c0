//! Average-handling-time metrics.
//!
//! These aggregates assume the computational fields (`duration`,
//! `reason`) are present on every call that survived loading. A missing
//! one fails the whole computation with `MissingField` — the loader is
//! the only place with a skip policy.

use crate::error::MetricsResult;
use crate::record::CallRecord;
use std::collections::HashMap;

/// Default long-call threshold, in seconds. Calls strictly longer than
/// this count as "long".
pub const AHT_THRESHOLD_SECS: f64 = 530.0;

/// Arithmetic mean of call durations. 0.0 for an empty set.
pub fn calculate_aht(calls: &[CallRecord]) -> MetricsResult<f64> {
    if calls.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for call in calls {
        total += call.duration_secs()?;
    }
    Ok(total / calls.len() as f64)
}

/// The subset of calls with `duration` strictly greater than
/// `threshold_secs`. A call sitting exactly on the threshold is not long.
pub fn long_calls(calls: &[CallRecord], threshold_secs: f64) -> MetricsResult<Vec<CallRecord>> {
    let mut long = Vec::new();
    for call in calls {
        if call.duration_secs()? > threshold_secs {
            long.push(call.clone());
        }
    }
    Ok(long)
}

/// The `top_n` most frequent contact reasons, most frequent first.
///
/// Ties keep first-encounter order (stable ranking). Never returns more
/// than `top_n` entries, and never an entry with count 0.
pub fn top_contact_reasons(
    calls: &[CallRecord],
    top_n: usize,
) -> MetricsResult<Vec<(String, usize)>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for call in calls {
        let reason = call.contact_reason()?;
        let count = counts.entry(reason).or_insert(0);
        if *count == 0 {
            order.push(reason);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|reason| (reason.to_string(), counts[reason]))
        .collect();
    // sort_by is stable, so equal counts stay in encounter order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    Ok(ranked)
}

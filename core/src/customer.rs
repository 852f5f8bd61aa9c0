//! Per-customer behavioral rollups.

use crate::error::MetricsResult;
use crate::record::CallRecord;
use crate::types::{round2, CustomerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default short-call threshold, in seconds. Calls strictly shorter than
/// this count as "short" — a signal of possibly premature disconnection.
pub const SHORT_CALL_THRESHOLD_SECS: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInsight {
    pub total_calls: u64,
    pub total_duration: f64,
    pub short_calls: u64,
    pub short_call_percentage: f64,
}

/// Build one insight per distinct customer over `calls`.
///
/// Insights are built fresh on every query and keyed by `customer_id`;
/// nothing is persisted and no ordering is guaranteed. A call without a
/// customer or a duration fails the whole computation.
pub fn customer_level_insights(
    calls: &[CallRecord],
    short_call_threshold_secs: f64,
) -> MetricsResult<HashMap<CustomerId, CustomerInsight>> {
    let mut insights: HashMap<CustomerId, CustomerInsight> = HashMap::new();

    for call in calls {
        let customer_id = call.customer_id()?.to_string();
        let duration = call.duration_secs()?;
        let insight = insights.entry(customer_id).or_default();
        insight.total_calls += 1;
        insight.total_duration += duration;
        if duration < short_call_threshold_secs {
            insight.short_calls += 1;
        }
    }

    for insight in insights.values_mut() {
        insight.short_call_percentage = if insight.total_calls > 0 {
            round2(insight.short_calls as f64 / insight.total_calls as f64 * 100.0)
        } else {
            0.0
        };
    }

    Ok(insights)
}

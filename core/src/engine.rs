//! The analytics engine — one loaded snapshot, many queries.
//!
//! Each engine owns an immutable snapshot of call records plus the
//! configuration and, optionally, the recommendation collaborator.
//! Every query computes over that snapshot from scratch: callers get
//! read-your-own-snapshot consistency, and concurrent engines never
//! share mutable state. Feedback aggregates re-read the full history
//! from the store on each call.

use crate::{
    aht::{calculate_aht, long_calls, top_contact_reasons},
    bottleneck::{longest_segment, Bottleneck},
    config::AnalyticsConfig,
    customer::{customer_level_insights, CustomerInsight},
    error::{MetricsError, MetricsResult},
    feedback::{self, EffectivenessReport, FeedbackRecord, FeedbackSummary},
    recommender::Recommender,
    record::CallRecord,
    simulation::{simulate_aht_reduction, SimulationResult},
    store::FeedbackStore,
    types::{round2, CallId, CustomerId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Improvement assumed by the headline savings figure in `AhtSummary`.
const ASSUMED_IMPROVEMENT: f64 = 0.5;

/// How many customers the per-reason view surfaces.
const TOP_CUSTOMERS: usize = 5;

/// Headline AHT metrics across the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AhtSummary {
    pub average_aht: f64,
    pub long_calls_count: usize,
    pub long_calls_percentage: f64,
    pub top_contact_reasons: Vec<(String, usize)>,
    pub estimated_annual_savings: f64,
    pub cost_per_call: f64,
}

/// Average slowest-segment duration for one observed transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionStat {
    pub transition: String,
    pub avg_duration: f64,
}

/// Metrics for the subset of calls sharing one contact reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonInsights {
    pub contact_reason: String,
    pub total_calls: usize,
    pub average_duration: f64,
    pub long_calls: usize,
    pub top_customers: Vec<(CustomerId, CustomerInsight)>,
    pub bottlenecks: Vec<TransitionStat>,
    pub recommendation: Option<String>,
}

/// Everything known about one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDetails {
    pub call_id: CallId,
    pub customer_id: Option<CustomerId>,
    pub reason: Option<String>,
    pub duration: Option<f64>,
    pub agent_id: Option<String>,
    pub bottleneck: Option<Bottleneck>,
    pub recommendation: Option<String>,
}

pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    calls: Vec<CallRecord>,
    feedback: FeedbackStore,
    recommender: Option<Box<dyn Recommender>>,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig, calls: Vec<CallRecord>, feedback: FeedbackStore) -> Self {
        Self {
            config,
            calls,
            feedback,
            recommender: None,
        }
    }

    /// Inject the external recommendation collaborator. Without one,
    /// recommendation fields in reports stay empty.
    pub fn with_recommender(mut self, recommender: Box<dyn Recommender>) -> Self {
        self.recommender = Some(recommender);
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    fn recommend(&self, query: &str) -> MetricsResult<Option<String>> {
        match &self.recommender {
            Some(recommender) => Ok(Some(recommender.recommend(query)?)),
            None => Ok(None),
        }
    }

    /// Headline AHT metrics across the whole snapshot. The savings
    /// figure assumes the documented 50% long-call improvement.
    pub fn aht_summary(&self, cost_per_call: f64) -> MetricsResult<AhtSummary> {
        if cost_per_call <= 0.0 {
            return Err(MetricsError::InvalidParameter {
                name: "cost_per_call",
                value: cost_per_call,
            });
        }

        let aht = calculate_aht(&self.calls)?;
        let long = long_calls(&self.calls, self.config.aht_threshold_secs)?;
        let top_reasons = top_contact_reasons(&long, self.config.top_reasons)?;

        let mut long_duration_secs = 0.0;
        for call in &long {
            long_duration_secs += call.duration_secs()?;
        }
        // Same heuristic projection the simulator uses, pinned at the
        // assumed improvement factor.
        let annual_savings =
            (long_duration_secs * ASSUMED_IMPROVEMENT) / 3600.0 * (cost_per_call / 3600.0) * 4.0;

        let long_percentage = if self.calls.is_empty() {
            0.0
        } else {
            round2(long.len() as f64 / self.calls.len() as f64 * 100.0)
        };

        Ok(AhtSummary {
            average_aht: round2(aht),
            long_calls_count: long.len(),
            long_calls_percentage: long_percentage,
            top_contact_reasons: top_reasons,
            estimated_annual_savings: round2(annual_savings),
            cost_per_call,
        })
    }

    /// Metrics for a single contact reason, matched case-insensitively.
    /// No matching calls is a distinct not-found outcome.
    pub fn reason_insights(&self, contact_reason: &str) -> MetricsResult<ReasonInsights> {
        let needle = contact_reason.to_lowercase();
        let subset: Vec<CallRecord> = self
            .calls
            .iter()
            .filter(|c| c.reason.as_deref().is_some_and(|r| r.to_lowercase() == needle))
            .cloned()
            .collect();
        if subset.is_empty() {
            return Err(MetricsError::ReasonNotFound {
                reason: contact_reason.to_string(),
            });
        }

        // Average each transition's slowest-segment duration across the
        // subset, in first-encounter order.
        let mut transitions: Vec<String> = Vec::new();
        let mut samples: HashMap<String, Vec<f64>> = HashMap::new();
        for call in &subset {
            if let Some(segment) = longest_segment(call) {
                let key = format!("{} → {}", segment.from, segment.to);
                if !samples.contains_key(&key) {
                    transitions.push(key.clone());
                }
                samples.entry(key).or_default().push(segment.duration_secs);
            }
        }
        let bottlenecks: Vec<TransitionStat> = transitions
            .iter()
            .map(|key| {
                let durations = &samples[key];
                TransitionStat {
                    transition: key.clone(),
                    avg_duration: durations.iter().sum::<f64>() / durations.len() as f64,
                }
            })
            .collect();

        let insights =
            customer_level_insights(&subset, self.config.short_call_threshold_secs)?;
        let mut top_customers: Vec<(CustomerId, CustomerInsight)> = insights.into_iter().collect();
        top_customers.sort_by(|a, b| b.1.total_calls.cmp(&a.1.total_calls));
        top_customers.truncate(TOP_CUSTOMERS);

        let recommendation = self.recommend(&format!("Reduce AHT for {contact_reason}"))?;

        Ok(ReasonInsights {
            contact_reason: contact_reason.to_string(),
            total_calls: subset.len(),
            average_duration: calculate_aht(&subset)?,
            long_calls: long_calls(&subset, self.config.aht_threshold_secs)?.len(),
            top_customers,
            bottlenecks,
            recommendation,
        })
    }

    /// Everything known about one call, including its slowest transition.
    pub fn call_details(&self, call_id: &str) -> MetricsResult<CallDetails> {
        let call = self
            .calls
            .iter()
            .find(|c| c.call_id == call_id)
            .ok_or_else(|| MetricsError::CallNotFound {
                call_id: call_id.to_string(),
            })?;

        let query = format!(
            "Call {}: {} (Duration: {}s)",
            call.call_id,
            call.reason.as_deref().unwrap_or("Unknown"),
            call.duration.unwrap_or(0.0),
        );
        let recommendation = self.recommend(&query)?;

        Ok(CallDetails {
            call_id: call.call_id.clone(),
            customer_id: call.customer.as_ref().map(|c| c.customer_id.clone()),
            reason: call.reason.clone(),
            duration: call.duration,
            agent_id: call.agent.as_ref().map(|a| a.agent_id.clone()),
            bottleneck: longest_segment(call),
            recommendation,
        })
    }

    /// Insight for one customer. Unknown ids are a distinct not-found
    /// outcome, not a computational error.
    pub fn customer_insight(&self, customer_id: &str) -> MetricsResult<CustomerInsight> {
        let mut insights =
            customer_level_insights(&self.calls, self.config.short_call_threshold_secs)?;
        insights
            .remove(customer_id)
            .ok_or_else(|| MetricsError::CustomerNotFound {
                customer_id: customer_id.to_string(),
            })
    }

    /// What-if projection over the snapshot.
    pub fn simulate(
        &self,
        improvement_factor: f64,
        cost_per_call: f64,
    ) -> MetricsResult<SimulationResult> {
        simulate_aht_reduction(&self.calls, &self.config, improvement_factor, cost_per_call)
    }

    /// Persist one feedback outcome. Scores run 1 (poor) to 5 (excellent).
    pub fn record_feedback(
        &self,
        call_id: CallId,
        context: String,
        recommendation: String,
        score: i64,
        original_duration: f64,
        new_duration: f64,
        comment: String,
    ) -> MetricsResult<FeedbackRecord> {
        if !(1..=5).contains(&score) {
            return Err(MetricsError::InvalidScore { score });
        }
        let record = FeedbackRecord::new(
            call_id,
            context,
            recommendation,
            score,
            original_duration,
            new_duration,
            comment,
        );
        self.feedback.append(&record)?;
        Ok(record)
    }

    /// Summary statistics over the full feedback history.
    pub fn feedback_summary(&self) -> MetricsResult<FeedbackSummary> {
        Ok(feedback::summarize(&self.feedback.load()?))
    }

    /// Per-recommendation effectiveness over the full feedback history.
    pub fn feedback_effectiveness(&self) -> MetricsResult<EffectivenessReport> {
        Ok(feedback::recommendation_effectiveness(&self.feedback.load()?))
    }
}

//! Feedback records and effectiveness aggregation.
//!
//! Feedback is append-only: one record per submission, never updated or
//! deleted. Every aggregate here re-reads the full accumulated history —
//! no incremental state is kept between calls, and an empty history
//! always yields a well-defined zero-valued result.

use crate::types::{round2, CallId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum score for an entry to count as positive feedback.
pub const POSITIVE_SCORE_MIN: i64 = 4;
/// Minimum percent reduction for an entry to count as positive feedback.
pub const POSITIVE_REDUCTION_MIN: f64 = 10.0;

/// Group keys are the first recommendation line, capped at this length.
const GROUP_KEY_MAX_CHARS: usize = 50;
/// How many records the quality rankings keep at each end.
const QUALITY_SAMPLE: usize = 3;

/// One logged outcome of applying a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub call_id: CallId,
    pub context: String,
    pub recommendation: String,
    pub score: i64,
    pub original_duration: f64,
    pub new_duration: f64,
    pub duration_reduction: f64,
    pub percent_reduction: f64,
    #[serde(default)]
    pub comment: String,
}

impl FeedbackRecord {
    /// Build a record, computing the derived reduction fields.
    /// `percent_reduction` is 0 when the original duration is 0.
    pub fn new(
        call_id: CallId,
        context: String,
        recommendation: String,
        score: i64,
        original_duration: f64,
        new_duration: f64,
        comment: String,
    ) -> Self {
        let duration_reduction = original_duration - new_duration;
        let percent_reduction = if original_duration > 0.0 {
            round2(duration_reduction / original_duration * 100.0)
        } else {
            0.0
        };
        Self {
            call_id,
            context,
            recommendation,
            score,
            original_duration,
            new_duration,
            duration_reduction,
            percent_reduction,
            comment,
        }
    }
}

/// Summary statistics over the feedback history, with the worst and
/// best records surfaced for quick inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub total: usize,
    pub average_score: f64,
    pub avg_duration_reduction: f64,
    pub avg_percent_reduction: f64,
    /// Worst records by ascending score.
    pub low_quality: Vec<FeedbackRecord>,
    /// Best records by descending percent reduction.
    pub high_quality: Vec<FeedbackRecord>,
}

/// Summarize the full history. An empty history yields the all-zero
/// summary, never an error.
pub fn summarize(records: &[FeedbackRecord]) -> FeedbackSummary {
    if records.is_empty() {
        return FeedbackSummary::default();
    }

    let n = records.len() as f64;
    let avg_score = records.iter().map(|r| r.score as f64).sum::<f64>() / n;
    let avg_duration = records.iter().map(|r| r.duration_reduction).sum::<f64>() / n;
    let avg_percent = records.iter().map(|r| r.percent_reduction).sum::<f64>() / n;

    let mut by_score = records.to_vec();
    by_score.sort_by_key(|r| r.score);
    by_score.truncate(QUALITY_SAMPLE);

    let mut by_reduction = records.to_vec();
    by_reduction.sort_by(|a, b| {
        b.percent_reduction
            .partial_cmp(&a.percent_reduction)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    by_reduction.truncate(QUALITY_SAMPLE);

    FeedbackSummary {
        total: records.len(),
        average_score: round2(avg_score),
        avg_duration_reduction: round2(avg_duration),
        avg_percent_reduction: round2(avg_percent),
        low_quality: by_score,
        high_quality: by_reduction,
    }
}

/// Per-group effectiveness statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEffectiveness {
    pub count: usize,
    pub total_duration_reduction: f64,
    pub avg_duration_reduction: f64,
    pub avg_score: f64,
}

/// Overall and per-recommendation effectiveness over the full history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectivenessReport {
    pub total_records: usize,
    pub total_duration_reduction: f64,
    pub avg_duration_reduction: f64,
    pub by_recommendation: HashMap<String, RecommendationEffectiveness>,
}

/// Group the history by recommendation and compute per-group stats.
///
/// The group key is the first line of the recommendation text, trimmed
/// and truncated to 50 characters with a `...` marker when longer, so
/// minor phrasing tails don't split a group.
pub fn recommendation_effectiveness(records: &[FeedbackRecord]) -> EffectivenessReport {
    if records.is_empty() {
        return EffectivenessReport::default();
    }

    let total_original: f64 = records.iter().map(|r| r.original_duration).sum();
    let total_new: f64 = records.iter().map(|r| r.new_duration).sum();
    let total_reduction = total_original - total_new;

    let mut groups: HashMap<String, (usize, f64, i64)> = HashMap::new();
    for record in records {
        let key = group_key(&record.recommendation);
        let entry = groups.entry(key).or_insert((0, 0.0, 0));
        entry.0 += 1;
        entry.1 += record.duration_reduction;
        entry.2 += record.score;
    }

    let by_recommendation = groups
        .into_iter()
        .map(|(key, (count, total_red, score_sum))| {
            let n = count as f64;
            (
                key,
                RecommendationEffectiveness {
                    count,
                    total_duration_reduction: total_red,
                    avg_duration_reduction: total_red / n,
                    avg_score: score_sum as f64 / n,
                },
            )
        })
        .collect();

    EffectivenessReport {
        total_records: records.len(),
        total_duration_reduction: total_reduction,
        avg_duration_reduction: total_reduction / records.len() as f64,
        by_recommendation,
    }
}

/// One positive entry, in the shape the external retriever consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositiveContext {
    pub call_id: CallId,
    pub context: String,
    pub recommendation: String,
    pub percent_reduction: f64,
}

/// Feedback entries strong enough to feed back into the external
/// retrieval subsystem: score and percent reduction both at or above
/// the given floors.
pub fn positive_contexts(
    records: &[FeedbackRecord],
    min_score: i64,
    min_reduction: f64,
) -> Vec<PositiveContext> {
    records
        .iter()
        .filter(|r| r.score >= min_score && r.percent_reduction >= min_reduction)
        .map(|r| PositiveContext {
            call_id: r.call_id.clone(),
            context: r.context.clone(),
            recommendation: r.recommendation.clone(),
            percent_reduction: r.percent_reduction,
        })
        .collect()
}

fn group_key(recommendation: &str) -> String {
    let first_line = recommendation.lines().next().unwrap_or("").trim();
    if first_line.chars().count() > GROUP_KEY_MAX_CHARS {
        let truncated: String = first_line.chars().take(GROUP_KEY_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        first_line.to_string()
    }
}

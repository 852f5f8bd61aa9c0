//! Seam to the external recommendation subsystem.
//!
//! RULE: the analytics core never reaches into the retrieval/model
//! stack. It hands a plain-text query across this trait and passes the
//! returned text through unmodified. Keeping the collaborator behind a
//! trait object lets everything here run and test without the heavy
//! subsystem present.

use crate::error::MetricsResult;

/// Maps a query (call notes, a contact reason, or a synthesized prompt)
/// to recommendation text. Implemented outside this crate by the
/// retrieval-augmented subsystem; implemented here only by test doubles.
pub trait Recommender {
    fn recommend(&self, query: &str) -> MetricsResult<String>;
}

/// Fixed-text recommender for tests and offline runs.
pub struct CannedRecommender {
    text: String,
}

impl CannedRecommender {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

impl Recommender for CannedRecommender {
    fn recommend(&self, _query: &str) -> MetricsResult<String> {
        Ok(self.text.clone())
    }
}

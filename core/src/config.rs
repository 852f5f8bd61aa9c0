//! Analytics configuration.
//!
//! Defaults match the operational knobs the transport layer exposes.
//! A JSON config file can override any subset of fields; everything it
//! omits keeps its default.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Calls strictly longer than this are "long" (seconds).
    pub aht_threshold_secs: f64,
    /// Calls strictly shorter than this are "short" (seconds).
    pub short_call_threshold_secs: f64,
    /// How many contact reasons the frequency ranking returns.
    pub top_reasons: usize,
    /// Reason ranking depth used when profiling long calls.
    pub long_call_top_reasons: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            aht_threshold_secs: crate::aht::AHT_THRESHOLD_SECS,
            short_call_threshold_secs: crate::customer::SHORT_CALL_THRESHOLD_SECS,
            top_reasons: 5,
            long_call_top_reasons: 10,
        }
    }
}

impl AnalyticsConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }
}

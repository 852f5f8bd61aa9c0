//! Call record value types.
//!
//! RULE: Records are read-only after load. The only component that
//! produces modified copies is the improvement simulator, and it works
//! on clones — the loaded snapshot is never mutated.
//!
//! `call_id` is the only field the loader validates. Everything else is
//! optional at the type level; each consumer decides what a missing
//! value means (fail fast for computational fields, skip for per-pair
//! event fields).

use crate::error::{MetricsError, MetricsResult};
use crate::types::{CallId, CustomerId};
use serde::{Deserialize, Serialize};

/// One customer-service interaction, as read from the record source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub call_id: CallId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CallEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl CallRecord {
    /// Total call length in seconds. Missing durations are fatal for any
    /// computation that averages or filters on them.
    pub fn duration_secs(&self) -> MetricsResult<f64> {
        self.duration.ok_or_else(|| MetricsError::MissingField {
            call_id: self.call_id.clone(),
            field: "duration",
        })
    }

    /// Free-text contact reason.
    pub fn contact_reason(&self) -> MetricsResult<&str> {
        self.reason
            .as_deref()
            .ok_or_else(|| MetricsError::MissingField {
                call_id: self.call_id.clone(),
                field: "reason",
            })
    }

    /// The owning customer's id.
    pub fn customer_id(&self) -> MetricsResult<&str> {
        self.customer
            .as_ref()
            .map(|c| c.customer_id.as_str())
            .ok_or_else(|| MetricsError::MissingField {
                call_id: self.call_id.clone(),
                field: "customer.customer_id",
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRef {
    pub customer_id: CustomerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRef {
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// One lifecycle transition within a call (ringing, answered, ...).
///
/// Events are consumed in insertion order — occurrence order is defined
/// by the source, never reconstructed from the timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

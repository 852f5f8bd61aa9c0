use crate::types::{CallId, CustomerId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unrecognized timestamp format: {value:?}")]
    TimestampFormat { value: String },

    #[error("Call '{call_id}' is missing required field '{field}'")]
    MissingField {
        call_id: CallId,
        field: &'static str,
    },

    #[error("Call '{call_id}' not found")]
    CallNotFound { call_id: CallId },

    #[error("Customer '{customer_id}' not found")]
    CustomerNotFound { customer_id: CustomerId },

    #[error("Contact reason '{reason}' not found")]
    ReasonNotFound { reason: String },

    #[error("Feedback score must be between 1 and 5, got {score}")]
    InvalidScore { score: i64 },

    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

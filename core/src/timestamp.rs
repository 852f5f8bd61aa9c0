//! Timestamp normalization.
//!
//! The record source emits instants in one of two textual encodings,
//! both UTC-denoted: with fractional seconds (`2025-03-01T10:15:30.250Z`)
//! or without (`2025-03-01T10:15:30Z`). No timezone conversion happens
//! here — both forms are taken as already UTC.

use crate::error::{MetricsError, MetricsResult};
use chrono::{DateTime, NaiveDateTime, Utc};

const FRACTIONAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a source timestamp into a comparable UTC instant.
///
/// Tries the fractional-second encoding first, then falls back to the
/// second-precision one.
pub fn parse_timestamp(value: &str) -> MetricsResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, FRACTIONAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, SECONDS_FORMAT))
        .map(|naive| naive.and_utc())
        .map_err(|_| MetricsError::TimestampFormat {
            value: value.to_string(),
        })
}

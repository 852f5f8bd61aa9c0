//! Shared primitive types used across the analytics core.

/// A stable, unique identifier for one call record.
pub type CallId = String;

/// A stable, unique identifier for one customer.
pub type CustomerId = String;

/// Round to two decimal places — the reporting precision used by every
/// percentage and money figure in this crate.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Timestamp codec for store records.
//!
//! The metadata store keeps timestamps in a compact `YYYYMMDDhhmmss` form;
//! callers see `YYYY-MM-DD hh:mm:ss`.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Compact format used in store records (e.g. `20151010142000`).
pub const STORE_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format rendered to callers (e.g. `2015-10-10 14:20:00`).
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Invalid store timestamp '{value}': {reason}")]
    Invalid { value: String, reason: String },
}

/// Parse a compact store timestamp.
///
/// # Examples
/// ```
/// use gee_models::timestamp::{parse_store_timestamp, format_display_timestamp};
/// let ts = parse_store_timestamp("20151010142000").unwrap();
/// assert_eq!(format_display_timestamp(&ts), "2015-10-10 14:20:00");
/// ```
pub fn parse_store_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }
    // chrono accepts shorter digit runs; the store form is fixed-width
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::Invalid {
            value: value.to_string(),
            reason: "expected 14 digits (YYYYMMDDhhmmss)".to_string(),
        });
    }
    NaiveDateTime::parse_from_str(value, STORE_TIME_FORMAT).map_err(|e| TimestampError::Invalid {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Format a timestamp for storage.
pub fn format_store_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(STORE_TIME_FORMAT).to_string()
}

/// Format a timestamp for callers.
pub fn format_display_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Convert a compact store timestamp straight to its display form.
pub fn store_to_display(value: &str) -> Result<String, TimestampError> {
    parse_store_timestamp(value).map(|ts| format_display_timestamp(&ts))
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory timestamp parsing and notification-facing formatting.
//!
//! The directory emits ISO-8601 timestamps whose fractional-second part may
//! be abbreviated (`.5` instead of `.500000`); `%.f` parses those as if
//! zero-padded to the canonical microsecond width. Null or empty fields are
//! "absent", not parse errors — only a non-empty unparsable value is an
//! error, and that error is surfaced per record at the snapshot boundary.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// A non-empty timestamp field that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable timestamp {0:?}")]
pub struct TimestampError(pub String);

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a directory timestamp: RFC 3339 with offset, or a naive
/// date-time taken as UTC.
pub fn parse_directory_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(TimestampError(raw.to_string()))
}

/// Parse an optional timestamp field: `None` and empty strings are absent.
pub fn parse_optional_timestamp(
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, TimestampError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_directory_timestamp(s).map(Some),
    }
}

/// Short date for notification bodies, e.g. `02-Mar-26`.
pub fn short_date(dt: DateTime<Utc>) -> String {
    dt.format("%d-%b-%y").to_string()
}

/// Whole days of inactivity, rounded to nearest via total elapsed seconds.
pub fn inactivity_days(now: DateTime<Utc>, last_activity: DateTime<Utc>) -> i64 {
    let secs = (now - last_activity).num_seconds() as f64;
    (secs / 86_400.0).round() as i64
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;

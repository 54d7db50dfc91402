//! Timestamps as they appear in every response body

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as an ISO-8601 UTC string with a literal trailing `Z`,
/// e.g. `2026-10-18T12:00:00.123456Z`.
pub fn utc_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Format a UTC instant with microsecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

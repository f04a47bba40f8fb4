//! Shared utility functions

use chrono::{DateTime, SecondsFormat, Utc};

/// Parse a stored RFC3339 timestamp, falling back to the current time
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Format a timestamp for storage
///
/// Uses a fixed microsecond precision so stored values sort lexicographically
/// in chronological order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

//! Date formatting helpers shared by page scripts.
//!
//! Both helpers accept ISO-like timestamps and never fail: unparsable input
//! renders as [`INVALID_DATE`]. Timestamps carrying an offset are shown in UTC;
//! timestamps without one are shown as written.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Text produced for input that is not a date.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-like date or date-time string.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Long date, e.g. `January 15, 2024`.
pub fn format_date(input: &str) -> String {
    parse_timestamp(input).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%B %-d, %Y").to_string(),
    )
}

/// Long date with hour and minute, e.g. `January 15, 2024 at 09:05 AM`.
pub fn format_date_time(input: &str) -> String {
    parse_timestamp(input).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%B %-d, %Y at %I:%M %p").to_string(),
    )
}

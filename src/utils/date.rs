//! Timestamp helpers: the stored ISO-8601 form and the dashboard display form.

use chrono::{DateTime, NaiveDateTime, Utc};

const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_FORMAT: &str = "%d %B %Y - %I:%M %p UTC";

/// Render a receipt time the way records store it: second precision, trailing `Z`.
pub fn format_stored_timestamp(at: DateTime<Utc>) -> String {
    at.format(STORED_FORMAT).to_string()
}

/// Parse a stored timestamp. Accepts RFC 3339 with any offset, and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` values which are taken as UTC.
pub fn parse_stored_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// `"05 March 2026 - 02:07 PM UTC"`. Unparseable input is returned unchanged.
pub fn format_display_time(raw: &str) -> String {
    match parse_stored_timestamp(raw) {
        Some(at) => at.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

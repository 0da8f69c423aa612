use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Utility for parsing user-supplied calendar dates.
pub struct DateParser;

impl DateParser {
    /// Parse a calendar date.
    /// Supports `YYYY-MM-DD`, RFC3339/ISO-8601 timestamps (normalized to the UTC date)
    /// and the `DD-Mon-YYYY` form used by report filters.
    pub fn parse(input: &str) -> Option<NaiveDate> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(s, "%d-%b-%Y").ok()
    }

    /// Parse a date and fall back to `None` for anything that does not look like a date.
    /// Used when loading loosely typed records where text columns are legal.
    pub fn parse_strict_iso(input: &str) -> Option<NaiveDate> {
        let s = input.trim();
        if s.len() != 10 {
            return None;
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }
}

//! Date canonicalization for heterogeneous stored date representations.
//!
//! Dates arrive from the store in a small closed set of shapes: a timestamp
//! wrapper object, a `DD-MM-YYYY` string from the legacy ingest form, an ISO
//! string, or free text. Each recognized shape has exactly one conversion
//! rule; everything else passes through verbatim so that a bad date is still
//! visible on the page instead of silently blank.

use crate::models::DateField;
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the legacy ingest form's date format, e.g. `15-03-2024`.
///
/// The day-first interpretation is fixed, not auto-detected; records written
/// as `MM-DD-YYYY` will be swapped. That matches what the legacy form
/// produced and is deliberately left alone.
static DDMMYYYY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").unwrap());

/// Canonicalize a stored date for display.
///
/// - Absent or empty input yields `""`.
/// - A timestamp wrapper is converted to its UTC calendar date, `YYYY-MM-DD`.
/// - A `DD-MM-YYYY` string is rewritten to `YYYY-MM-DD`.
/// - Any other string passes through unchanged; [`humanize_date`] re-attempts
///   a generic parse at presentation time.
///
/// Never fails: unparseable input degrades to the raw string, not to an empty
/// or error value.
pub fn normalize_date(date: Option<&DateField>) -> String {
    match date {
        None => String::new(),
        Some(DateField::Timestamp(ts)) => DateTime::from_timestamp(ts.seconds, ts.nanoseconds)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            // Out-of-range epoch seconds are treated like an absent date.
            .unwrap_or_default(),
        Some(DateField::Text(s)) => {
            if s.is_empty() {
                return String::new();
            }
            match DDMMYYYY.captures(s) {
                Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
                None => s.clone(),
            }
        }
        Some(DateField::Other(value)) => {
            if value.is_null() {
                String::new()
            } else {
                value.to_string()
            }
        }
    }
}

/// Re-attempt a generic date parse at presentation time.
///
/// A canonical `YYYY-MM-DD` (or RFC 3339) value is rendered in a short human
/// format, e.g. `18 Sep 2025`; anything unparseable is returned verbatim, so
/// the raw string from [`normalize_date`]'s pass-through arm still reaches
/// the page.
pub fn humanize_date(value: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%d %b %Y").to_string();
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return date_time.format("%d %b %Y").to_string();
    }
    value.to_string()
}

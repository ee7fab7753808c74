//! Calendar date normalization.
//!
//! Dates arrive as plain `YYYY-MM-DD` strings from form inputs and as
//! `YYYY-MM-DD` or ISO-8601 strings from the external store. All of them are
//! reduced to a [`NaiveDate`]: the calendar day as written, anchored to local
//! wall-clock midnight, never shifted by reinterpreting the value in another
//! timezone.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Format of the normalized date used by form inputs and the wire payloads.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed display format: day, month, year, all zero-padded.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Strict plain-date pattern. Values matching it are built from their
/// components directly and never go through datetime parsing.
pub const PLAIN_DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

static PLAIN_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLAIN_DATE_PATTERN).expect("valid regex"));

/// Datetime layouts without an offset; the date part is taken as written.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts accepted besides the strict pattern. Slash dates
/// are day-first, the same order as [`DISPLAY_DATE_FORMAT`].
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A date value that could not be normalized.
///
/// Callers treat every variant as a validation failure; there is no
/// fallback to "today" or to an epoch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("date value is empty")]
    Empty,

    /// Matched `YYYY-MM-DD` but names a day that does not exist.
    #[error("'{0}' is not a valid calendar date")]
    OutOfRange(String),

    #[error("'{0}' is not a recognized date")]
    Unrecognized(String),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a date-like string into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(DateError::Empty);
    }
    if PLAIN_DATE_RE.is_match(value) {
        return from_components(value);
    }
    parse_fallback(value)
}

/// Build a date from the year/month/day digits of a strict `YYYY-MM-DD` value.
fn from_components(value: &str) -> Result<NaiveDate, DateError> {
    let out_of_range = || DateError::OutOfRange(value.to_string());

    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(out_of_range());
    };
    let year: i32 = year.parse().map_err(|_| out_of_range())?;
    let month: u32 = month.parse().map_err(|_| out_of_range())?;
    let day: u32 = day.parse().map_err(|_| out_of_range())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

fn parse_fallback(value: &str) -> Result<NaiveDate, DateError> {
    // Offset-carrying values keep the calendar day in their own offset.
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .ok_or_else(|| DateError::Unrecognized(value.to_string()))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a date as `DD/MM/YYYY`.
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_input(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// Parse and render for display in one step.
pub fn display_date(input: &str) -> Result<String, DateError> {
    parse_date(input).map(format_display)
}

/// Parse and render as `YYYY-MM-DD` for pre-filling form inputs.
pub fn normalize_date(input: &str) -> Result<String, DateError> {
    parse_date(input).map(format_input)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # Tenure Module
//!
//! Whole years elapsed since a reference date (hire date or role start).
//!
//! A year is 365.25 days. Arithmetic is integer-only on milliseconds, so the
//! result is exactly `floor((now - start) / 365.25 days)`, clamped at 0.
//!
//! Accepted date forms:
//! - RFC 3339 timestamps (`2015-01-01T09:30:00Z`, `2015-01-01T09:30:00+02:00`)
//! - Calendar dates (`2015-01-01`), read as midnight UTC
//! - Naive timestamps (`2015-01-01T09:30:00`, `2015-01-01 09:30:00`), read as UTC
//!
//! Anything else is unparsable and counts as 0 years. Slash-separated and
//! written-out forms (`2015/01/01`, `Jan 1, 2015`) are intentionally outside
//! the accepted set; the backend sends ISO dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Milliseconds in one tenure year (365.25 days).
pub const MS_PER_YEAR: i64 = 36_525 * MS_PER_DAY / 100;

/// Compute whole years between `date` and `now`.
///
/// Missing, empty and unparsable dates yield 0, as do dates in the future.
#[must_use]
pub fn compute_years(date: Option<&str>, now: DateTime<Utc>) -> u32 {
    let Some(start) = date.and_then(parse_reference_date) else {
        return 0;
    };
    let elapsed = now
        .timestamp_millis()
        .saturating_sub(start.timestamp_millis());
    if elapsed <= 0 {
        return 0;
    }
    u32::try_from(elapsed / MS_PER_YEAR).unwrap_or(u32::MAX)
}

/// Parse a reference date in any of the accepted forms.
#[must_use]
pub fn parse_reference_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

// =============================================================================
// TESTS
// =============================================================================

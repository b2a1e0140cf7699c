//! Calendar helpers: the J2000.0 epoch, date parsing, clamping, and display.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::SimError;

/// First year the clock will display.
pub const MIN_YEAR: i32 = 1600;
/// Last year the clock will display.
pub const MAX_YEAR: i32 = 2600;

/// 2000-01-01T12:00:00Z.
pub fn j2000() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn earliest() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(MIN_YEAR, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(j2000)
}

fn latest() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(MAX_YEAR, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or_else(j2000)
}

/// Parse RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC), or a bare `YYYY-MM-DD`
/// (taken as midnight UTC).
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, SimError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }
    Err(SimError::DateParse(input.to_string()))
}

/// Clamp `date` into `[MIN_YEAR, MAX_YEAR]`. The flag is true when the date
/// was moved.
pub fn clamp_date(date: DateTime<Utc>) -> (DateTime<Utc>, bool) {
    let clamped = date.clamp(earliest(), latest());
    (clamped, clamped != date)
}

/// Signed seconds from J2000.0 to `date`, with millisecond resolution.
pub fn seconds_since_j2000(date: DateTime<Utc>) -> f64 {
    (date - j2000()).num_milliseconds() as f64 / 1000.0
}

/// Bounds of the displayable range as J2000 offsets.
pub fn offset_range() -> (f64, f64) {
    (seconds_since_j2000(earliest()), seconds_since_j2000(latest()))
}

/// The date `seconds` after J2000.0, saturating at the displayable range.
pub fn date_from_j2000_seconds(seconds: f64) -> DateTime<Utc> {
    let (lo, hi) = offset_range();
    if seconds.is_nan() {
        return j2000();
    }
    let millis = (seconds.clamp(lo, hi) * 1000.0).round() as i64;
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| j2000().checked_add_signed(delta))
        .unwrap_or_else(j2000)
}

/// `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

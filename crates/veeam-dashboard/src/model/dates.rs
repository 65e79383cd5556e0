//! Lenient date and time-of-day parsing for API string fields.
//!
//! The reporting API stores dates as free text; depending on the ingestion
//! path they arrive as `2025-06-10`, `2025-06-10 22:00:05`, RFC 3339,
//! RFC 2822 (`Tue, 10 Jun 2025 00:00:00 GMT`) or `10/06/2025`.

use chrono::{DateTime, NaiveDate, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Extracts the calendar date from a date or date-time string.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }

    let head = raw.split(['T', ' ']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
}

/// Extracts the time of day from a time or date-time string.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.time());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.time());
    }

    let tail = raw.rsplit(['T', ' ']).next().unwrap_or(raw);
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(tail, fmt).ok())
}

/// Normalizes a date string to `YYYY-MM-DD`.
pub fn iso_date(raw: &str) -> Option<String> {
    parse_calendar_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Formats a date the way the dashboard shows it (`dd/mm/yyyy`).
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

//! Best-effort value coercion for imported cells.
//!
//! Neither function here fails. A cell that can't be understood becomes a
//! safe default (0 for numbers, today for dates).

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use tracing::trace;

/// Anything that can't be part of a signed decimal.
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.+\-]").expect("valid non-numeric pattern"));

/// The longest leading signed decimal.
static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("valid decimal pattern")
});

/// A bare `YYYY-MM-DD` literal.
static ISO_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date pattern"));

/// Date-only layouts tried in order. `%y` comes before `%Y` so that two-digit
/// years aren't read as first-century dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Date-time layouts tried after the date-only ones.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Coerce a cell to a decimal.
///
/// Every character that isn't a digit, sign or decimal point is removed,
/// then the longest leading decimal is parsed. `"1,234.5 hrs"` reads as
/// `1234.5`; `"n/a"` reads as `0`. Negative values pass through; the record
/// invariants deal with them.
#[must_use]
pub fn parse_number(cell: &str) -> f64 {
    let stripped = NON_NUMERIC.replace_all(cell, "");
    let value = DECIMAL_PREFIX
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    match value {
        Some(v) => v,
        None => {
            if !cell.trim().is_empty() {
                trace!("Unparseable number {:?}, using 0", cell);
            }
            0.0
        }
    }
}

/// Coerce a cell to a calendar date.
///
/// Tries the common logbook layouts first, then a strict `YYYY-MM-DD`
/// literal whose day is pulled back into the month (`2024-02-30` becomes
/// `2024-02-29`), and finally falls back to `today`.
#[must_use]
pub fn parse_date(cell: &str, today: NaiveDate) -> NaiveDate {
    let cell = cell.trim();
    if cell.is_empty() {
        return today;
    }

    if let Some(date) = parse_calendar_date(cell) {
        return date;
    }

    if let Some(date) = parse_iso_literal(cell) {
        return date;
    }

    trace!("Unparseable date {:?}, using {}", cell, today);
    today
}

fn parse_calendar_date(cell: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_iso_literal(cell: &str) -> Option<NaiveDate> {
    let caps = ISO_LITERAL.captures(cell)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day());

    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last_day))
}

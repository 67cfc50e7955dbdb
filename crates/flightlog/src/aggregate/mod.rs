//! Aggregation over flight records.
//!
//! Everything here is a pure function of a record slice and, where a time
//! window is involved, the current date. Nothing is cached; callers
//! recompute from the current records whenever they need a number.

pub mod currency;
pub mod milestones;

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use crate::record::{Field, FlightRecord};

pub use currency::{currency_checks, CurrencyCheck, CurrencyKind, CurrencyRules};
pub use milestones::{milestone_progress, MilestoneRow, Track, TrackProgress};

/// A trailing time window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// The last `n` calendar days.
    Days(u32),
    /// The last `n` calendar months.
    Months(u32),
}

impl Window {
    /// Earliest date inside the window.
    ///
    /// Month windows use calendar arithmetic; when the day doesn't exist in
    /// the target month it is pulled back to that month's last day.
    #[must_use]
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        let cutoff = match self {
            Self::Days(n) => today.checked_sub_days(Days::new(u64::from(n))),
            Self::Months(n) => today.checked_sub_months(Months::new(n)),
        };
        cutoff.unwrap_or(NaiveDate::MIN)
    }

    /// Whether a date falls on or after the cutoff.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.cutoff(today)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n} days"),
            Self::Months(n) => write!(f, "{n} months"),
        }
    }
}

/// Sum one field across all records.
#[must_use]
pub fn total_sum(records: &[FlightRecord], field: Field) -> f64 {
    records.iter().map(|r| field.value(r)).sum()
}

/// Sum one field across the records inside a window.
#[must_use]
pub fn windowed_sum(
    records: &[FlightRecord],
    window: Window,
    today: NaiveDate,
    field: Field,
) -> f64 {
    windowed_sum_by(records, window, today, |r| field.value(r))
}

/// Sum an arbitrary per-record value across the records inside a window.
#[must_use]
pub fn windowed_sum_by<F>(records: &[FlightRecord], window: Window, today: NaiveDate, value: F) -> f64
where
    F: Fn(&FlightRecord) -> f64,
{
    let cutoff = window.cutoff(today);
    records
        .iter()
        .filter(|r| r.date >= cutoff)
        .map(value)
        .sum()
}

/// Progress toward a target as a percentage in `[0, 100]`.
///
/// A target of zero or less yields 0 rather than dividing by zero.
#[must_use]
pub fn percent_of_target(have: f64, need: f64) -> f64 {
    if need > 0.0 && have.is_finite() {
        (have / need * 100.0).clamp(0.0, 100.0)
    } else if need > 0.0 && have == f64::INFINITY {
        100.0
    } else {
        0.0
    }
}

/// Round to one decimal place for display.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Running totals of every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Total time.
    pub total: f64,
    /// PIC time.
    pub pic: f64,
    /// Solo time.
    pub solo: f64,
    /// Dual received.
    pub dual: f64,
    /// Night time.
    pub night: f64,
    /// Cross-country time.
    pub xc: f64,
    /// Instrument time.
    pub ifr: f64,
    /// Approaches.
    pub approaches: u64,
    /// Landings.
    pub landings: u64,
    /// Night landings.
    pub night_landings: u64,
}

impl Totals {
    /// Sum every field across the records.
    #[must_use]
    pub fn from_records(records: &[FlightRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += r.total;
            acc.pic += r.pic;
            acc.solo += r.solo;
            acc.dual += r.dual;
            acc.night += r.night;
            acc.xc += r.xc;
            acc.ifr += r.ifr;
            acc.approaches += u64::from(r.approaches);
            acc.landings += u64::from(r.landings);
            acc.night_landings += u64::from(r.night_landings);
            acc
        })
    }

    /// Read one field's total as a decimal.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Total => self.total,
            Field::Pic => self.pic,
            Field::Solo => self.solo,
            Field::Dual => self.dual,
            Field::Night => self.night,
            Field::Xc => self.xc,
            Field::Ifr => self.ifr,
            Field::Approaches => self.approaches as f64,
            Field::Landings => self.landings as f64,
            Field::NightLandings => self.night_landings as f64,
        }
    }
}

/// One point on the cumulative-hours curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativePoint {
    /// Flight date.
    pub date: NaiveDate,
    /// Total hours flown up to and including this flight, one decimal.
    pub hours: f64,
}

/// Cumulative total time, oldest flight first.
///
/// Flights on the same date keep their relative order.
#[must_use]
pub fn cumulative_series(records: &[FlightRecord]) -> Vec<CumulativePoint> {
    let mut sorted: Vec<&FlightRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut running = 0.0;
    sorted
        .into_iter()
        .map(|r| {
            running += r.total;
            CumulativePoint {
                date: r.date,
                hours: round1(running),
            }
        })
        .collect()
}

/// Hours logged in one category over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHours {
    /// Category label.
    pub name: &'static str,
    /// Hours, one decimal.
    pub hours: f64,
}

/// Categories shown in a period breakdown, in display order.
const BREAKDOWN_FIELDS: [Field; 7] = [
    Field::Total,
    Field::Pic,
    Field::Dual,
    Field::Solo,
    Field::Night,
    Field::Xc,
    Field::Ifr,
];

/// Hours per category over a trailing window.
#[must_use]
pub fn period_breakdown(
    records: &[FlightRecord],
    window: Window,
    today: NaiveDate,
) -> Vec<CategoryHours> {
    BREAKDOWN_FIELDS
        .iter()
        .map(|&field| CategoryHours {
            name: field.label(),
            hours: round1(windowed_sum(records, window, today, field)),
        })
        .collect()
}

/// The most recent flights, newest first.
#[must_use]
pub fn recent(records: &[FlightRecord], limit: usize) -> Vec<&FlightRecord> {
    let mut sorted: Vec<&FlightRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

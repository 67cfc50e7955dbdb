//! Core logbook types.
//!
//! A [`FlightRecord`] is one logged flight leg or session. Records are created
//! by CSV import or manual entry and never edited in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged flight.
///
/// Hours are decimal; landings and approaches are counts. Field names
/// serialize in camelCase so values persisted by earlier versions of the
/// logbook still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Date of the flight.
    pub date: NaiveDate,
    /// Total flight time.
    #[serde(default)]
    pub total: f64,
    /// Pilot-in-command time.
    #[serde(default)]
    pub pic: f64,
    /// Solo time.
    #[serde(default)]
    pub solo: f64,
    /// Dual instruction received.
    #[serde(default)]
    pub dual: f64,
    /// Night time.
    #[serde(default)]
    pub night: f64,
    /// Cross-country time.
    #[serde(default)]
    pub xc: f64,
    /// Actual plus simulated instrument time.
    #[serde(default)]
    pub ifr: f64,
    /// Instrument approaches flown.
    #[serde(default)]
    pub approaches: u32,
    /// Landings, day and night.
    #[serde(default)]
    pub landings: u32,
    /// Night full-stop landings.
    #[serde(default)]
    pub night_landings: u32,
}

/// A numeric attribute of a [`FlightRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Total flight time.
    Total,
    /// Pilot-in-command time.
    Pic,
    /// Solo time.
    Solo,
    /// Dual instruction received.
    Dual,
    /// Night time.
    Night,
    /// Cross-country time.
    Xc,
    /// Instrument time.
    Ifr,
    /// Instrument approaches.
    Approaches,
    /// Landings.
    Landings,
    /// Night full-stop landings.
    NightLandings,
}

impl Field {
    /// Every numeric field, in export column order.
    pub const ALL: [Self; 10] = [
        Self::Total,
        Self::Pic,
        Self::Solo,
        Self::Dual,
        Self::Night,
        Self::Xc,
        Self::Ifr,
        Self::Approaches,
        Self::Landings,
        Self::NightLandings,
    ];

    /// Whether this field is a count rather than hours.
    #[must_use]
    pub fn is_count(self) -> bool {
        matches!(
            self,
            Self::Approaches | Self::Landings | Self::NightLandings
        )
    }

    /// Read this field from a record as a decimal.
    #[must_use]
    pub fn value(self, record: &FlightRecord) -> f64 {
        match self {
            Self::Total => record.total,
            Self::Pic => record.pic,
            Self::Solo => record.solo,
            Self::Dual => record.dual,
            Self::Night => record.night,
            Self::Xc => record.xc,
            Self::Ifr => record.ifr,
            Self::Approaches => f64::from(record.approaches),
            Self::Landings => f64::from(record.landings),
            Self::NightLandings => f64::from(record.night_landings),
        }
    }

    /// Short display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Pic => "PIC",
            Self::Solo => "Solo",
            Self::Dual => "Dual",
            Self::Night => "Night",
            Self::Xc => "XC",
            Self::Ifr => "IFR",
            Self::Approaches => "Approaches",
            Self::Landings => "Landings",
            Self::NightLandings => "NightLandings",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw numeric values for a record before the invariants are applied.
///
/// Values come straight from coercion and may be negative or non-finite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawValues {
    /// Values indexed by field discriminant, which follows [`Field::ALL`].
    pub values: [f64; 10],
}

impl RawValues {
    /// Set one field's raw value.
    pub fn set(&mut self, field: Field, value: f64) {
        self.values[field as usize] = value;
    }

    /// Get one field's raw value.
    #[must_use]
    pub fn get(&self, field: Field) -> f64 {
        self.values[field as usize]
    }
}

impl FlightRecord {
    /// Create an empty record for the given date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0.0,
            pic: 0.0,
            solo: 0.0,
            dual: 0.0,
            night: 0.0,
            xc: 0.0,
            ifr: 0.0,
            approaches: 0,
            landings: 0,
            night_landings: 0,
        }
    }

    /// Build a record from raw values, enforcing the record invariants.
    ///
    /// Negative and non-finite values become 0. Counts are rounded to the
    /// nearest whole number.
    #[must_use]
    pub fn sanitized(date: NaiveDate, raw: &RawValues) -> Self {
        Self {
            date,
            total: hours(raw.get(Field::Total)),
            pic: hours(raw.get(Field::Pic)),
            solo: hours(raw.get(Field::Solo)),
            dual: hours(raw.get(Field::Dual)),
            night: hours(raw.get(Field::Night)),
            xc: hours(raw.get(Field::Xc)),
            ifr: hours(raw.get(Field::Ifr)),
            approaches: count(raw.get(Field::Approaches)),
            landings: count(raw.get(Field::Landings)),
            night_landings: count(raw.get(Field::NightLandings)),
        }
    }

    /// Re-apply the invariants to a record that came from outside the mapper,
    /// such as a persisted slot.
    #[must_use]
    pub fn into_sanitized(self) -> Self {
        let mut raw = RawValues::default();
        for field in Field::ALL {
            raw.set(field, field.value(&self));
        }
        Self::sanitized(self.date, &raw)
    }

    /// Check whether every numeric field satisfies the invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|f| {
            let v = f.value(self);
            v.is_finite() && v >= 0.0
        })
    }

    /// Landings not logged as night landings.
    ///
    /// This is a proxy: landings that are neither day nor night full-stop
    /// are not tracked separately.
    #[must_use]
    pub fn day_landings(&self) -> u32 {
        self.landings.saturating_sub(self.night_landings)
    }
}

fn hours(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// The built-in sample logbook.
///
/// Eight early-training flights from the spring and summer of 2025.
#[must_use]
pub fn sample_records() -> Vec<FlightRecord> {
    #[allow(clippy::too_many_arguments)]
    fn flight(
        date: (i32, u32, u32),
        total: f64,
        pic: f64,
        solo: f64,
        dual: f64,
        night: f64,
        xc: f64,
        ifr: f64,
        counts: (u32, u32, u32),
    ) -> FlightRecord {
        FlightRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default(),
            total,
            pic,
            solo,
            dual,
            night,
            xc,
            ifr,
            approaches: counts.0,
            landings: counts.1,
            night_landings: counts.2,
        }
    }

    vec![
        flight((2025, 5, 1), 1.2, 0.0, 0.0, 1.2, 0.0, 0.0, 0.3, (0, 4, 0)),
        flight((2025, 5, 8), 1.0, 0.0, 0.0, 1.0, 0.0, 0.4, 0.5, (2, 3, 0)),
        flight((2025, 5, 14), 1.4, 0.0, 0.0, 1.4, 0.0, 0.6, 0.2, (0, 5, 0)),
        flight((2025, 6, 2), 1.5, 0.8, 0.8, 0.7, 0.5, 0.5, 0.2, (0, 3, 2)),
        flight((2025, 6, 10), 1.7, 0.9, 0.9, 0.8, 0.0, 0.9, 0.3, (0, 3, 0)),
        flight((2025, 7, 1), 1.8, 1.8, 1.0, 0.8, 0.8, 0.6, 0.1, (0, 4, 2)),
        flight((2025, 7, 22), 1.3, 1.3, 0.5, 0.8, 0.0, 0.4, 0.0, (0, 3, 0)),
        flight((2025, 8, 3), 1.6, 1.6, 0.9, 0.7, 0.2, 0.5, 0.1, (0, 3, 1)),
    ]
}

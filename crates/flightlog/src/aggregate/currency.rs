//! Advisory currency checks.
//!
//! Each check is a windowed sum compared with a fixed minimum. The results
//! are a planning aid and do not replace reading the regulations: day
//! landings are approximated as all landings minus night landings, and IFR
//! currency looks at approaches only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{windowed_sum, windowed_sum_by, Window};
use crate::record::{Field, FlightRecord};

/// Windows and minimums for the currency checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyRules {
    /// Trailing window for passenger-carrying landings, in days.
    pub passenger_window_days: u32,
    /// Landings needed inside the passenger window.
    pub min_landings: u32,
    /// Trailing window for instrument currency, in calendar months.
    pub ifr_window_months: u32,
    /// Approaches needed inside the instrument window.
    pub min_approaches: u32,
}

impl Default for CurrencyRules {
    fn default() -> Self {
        Self {
            passenger_window_days: 90,
            min_landings: 3,
            ifr_window_months: 6,
            min_approaches: 6,
        }
    }
}

impl CurrencyRules {
    /// The passenger-carrying window.
    #[must_use]
    pub fn passenger_window(&self) -> Window {
        Window::Days(self.passenger_window_days)
    }

    /// The instrument window.
    #[must_use]
    pub fn ifr_window(&self) -> Window {
        Window::Months(self.ifr_window_months)
    }
}

/// Which privilege a check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyKind {
    /// Carrying passengers by day.
    PassengerDay,
    /// Carrying passengers at night.
    PassengerNight,
    /// Flying under IFR.
    Ifr,
}

impl CurrencyKind {
    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::PassengerDay => "Passenger (day)",
            Self::PassengerNight => "Passenger (night)",
            Self::Ifr => "IFR",
        }
    }

    /// What the count measures.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::PassengerDay | Self::PassengerNight => "landings",
            Self::Ifr => "approaches",
        }
    }

    /// Caveat shown with the result.
    #[must_use]
    pub fn note(self) -> &'static str {
        match self {
            Self::PassengerDay => "Proxy: assumes non-night landings are day",
            Self::PassengerNight => "Full-stop night landings",
            Self::Ifr => "Approaches only; remember holding & tracking",
        }
    }
}

/// Outcome of one currency check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyCheck {
    /// The privilege checked.
    pub kind: CurrencyKind,
    /// The trailing window used.
    pub window: Window,
    /// Count inside the window.
    pub count: f64,
    /// Minimum count required.
    pub threshold: u32,
    /// Whether the minimum is met.
    pub current: bool,
}

impl CurrencyCheck {
    fn evaluate(kind: CurrencyKind, window: Window, count: f64, threshold: u32) -> Self {
        Self {
            kind,
            window,
            count,
            threshold,
            current: count >= f64::from(threshold),
        }
    }
}

/// Run every currency check.
#[must_use]
pub fn currency_checks(
    records: &[FlightRecord],
    rules: &CurrencyRules,
    today: NaiveDate,
) -> Vec<CurrencyCheck> {
    let passenger = rules.passenger_window();
    let ifr = rules.ifr_window();

    let day_landings = windowed_sum_by(records, passenger, today, |r| {
        f64::from(r.day_landings())
    });
    let night_landings = windowed_sum(records, passenger, today, Field::NightLandings);
    let approaches = windowed_sum(records, ifr, today, Field::Approaches);

    vec![
        CurrencyCheck::evaluate(
            CurrencyKind::PassengerDay,
            passenger,
            day_landings,
            rules.min_landings,
        ),
        CurrencyCheck::evaluate(
            CurrencyKind::PassengerNight,
            passenger,
            night_landings,
            rules.min_landings,
        ),
        CurrencyCheck::evaluate(CurrencyKind::Ifr, ifr, approaches, rules.min_approaches),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_records;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flight(d: NaiveDate, landings: u32, night_landings: u32, approaches: u32) -> FlightRecord {
        let mut r = FlightRecord::new(d);
        r.landings = landings;
        r.night_landings = night_landings;
        r.approaches = approaches;
        r
    }

    #[test]
    fn test_default_rules() {
        let rules = CurrencyRules::default();
        assert_eq!(rules.passenger_window(), Window::Days(90));
        assert_eq!(rules.ifr_window(), Window::Months(6));
        assert_eq!(rules.min_landings, 3);
        assert_eq!(rules.min_approaches, 6);
    }

    #[test]
    fn test_checks_on_sample() {
        let today = date(2025, 8, 10);
        let checks = currency_checks(&sample_records(), &CurrencyRules::default(), today);
        assert_eq!(checks.len(), 3);

        assert_eq!(checks[0].kind, CurrencyKind::PassengerDay);
        assert_eq!(checks[0].count, 16.0);
        assert!(checks[0].current);

        assert_eq!(checks[1].kind, CurrencyKind::PassengerNight);
        assert_eq!(checks[1].count, 5.0);
        assert!(checks[1].current);

        // Cutoff 2025-02-10; the only approaches are on 2025-05-08.
        assert_eq!(checks[2].kind, CurrencyKind::Ifr);
        assert_eq!(checks[2].count, 2.0);
        assert!(!checks[2].current);
    }

    #[test]
    fn test_everything_lapses() {
        let today = date(2026, 10, 16);
        let checks = currency_checks(&sample_records(), &CurrencyRules::default(), today);
        assert!(checks.iter().all(|c| !c.current));
        assert!(checks.iter().all(|c| c.count == 0.0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let today = date(2025, 1, 31);
        let records = vec![
            flight(date(2025, 1, 2), 3, 3, 0),
            flight(date(2024, 8, 1), 0, 0, 6),
        ];
        let checks = currency_checks(&records, &CurrencyRules::default(), today);
        // All three landings were at night.
        assert!(!checks[0].current);
        assert!(checks[1].current);
        // 2025-01-31 minus six months is 2024-07-31.
        assert!(checks[2].current);
    }

    #[test]
    fn test_ifr_window_is_calendar_months() {
        let today = date(2025, 8, 31);
        let records = vec![flight(date(2025, 2, 28), 0, 0, 6)];
        let checks = currency_checks(&records, &CurrencyRules::default(), today);
        assert!(checks[2].current);

        let records = vec![flight(date(2025, 2, 27), 0, 0, 6)];
        let checks = currency_checks(&records, &CurrencyRules::default(), today);
        assert!(!checks[2].current);
    }

    #[test]
    fn test_custom_rules() {
        let rules = CurrencyRules {
            passenger_window_days: 30,
            min_landings: 1,
            ..CurrencyRules::default()
        };
        let today = date(2025, 8, 10);
        let checks = currency_checks(&sample_records(), &rules, today);
        assert_eq!(checks[0].window, Window::Days(30));
        // 2025-07-22 (3) and 2025-08-03 (3 - 1)
        assert_eq!(checks[0].count, 5.0);
        assert_eq!(checks[1].count, 1.0);
    }

    #[test]
    fn test_kind_text() {
        assert_eq!(CurrencyKind::Ifr.unit(), "approaches");
        assert!(CurrencyKind::PassengerDay.note().contains("Proxy"));
    }
}

//! Progress toward certificate and rating minimums.
//!
//! The logbook does not record dual/solo/PIC splits of cross-country or
//! night time, so several rows compare the overall total against a narrower
//! requirement. Those rows carry a hint saying so.

use chrono::NaiveDate;
use serde::Serialize;

use super::{percent_of_target, windowed_sum, CurrencyRules, Totals};
use crate::record::{Field, FlightRecord};
use crate::targets::MilestoneTargets;

/// A certificate or rating track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Private pilot.
    Ppl,
    /// Instrument rating.
    Ir,
    /// Commercial single-engine land.
    Cpl,
}

impl Track {
    /// Every track, in display order.
    pub const ALL: [Self; 3] = [Self::Ppl, Self::Ir, Self::Cpl];

    /// Key used in target names.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Ppl => "ppl",
            Self::Ir => "ir",
            Self::Cpl => "cpl",
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Ppl => "PPL",
            Self::Ir => "Instrument",
            Self::Cpl => "Commercial SEL",
        }
    }
}

/// One requirement and how much of it is met.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneRow {
    /// Requirement label.
    pub label: &'static str,
    /// Amount logged.
    pub have: f64,
    /// Amount required.
    pub need: f64,
    /// `have` as a percentage of `need`, in `[0, 100]`.
    pub percent: f64,
    /// Caveat about how `have` was derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl MilestoneRow {
    fn new(label: &'static str, have: f64, need: f64) -> Self {
        Self {
            label,
            have,
            need,
            percent: percent_of_target(have, need),
            hint: None,
        }
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Whether the requirement is met.
    #[must_use]
    pub fn is_met(&self) -> bool {
        self.need > 0.0 && self.have >= self.need
    }
}

/// All rows for one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackProgress {
    /// The track.
    pub track: Track,
    /// Requirement rows, in display order.
    pub rows: Vec<MilestoneRow>,
}

impl TrackProgress {
    /// Number of rows already met.
    #[must_use]
    pub fn met(&self) -> usize {
        self.rows.iter().filter(|r| r.is_met()).count()
    }
}

const TOTAL_XC_AS_PIC_XC: &str = "Proxy: using total XC as PIC XC; verify in log";

/// Progress on every track.
///
/// Instrument approaches are counted over the IFR currency window; every
/// other row uses all-time totals.
#[must_use]
pub fn milestone_progress(
    records: &[FlightRecord],
    targets: &MilestoneTargets,
    rules: &CurrencyRules,
    today: NaiveDate,
) -> Vec<TrackProgress> {
    let totals = Totals::from_records(records);
    let recent_approaches = windowed_sum(records, rules.ifr_window(), today, Field::Approaches);

    Track::ALL
        .iter()
        .map(|&track| TrackProgress {
            track,
            rows: track_rows(track, &totals, recent_approaches, targets),
        })
        .collect()
}

fn track_rows(
    track: Track,
    totals: &Totals,
    recent_approaches: f64,
    targets: &MilestoneTargets,
) -> Vec<MilestoneRow> {
    let night_landings = totals.get(Field::NightLandings);
    match track {
        Track::Ppl => {
            let t = &targets.ppl;
            vec![
                MilestoneRow::new("Total time", totals.total, t.total),
                MilestoneRow::new("Dual received", totals.dual, t.dual),
                MilestoneRow::new("Solo", totals.solo, t.solo),
                MilestoneRow::new("XC (dual)", totals.xc, t.xc_dual)
                    .hint("Uses total XC; verify dual XC from log"),
                MilestoneRow::new("Night (dual)", totals.night, t.night_dual)
                    .hint("Uses total night; verify dual night from log"),
                MilestoneRow::new("Instrument (hood)", totals.ifr, t.instrument),
                MilestoneRow::new("Solo XC", totals.xc, t.solo_xc)
                    .hint("Uses total XC; verify solo XC from log"),
                MilestoneRow::new("Night full-stop landings", night_landings, t.night_landings),
            ]
        }
        Track::Ir => {
            let t = &targets.ir;
            vec![
                MilestoneRow::new("PIC cross-country", totals.xc, t.pic_xc)
                    .hint(TOTAL_XC_AS_PIC_XC),
                MilestoneRow::new("Instrument time", totals.ifr, t.instrument),
                MilestoneRow::new("Approaches (recent)", recent_approaches, t.approaches)
                    .hint("For currency; IR total may exceed the window"),
            ]
        }
        Track::Cpl => {
            let t = &targets.cpl;
            vec![
                MilestoneRow::new("Total time", totals.total, t.total),
                MilestoneRow::new("PIC", totals.pic, t.pic),
                MilestoneRow::new("PIC cross-country", totals.xc, t.pic_xc)
                    .hint(TOTAL_XC_AS_PIC_XC),
                MilestoneRow::new("Instrument time", totals.ifr, t.instrument),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_records;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn progress_on_sample(today: NaiveDate) -> Vec<TrackProgress> {
        milestone_progress(
            &sample_records(),
            &MilestoneTargets::default(),
            &CurrencyRules::default(),
            today,
        )
    }

    #[test]
    fn test_tracks_and_row_counts() {
        let progress = progress_on_sample(date(2025, 8, 10));
        let tracks: Vec<Track> = progress.iter().map(|p| p.track).collect();
        assert_eq!(tracks, Track::ALL.to_vec());
        assert_eq!(progress[0].rows.len(), 8);
        assert_eq!(progress[1].rows.len(), 3);
        assert_eq!(progress[2].rows.len(), 4);
    }

    #[test]
    fn test_ppl_rows() {
        let progress = progress_on_sample(date(2025, 8, 10));
        let ppl = &progress[0].rows;

        assert_eq!(ppl[0].label, "Total time");
        assert!((ppl[0].have - 11.5).abs() < 1e-9);
        assert_eq!(ppl[0].need, 40.0);
        assert!((ppl[0].percent - 28.75).abs() < 1e-9);
        assert!(ppl[0].hint.is_none());

        assert_eq!(ppl[3].label, "XC (dual)");
        assert!(ppl[3].hint.is_some());
        // 3.9 hours of XC against a target of 3.
        assert_eq!(ppl[3].percent, 100.0);
        assert!(ppl[3].is_met());

        assert_eq!(ppl[7].have, 5.0);
        assert_eq!(ppl[7].percent, 50.0);
    }

    #[test]
    fn test_ir_approaches_use_window() {
        let progress = progress_on_sample(date(2025, 8, 10));
        assert_eq!(progress[1].rows[2].have, 2.0);

        let later = progress_on_sample(date(2026, 10, 16));
        assert_eq!(later[1].rows[2].have, 0.0);
        // All-time rows don't change.
        assert_eq!(later[1].rows[1].have, progress[1].rows[1].have);
    }

    #[test]
    fn test_custom_targets() {
        let targets = MilestoneTargets::default()
            .with_value("cpl", "pic", 5.0)
            .unwrap();
        let progress = milestone_progress(
            &sample_records(),
            &targets,
            &CurrencyRules::default(),
            date(2025, 8, 10),
        );
        let pic = &progress[2].rows[1];
        assert_eq!(pic.need, 5.0);
        assert!(pic.is_met());
        assert_eq!(progress[2].met(), 1);
    }

    #[test]
    fn test_zero_target_is_zero_percent() {
        let targets = MilestoneTargets::default()
            .with_value("ppl", "solo", 0.0)
            .unwrap();
        let progress = milestone_progress(
            &sample_records(),
            &targets,
            &CurrencyRules::default(),
            date(2025, 8, 10),
        );
        let solo = &progress[0].rows[2];
        assert_eq!(solo.percent, 0.0);
        assert!(!solo.is_met());
    }

    #[test]
    fn test_empty_logbook() {
        let progress = milestone_progress(
            &[],
            &MilestoneTargets::default(),
            &CurrencyRules::default(),
            date(2025, 8, 10),
        );
        assert!(progress
            .iter()
            .flat_map(|p| &p.rows)
            .all(|r| r.have == 0.0 && r.percent == 0.0));
    }

    #[test]
    fn test_hint_omitted_from_json_when_absent() {
        let row = MilestoneRow::new("PIC", 1.0, 2.0);
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("hint"));
    }
}

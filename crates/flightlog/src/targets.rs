//! Milestone targets per certificate track.
//!
//! Targets are replaced as a whole; [`MilestoneTargets::with_value`] builds
//! the replacement for a single edited requirement.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimums for the private pilot certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivateTargets {
    /// Total time.
    pub total: f64,
    /// Dual instruction received.
    pub dual: f64,
    /// Solo time.
    pub solo: f64,
    /// Dual cross-country.
    pub xc_dual: f64,
    /// Dual night.
    pub night_dual: f64,
    /// Instrument (hood) time.
    pub instrument: f64,
    /// Solo cross-country.
    #[serde(rename = "soloXC")]
    pub solo_xc: f64,
    /// Night full-stop landings.
    pub night_landings: f64,
}

/// Minimums for the instrument rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstrumentTargets {
    /// PIC cross-country.
    #[serde(rename = "picXC")]
    pub pic_xc: f64,
    /// Instrument time.
    pub instrument: f64,
    /// Approaches in the recency window.
    pub approaches: f64,
}

/// Minimums for the commercial single-engine land certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommercialTargets {
    /// Total time.
    pub total: f64,
    /// Pilot-in-command time.
    pub pic: f64,
    /// PIC cross-country.
    #[serde(rename = "picXC")]
    pub pic_xc: f64,
    /// Instrument time.
    pub instrument: f64,
}

/// All milestone targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneTargets {
    /// Private pilot.
    pub ppl: PrivateTargets,
    /// Instrument rating.
    pub ir: InstrumentTargets,
    /// Commercial SEL.
    pub cpl: CommercialTargets,
}

impl Default for PrivateTargets {
    fn default() -> Self {
        Self {
            total: 40.0,
            dual: 20.0,
            solo: 10.0,
            xc_dual: 3.0,
            night_dual: 3.0,
            instrument: 3.0,
            solo_xc: 5.0,
            night_landings: 10.0,
        }
    }
}

impl Default for InstrumentTargets {
    fn default() -> Self {
        Self {
            pic_xc: 50.0,
            instrument: 40.0,
            approaches: 6.0,
        }
    }
}

impl Default for CommercialTargets {
    fn default() -> Self {
        Self {
            total: 250.0,
            pic: 100.0,
            pic_xc: 50.0,
            instrument: 10.0,
        }
    }
}

impl MilestoneTargets {
    /// Every `(track, requirement)` name accepted by [`Self::get`].
    pub const NAMES: &'static [(&'static str, &'static str)] = &[
        ("ppl", "total"),
        ("ppl", "dual"),
        ("ppl", "solo"),
        ("ppl", "xcDual"),
        ("ppl", "nightDual"),
        ("ppl", "instrument"),
        ("ppl", "soloXC"),
        ("ppl", "nightLandings"),
        ("ir", "picXC"),
        ("ir", "instrument"),
        ("ir", "approaches"),
        ("cpl", "total"),
        ("cpl", "pic"),
        ("cpl", "picXC"),
        ("cpl", "instrument"),
    ];

    /// Read a requirement by track and name. Names match case-insensitively.
    #[must_use]
    pub fn get(&self, track: &str, name: &str) -> Option<f64> {
        let (track, name) = (track.to_ascii_lowercase(), name.to_ascii_lowercase());
        let value = match (track.as_str(), name.as_str()) {
            ("ppl", "total") => self.ppl.total,
            ("ppl", "dual") => self.ppl.dual,
            ("ppl", "solo") => self.ppl.solo,
            ("ppl", "xcdual") => self.ppl.xc_dual,
            ("ppl", "nightdual") => self.ppl.night_dual,
            ("ppl", "instrument") => self.ppl.instrument,
            ("ppl", "soloxc") => self.ppl.solo_xc,
            ("ppl", "nightlandings") => self.ppl.night_landings,
            ("ir", "picxc") => self.ir.pic_xc,
            ("ir", "instrument") => self.ir.instrument,
            ("ir", "approaches") => self.ir.approaches,
            ("cpl", "total") => self.cpl.total,
            ("cpl", "pic") => self.cpl.pic,
            ("cpl", "picxc") => self.cpl.pic_xc,
            ("cpl", "instrument") => self.cpl.instrument,
            _ => return None,
        };
        Some(value)
    }

    /// Return a copy with one requirement replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTarget`] if the track or requirement is not
    /// recognized, and [`Error::InvalidTarget`] if `value` is negative or not
    /// finite. Stored targets are JSON, which has no NaN or infinity.
    pub fn with_value(&self, track: &str, name: &str, value: f64) -> Result<Self> {
        let mut next = self.clone();
        let slot = next
            .slot_mut(track, name)
            .ok_or_else(|| Error::unknown_target(track, name))?;
        check_value(track, name, value)?;
        *slot = value;
        Ok(next)
    }

    /// Check that every requirement is a finite number `>= 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] for the first requirement that isn't.
    pub fn validate(&self) -> Result<()> {
        for (track, name) in Self::NAMES {
            if let Some(value) = self.get(track, name) {
                check_value(track, name, value)?;
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, track: &str, name: &str) -> Option<&mut f64> {
        let (track, name) = (track.to_ascii_lowercase(), name.to_ascii_lowercase());
        match (track.as_str(), name.as_str()) {
            ("ppl", "total") => Some(&mut self.ppl.total),
            ("ppl", "dual") => Some(&mut self.ppl.dual),
            ("ppl", "solo") => Some(&mut self.ppl.solo),
            ("ppl", "xcdual") => Some(&mut self.ppl.xc_dual),
            ("ppl", "nightdual") => Some(&mut self.ppl.night_dual),
            ("ppl", "instrument") => Some(&mut self.ppl.instrument),
            ("ppl", "soloxc") => Some(&mut self.ppl.solo_xc),
            ("ppl", "nightlandings") => Some(&mut self.ppl.night_landings),
            ("ir", "picxc") => Some(&mut self.ir.pic_xc),
            ("ir", "instrument") => Some(&mut self.ir.instrument),
            ("ir", "approaches") => Some(&mut self.ir.approaches),
            ("cpl", "total") => Some(&mut self.cpl.total),
            ("cpl", "pic") => Some(&mut self.cpl.pic),
            ("cpl", "picxc") => Some(&mut self.cpl.pic_xc),
            ("cpl", "instrument") => Some(&mut self.cpl.instrument),
            _ => None,
        }
    }
}

fn check_value(track: &str, name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTarget {
            track: track.to_string(),
            name: name.to_string(),
            value,
        })
    }
}

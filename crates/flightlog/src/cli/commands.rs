//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::aggregate::Track;
use crate::error::{Error, Result};
use crate::export::DEFAULT_EXPORT_FILE;
use crate::record::FlightRecord;

/// Arguments shared by read-only reports.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// CSV file exported from an electronic logbook
    pub file: PathBuf,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write to a file instead of stdout (defaults to flightlog_export.csv)
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXPORT_FILE
    )]
    pub output: Option<PathBuf>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Flight date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Total time
    #[arg(long, default_value_t = 1.0)]
    pub total: f64,

    /// Pilot-in-command time
    #[arg(long, default_value_t = 0.0)]
    pub pic: f64,

    /// Solo time
    #[arg(long, default_value_t = 0.0)]
    pub solo: f64,

    /// Dual instruction received
    #[arg(long, default_value_t = 1.0)]
    pub dual: f64,

    /// Night time
    #[arg(long, default_value_t = 0.0)]
    pub night: f64,

    /// Cross-country time
    #[arg(long, default_value_t = 0.0)]
    pub xc: f64,

    /// Instrument time, actual or simulated
    #[arg(long, default_value_t = 0.0)]
    pub ifr: f64,

    /// Instrument approaches
    #[arg(long, default_value_t = 0)]
    pub approaches: u32,

    /// Landings, day and night
    #[arg(long, default_value_t = 1)]
    pub landings: u32,

    /// Night full-stop landings
    #[arg(long, default_value_t = 0)]
    pub night_landings: u32,
}

impl AddCommand {
    /// Build the record to append.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `--date` isn't a valid `YYYY-MM-DD`.
    pub fn to_record(&self, today: NaiveDate) -> Result<FlightRecord> {
        let date = match &self.date {
            Some(input) => NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
                Error::InvalidDate {
                    input: input.clone(),
                }
            })?,
            None => today,
        };

        let record = FlightRecord {
            date,
            total: self.total,
            pic: self.pic,
            solo: self.solo,
            dual: self.dual,
            night: self.night,
            xc: self.xc,
            ifr: self.ifr,
            approaches: self.approaches,
            landings: self.landings,
            night_landings: self.night_landings,
        };
        Ok(record.into_sanitized())
    }
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Milestones command arguments.
#[derive(Debug, Args)]
pub struct MilestonesCommand {
    /// Show only one track
    #[arg(short, long, value_enum)]
    pub track: Option<TrackArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Breakdown command arguments.
#[derive(Debug, Args)]
pub struct BreakdownCommand {
    /// Trailing window in days (defaults to the configured value)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Recent command arguments.
#[derive(Debug, Args)]
pub struct RecentCommand {
    /// Number of flights to show (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Milestone target commands.
#[derive(Debug, Subcommand)]
pub enum TargetsCommand {
    /// Show the current targets
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change one requirement, e.g. `targets set ppl total 45`
    Set {
        /// Track: ppl, ir or cpl
        track: String,
        /// Requirement name, e.g. soloXC
        name: String,
        /// Required amount
        value: f64,
    },

    /// Restore the default targets
    Reset,
}

/// Manual checklist commands.
#[derive(Debug, Subcommand)]
pub enum ChecksCommand {
    /// List checklist items and their state
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Mark an item done
    Set {
        /// Checklist item id
        id: String,

        /// Mark the item not done instead
        #[arg(long)]
        undo: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file in effect, honoring --config
    Path,

    /// Validate configuration, exiting non-zero if it is invalid
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Track argument for filtering milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrackArg {
    /// Private pilot
    Ppl,
    /// Instrument rating
    Ir,
    /// Commercial single-engine land
    Cpl,
}

impl From<TrackArg> for Track {
    fn from(arg: TrackArg) -> Self {
        match arg {
            TrackArg::Ppl => Self::Ppl,
            TrackArg::Ir => Self::Ir,
            TrackArg::Cpl => Self::Cpl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(date: Option<&str>) -> AddCommand {
        AddCommand {
            date: date.map(str::to_string),
            total: 1.0,
            pic: 0.0,
            solo: 0.0,
            dual: 1.0,
            night: 0.0,
            xc: 0.0,
            ifr: 0.0,
            approaches: 0,
            landings: 1,
            night_landings: 0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_track_arg_conversion() {
        assert_eq!(Track::from(TrackArg::Ppl), Track::Ppl);
        assert_eq!(Track::from(TrackArg::Ir), Track::Ir);
        assert_eq!(Track::from(TrackArg::Cpl), Track::Cpl);
    }

    #[test]
    fn test_add_defaults_to_today() {
        let record = add(None).to_record(today()).unwrap();
        assert_eq!(record.date, today());
        assert_eq!(record.total, 1.0);
        assert_eq!(record.dual, 1.0);
        assert_eq!(record.landings, 1);
    }

    #[test]
    fn test_add_with_date() {
        let record = add(Some("2025-06-02")).to_record(today()).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let err = add(Some("06/02/2025")).to_record(today()).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));

        let err = add(Some("2025-02-30")).to_record(today()).unwrap_err();
        assert!(err.to_string().contains("2025-02-30"));
    }

    #[test]
    fn test_add_clamps_negative_hours() {
        let mut cmd = add(None);
        cmd.total = -2.0;
        let record = cmd.to_record(today()).unwrap();
        assert_eq!(record.total, 0.0);
    }
}

//! Command-line interface for flightlog.
//!
//! This module provides the CLI structure for the `ftlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, BreakdownCommand, ChecksCommand, ClearCommand, ConfigCommand, ExportCommand,
    ImportCommand, MilestonesCommand, RecentCommand, ReportArgs, TargetsCommand, TrackArg,
};

/// ftlog - Flight training logbook companion
///
/// Import a CSV export from your electronic logbook, then track totals,
/// recency and progress toward certificate minimums. Results are advisory;
/// verify against the regulations.
#[derive(Debug, Parser)]
#[command(name = "ftlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show more diagnostics on stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show only errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the logbook with records from a CSV file
    Import(ImportCommand),

    /// Export the logbook as CSV
    Export(ExportCommand),

    /// Log a single flight
    Add(AddCommand),

    /// Delete every record
    Clear(ClearCommand),

    /// Replace the logbook with the built-in sample flights
    Sample,

    /// Show all-time totals
    Summary(ReportArgs),

    /// Show passenger and IFR currency
    Currency(ReportArgs),

    /// Show progress toward certificate minimums
    Milestones(MilestonesCommand),

    /// Show cumulative total time by flight date
    Cumulative(ReportArgs),

    /// Show hours per category over a trailing window
    Breakdown(BreakdownCommand),

    /// Show the most recent flights
    Recent(RecentCommand),

    /// View or change milestone targets
    #[command(subcommand)]
    Targets(TargetsCommand),

    /// View or tick off manual checklist items
    #[command(subcommand)]
    Checks(ChecksCommand),

    /// Show logbook and storage status
    Status(ReportArgs),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

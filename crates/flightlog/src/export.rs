//! CSV export.
//!
//! The export header uses names the importer recognizes, so an exported file
//! can be imported again without loss.

use std::io::Write;

use crate::error::Result;
use crate::record::{Field, FlightRecord};

/// Export column headers, in order.
pub const EXPORT_HEADER: [&str; 11] = [
    "Date",
    "Total",
    "PIC",
    "Solo",
    "Dual",
    "Night",
    "XC",
    "IFR",
    "Approaches",
    "Landings",
    "NightLandings",
];

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE: &str = "flightlog_export.csv";

/// Render records as CSV text.
///
/// Rows keep the order of `records`. Numbers are written in their shortest
/// exact decimal form, lines are joined with `\n`, and there is no trailing
/// line break.
#[must_use]
pub fn to_csv(records: &[FlightRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(EXPORT_HEADER.join(","));
    lines.extend(records.iter().map(record_line));
    lines.join("\n")
}

/// Write records as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(records: &[FlightRecord], mut writer: W) -> Result<()> {
    writer.write_all(to_csv(records).as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn record_line(record: &FlightRecord) -> String {
    let mut cells = Vec::with_capacity(EXPORT_HEADER.len());
    cells.push(record.date.format("%Y-%m-%d").to_string());
    // f64 Display drops a zero fraction, so counts print as integers.
    cells.extend(Field::ALL.iter().map(|f| f.value(record).to_string()));
    cells.join(",")
}

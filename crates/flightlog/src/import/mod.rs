//! CSV import for logbook exports.
//!
//! Import is a two-stage pipeline: [`parser::parse`] turns raw text into a
//! grid of fields, then [`mapper::map_rows`] matches the header against
//! [`columns::SYNONYMS`] and builds records. Cell-level problems never fail
//! an import; only an import that produces no records at all is rejected.

pub mod coerce;
pub mod columns;
pub mod mapper;
pub mod parser;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::FlightRecord;

pub use coerce::{parse_date, parse_number};
pub use mapper::{map_rows, HeaderMap};
pub use parser::parse;

/// Import a CSV logbook export.
///
/// `today` stands in for dates that can't be read.
///
/// # Errors
///
/// Returns [`Error::NoRowsParsed`] if the text has no data rows.
pub fn import_csv(text: &str, today: NaiveDate) -> Result<Vec<FlightRecord>> {
    let rows = parse(text);
    let records = map_rows(&rows, today);

    if records.is_empty() {
        warn!("CSV import produced no records ({} raw rows)", rows.len());
        return Err(Error::NoRowsParsed);
    }

    info!("Imported {} flight records", records.len());
    Ok(records)
}

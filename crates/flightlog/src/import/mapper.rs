//! Header-driven mapping from parsed rows to flight records.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::coerce::{parse_date, parse_number};
use super::columns::{normalize_header, Column, SYNONYMS};
use crate::record::{Field, FlightRecord, RawValues};

/// Column positions resolved from a header row.
///
/// Resolved once per import. A column that no header cell names stays
/// `None` and reads as absent for every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    date: Option<usize>,
    numeric: [Option<usize>; 10],
}

impl HeaderMap {
    /// Resolve each logical column to the first header cell that names it.
    #[must_use]
    pub fn resolve(header: &[String]) -> Self {
        let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
        let mut map = Self::default();

        for entry in SYNONYMS {
            let index = normalized.iter().position(|h| entry.accepts(h));
            match entry.column {
                Column::Date => map.date = index,
                Column::Numeric(field) => map.numeric[field as usize] = index,
            }
        }

        map
    }

    /// Position of a column in the header, if present.
    #[must_use]
    pub fn position(&self, column: Column) -> Option<usize> {
        match column {
            Column::Date => self.date,
            Column::Numeric(field) => self.numeric[field as usize],
        }
    }

    /// Columns that no header cell matched.
    #[must_use]
    pub fn missing(&self) -> Vec<Column> {
        std::iter::once(Column::Date)
            .chain(Field::ALL.into_iter().map(Column::Numeric))
            .filter(|c| self.position(*c).is_none())
            .collect()
    }

    /// Build a record from one data row.
    ///
    /// Cells past the end of a short row read as empty.
    #[must_use]
    pub fn record_from_row(&self, row: &[String], today: NaiveDate) -> FlightRecord {
        let date = parse_date(cell(row, self.date), today);
        let mut raw = RawValues::default();
        for field in Field::ALL {
            raw.set(field, parse_number(cell(row, self.numeric[field as usize])));
        }

        FlightRecord::sanitized(date, &raw)
    }
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).map_or("", String::as_str)
}

/// Map parsed rows to flight records. The first row is the header.
///
/// Returns one record per data row, in file order. An empty grid or a grid
/// with only a header yields no records.
#[must_use]
pub fn map_rows(rows: &[Vec<String>], today: NaiveDate) -> Vec<FlightRecord> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    let map = HeaderMap::resolve(header);
    let missing = map.missing();
    if !missing.is_empty() {
        info!(
            "{} logbook column(s) not found in header, importing as zero: {:?}",
            missing.len(),
            missing
        );
    }
    debug!("Resolved header columns: {:?}", map);

    data.iter()
        .map(|row| map.record_from_row(row, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parser::parse;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 16)
    }

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_resolve_synonyms_case_insensitive() {
        let map = HeaderMap::resolve(&header(&[" Flight Date ", "TOTAL TIME", "Cross Country"]));
        assert_eq!(map.position(Column::Date), Some(0));
        assert_eq!(map.position(Column::Numeric(Field::Total)), Some(1));
        assert_eq!(map.position(Column::Numeric(Field::Xc)), Some(2));
        assert_eq!(map.position(Column::Numeric(Field::Pic)), None);
    }

    #[test]
    fn test_resolve_takes_first_match() {
        let map = HeaderMap::resolve(&header(&["Duration", "Total"]));
        assert_eq!(map.position(Column::Numeric(Field::Total)), Some(0));
    }

    #[test]
    fn test_night_and_night_landings_distinct() {
        let map = HeaderMap::resolve(&header(&["Night Landings", "Night"]));
        assert_eq!(map.position(Column::Numeric(Field::NightLandings)), Some(0));
        assert_eq!(map.position(Column::Numeric(Field::Night)), Some(1));
    }

    #[test]
    fn test_missing_columns() {
        let map = HeaderMap::resolve(&header(&["Date", "Total"]));
        let missing = map.missing();
        assert!(!missing.contains(&Column::Date));
        assert!(!missing.contains(&Column::Numeric(Field::Total)));
        assert!(missing.contains(&Column::Numeric(Field::Pic)));
        assert_eq!(missing.len(), 9);
    }

    #[test]
    fn test_map_simple_csv() {
        let rows = parse("Date,Total Time,PIC Time\n2024-01-15,2.5,1.0");
        let records = map_rows(&rows, today());

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date, date(2024, 1, 15));
        assert_eq!(r.total, 2.5);
        assert_eq!(r.pic, 1.0);
        assert_eq!(r.solo, 0.0);
        assert_eq!(r.dual, 0.0);
        assert_eq!(r.night, 0.0);
        assert_eq!(r.xc, 0.0);
        assert_eq!(r.ifr, 0.0);
        assert_eq!(r.approaches, 0);
        assert_eq!(r.landings, 0);
        assert_eq!(r.night_landings, 0);
    }

    #[test]
    fn test_map_preserves_file_order() {
        let rows = parse("Date,Total\n2024-03-01,1\n2024-01-01,2\n2024-02-01,3");
        let records = map_rows(&rows, today());
        let totals: Vec<f64> = records.iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_map_missing_date_column_uses_today() {
        let rows = parse("Total\n1.5");
        let records = map_rows(&rows, today());
        assert_eq!(records[0].date, today());
        assert_eq!(records[0].total, 1.5);
    }

    #[test]
    fn test_map_short_row() {
        let rows = parse("Date,Total,Landings\n2024-01-15,1.2");
        let records = map_rows(&rows, today());
        assert_eq!(records[0].total, 1.2);
        assert_eq!(records[0].landings, 0);
    }

    #[test]
    fn test_map_negative_clamped() {
        let rows = parse("Date,Total,XC\n2024-01-15,-1.0,0.4");
        let records = map_rows(&rows, today());
        assert_eq!(records[0].total, 0.0);
        assert_eq!(records[0].xc, 0.4);
    }

    #[test]
    fn test_map_ignores_unknown_columns() {
        let rows = parse("Tail,Date,Remarks,Total\nN123,2024-01-15,\"pattern work, 3 T&G\",1.1");
        let records = map_rows(&rows, today());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total, 1.1);
    }

    #[test]
    fn test_map_empty_and_header_only() {
        assert!(map_rows(&[], today()).is_empty());
        let rows = parse("Date,Total\n");
        assert!(map_rows(&rows, today()).is_empty());
    }
}

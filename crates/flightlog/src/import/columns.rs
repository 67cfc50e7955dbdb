//! Header synonyms for logbook columns.
//!
//! Exports from different logbook programs name the same column differently.
//! This table lists, per logical field, every header we accept. Matching is
//! done on trimmed, lower-cased header text.

use crate::record::Field;

/// A logical column of a flight record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The flight date.
    Date,
    /// A numeric field.
    Numeric(Field),
}

/// A column together with the header names it accepts.
#[derive(Debug)]
pub struct ColumnSynonyms {
    /// The logical column.
    pub column: Column,
    /// Accepted header names, lower-case.
    pub headers: &'static [&'static str],
}

impl ColumnSynonyms {
    /// Check whether a normalized header names this column.
    #[must_use]
    pub fn accepts(&self, normalized_header: &str) -> bool {
        self.headers.contains(&normalized_header)
    }
}

/// The synonym table, one entry per logical column.
pub const SYNONYMS: &[ColumnSynonyms] = &[
    ColumnSynonyms {
        column: Column::Date,
        headers: &["date", "flight date"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Total),
        headers: &["total", "total time", "duration"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Pic),
        headers: &["pic", "pic time"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Solo),
        headers: &["solo", "solo time"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Dual),
        headers: &["dual", "dual received", "dual time"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Night),
        headers: &["night", "night time"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Xc),
        headers: &["xc", "cross-country", "cross country"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Ifr),
        headers: &["ifr", "instrument", "simulated+actual instrument"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Approaches),
        headers: &["approaches", "instrument approaches"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::Landings),
        headers: &["landings", "full-stop landings", "full stop landings"],
    },
    ColumnSynonyms {
        column: Column::Numeric(Field::NightLandings),
        headers: &[
            "night landings",
            "nightlandings",
            "night full-stop landings",
            "night full stop landings",
        ],
    },
];

/// Normalize a header cell for matching.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Find the synonyms entry for a column.
#[must_use]
pub fn synonyms_for(column: Column) -> Option<&'static ColumnSynonyms> {
    SYNONYMS.iter().find(|s| s.column == column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_synonyms() {
        assert!(synonyms_for(Column::Date).is_some());
        for field in Field::ALL {
            assert!(
                synonyms_for(Column::Numeric(field)).is_some(),
                "missing synonyms for {field}"
            );
        }
    }

    #[test]
    fn test_synonyms_are_normalized() {
        for entry in SYNONYMS {
            for header in entry.headers {
                assert_eq!(*header, normalize_header(header));
            }
        }
    }

    #[test]
    fn test_export_labels_are_accepted() {
        for field in Field::ALL {
            let entry = synonyms_for(Column::Numeric(field)).unwrap();
            assert!(
                entry.accepts(&normalize_header(field.label())),
                "export label {} not accepted",
                field.label()
            );
        }
        assert!(synonyms_for(Column::Date)
            .unwrap()
            .accepts(&normalize_header("Date")));
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Total Time "), "total time");
    }

    #[test]
    fn test_no_header_claimed_twice() {
        let mut seen = std::collections::HashSet::new();
        for entry in SYNONYMS {
            for header in entry.headers {
                assert!(seen.insert(*header), "duplicate header {header}");
            }
        }
    }
}

//! The logbook: persisted records, targets and checklist state.
//!
//! [`Logbook`] owns the [`Storage`] and an in-memory copy of each slot.
//! Every mutation writes the new value to storage first and only updates
//! memory once the write has succeeded, so a failed write leaves both sides
//! as they were.

use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::checks::ManualChecks;
use crate::error::Result;
use crate::import::import_csv;
use crate::record::{sample_records, FlightRecord};
use crate::storage::{Storage, CHECKS_SLOT, RECORDS_SLOT, TARGETS_SLOT};
use crate::targets::MilestoneTargets;

/// Options for [`Logbook::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Start from the sample logbook when no records have ever been stored.
    pub seed_sample_when_empty: bool,
}

/// The logbook and its backing store.
#[derive(Debug)]
pub struct Logbook {
    storage: Storage,
    records: Vec<FlightRecord>,
    targets: MilestoneTargets,
    checks: ManualChecks,
}

impl Logbook {
    /// Load every slot from storage.
    ///
    /// A slot that is missing or can't be decoded is replaced by its default
    /// and logged; it is never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database can't be read, or if the sample
    /// logbook is seeded and can't be written.
    pub fn load(storage: Storage, options: LoadOptions) -> Result<Self> {
        let stored_records: Option<Vec<FlightRecord>> = read_json(&storage, RECORDS_SLOT)?;
        let targets = read_json(&storage, TARGETS_SLOT)?.unwrap_or_default();
        let checks = read_json(&storage, CHECKS_SLOT)?.unwrap_or_default();

        let mut logbook = Self {
            storage,
            records: Vec::new(),
            targets,
            checks,
        };

        match stored_records {
            Some(records) => {
                logbook.records = records
                    .into_iter()
                    .map(FlightRecord::into_sanitized)
                    .collect();
            }
            None if options.seed_sample_when_empty => {
                info!("No stored records, seeding the sample logbook");
                logbook.load_sample()?;
            }
            None => {}
        }

        debug!(
            records = logbook.records.len(),
            checks_done = logbook.checks.completed(),
            "Loaded logbook"
        );
        Ok(logbook)
    }

    /// Open an in-memory logbook with default state.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database can't be created.
    pub fn in_memory() -> Result<Self> {
        Self::load(Storage::open_in_memory()?, LoadOptions::default())
    }

    /// The records, in stored order.
    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    /// The milestone targets.
    #[must_use]
    pub fn targets(&self) -> &MilestoneTargets {
        &self.targets
    }

    /// The manual checklist state.
    #[must_use]
    pub fn checks(&self) -> &ManualChecks {
        &self.checks
    }

    /// The backing store.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Replace every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the records can't be written.
    pub fn replace_records(&mut self, records: Vec<FlightRecord>) -> Result<()> {
        write_json(&self.storage, RECORDS_SLOT, &records)?;
        self.records = records;
        Ok(())
    }

    /// Add one record, keeping the list ordered by date.
    ///
    /// Records sharing a date keep their existing order and the new one goes
    /// last among them.
    ///
    /// # Errors
    ///
    /// Returns an error if the records can't be written.
    pub fn append_record(&mut self, record: FlightRecord) -> Result<()> {
        let mut next = self.records.clone();
        next.push(record.into_sanitized());
        next.sort_by_key(|r| r.date);
        self.replace_records(next)
    }

    /// Delete every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the records can't be written.
    pub fn clear_records(&mut self) -> Result<()> {
        self.replace_records(Vec::new())
    }

    /// Replace the records with the sample logbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the records can't be written.
    pub fn load_sample(&mut self) -> Result<()> {
        self.replace_records(sample_records())
    }

    /// Import CSV text, replacing every record on success.
    ///
    /// Returns the number of records imported. On failure the stored records
    /// are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoRowsParsed`] if nothing could be imported, or
    /// a storage error if the records can't be written.
    pub fn import_text(&mut self, text: &str, today: NaiveDate) -> Result<usize> {
        let records = import_csv(text, today)?;
        let count = records.len();
        self.replace_records(records)?;
        Ok(count)
    }

    /// Import a CSV file, replacing every record on success.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can't be read, otherwise as
    /// [`Self::import_text`].
    pub fn import_file(&mut self, path: impl AsRef<Path>, today: NaiveDate) -> Result<usize> {
        let path = path.as_ref();
        debug!("Importing {}", path.display());
        let text = std::fs::read_to_string(path)?;
        self.import_text(&text, today)
    }

    /// Replace the milestone targets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`](crate::Error::InvalidTarget) if a
    /// requirement is negative or not finite, or an error if the targets
    /// can't be written.
    pub fn set_targets(&mut self, targets: MilestoneTargets) -> Result<()> {
        targets.validate()?;
        write_json(&self.storage, TARGETS_SLOT, &targets)?;
        self.targets = targets;
        Ok(())
    }

    /// Restore the default milestone targets.
    ///
    /// # Errors
    ///
    /// Returns an error if the targets can't be written.
    pub fn reset_targets(&mut self) -> Result<()> {
        self.set_targets(MilestoneTargets::default())
    }

    /// Mark a checklist item done or not done.
    ///
    /// # Errors
    ///
    /// Returns an error if the checklist can't be written.
    pub fn set_check(&mut self, id: &str, done: bool) -> Result<()> {
        let next = self.checks.with(id, done);
        write_json(&self.storage, CHECKS_SLOT, &next)?;
        self.checks = next;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(storage: &Storage, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage.read_slot(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring unreadable slot {key}: {e}");
            Ok(None)
        }
    }
}

fn write_json<T: Serialize>(storage: &Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.write_slot(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 16)
    }

    fn flight(d: NaiveDate, total: f64) -> FlightRecord {
        let mut r = FlightRecord::new(d);
        r.total = total;
        r
    }

    fn seeded() -> LoadOptions {
        LoadOptions {
            seed_sample_when_empty: true,
        }
    }

    #[test]
    fn test_fresh_store_defaults() {
        let logbook = Logbook::in_memory().unwrap();
        assert!(logbook.records().is_empty());
        assert_eq!(logbook.targets(), &MilestoneTargets::default());
        assert_eq!(logbook.checks(), &ManualChecks::default());
    }

    #[test]
    fn test_seed_sample_when_empty() {
        let logbook = Logbook::load(Storage::open_in_memory().unwrap(), seeded()).unwrap();
        assert_eq!(logbook.records(), sample_records().as_slice());
        assert!(logbook.storage().read_slot(RECORDS_SLOT).unwrap().is_some());
    }

    #[test]
    fn test_seed_skipped_after_clear() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write_slot(RECORDS_SLOT, "[]").unwrap();
        let logbook = Logbook::load(storage, seeded()).unwrap();
        assert!(logbook.records().is_empty());
    }

    #[test]
    fn test_corrupt_slots_fall_back_to_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write_slot(RECORDS_SLOT, "not json").unwrap();
        storage.write_slot(TARGETS_SLOT, "[1, 2, 3]").unwrap();
        storage.write_slot(CHECKS_SLOT, r#"{"ir_prep":"yes"}"#).unwrap();

        let logbook = Logbook::load(storage, LoadOptions::default()).unwrap();
        assert!(logbook.records().is_empty());
        assert_eq!(logbook.targets(), &MilestoneTargets::default());
        assert_eq!(logbook.checks(), &ManualChecks::default());
    }

    #[test]
    fn test_stored_records_are_sanitized() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .write_slot(
                RECORDS_SLOT,
                r#"[{"date":"2025-06-02","total":-1.5,"pic":0.8,"landings":3}]"#,
            )
            .unwrap();

        let logbook = Logbook::load(storage, LoadOptions::default()).unwrap();
        assert_eq!(logbook.records().len(), 1);
        assert_eq!(logbook.records()[0].total, 0.0);
        assert_eq!(logbook.records()[0].pic, 0.8);
        assert_eq!(logbook.records()[0].landings, 3);
    }

    #[test]
    fn test_partial_targets_fill_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .write_slot(TARGETS_SLOT, r#"{"cpl":{"pic":120}}"#)
            .unwrap();

        let logbook = Logbook::load(storage, LoadOptions::default()).unwrap();
        assert_eq!(logbook.targets().cpl.pic, 120.0);
        assert_eq!(logbook.targets().cpl.total, 250.0);
        assert_eq!(logbook.targets().ppl.total, 40.0);
    }

    #[test]
    fn test_append_keeps_date_order() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.append_record(flight(date(2025, 6, 2), 1.0)).unwrap();
        logbook.append_record(flight(date(2025, 5, 1), 2.0)).unwrap();
        logbook.append_record(flight(date(2025, 6, 2), 3.0)).unwrap();

        let totals: Vec<f64> = logbook.records().iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_append_sanitizes() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.append_record(flight(today(), f64::NAN)).unwrap();
        assert_eq!(logbook.records()[0].total, 0.0);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.load_sample().unwrap();
        logbook.set_check("ir_prep", true).unwrap();
        logbook
            .set_targets(logbook.targets().with_value("ppl", "total", 45.0).unwrap())
            .unwrap();

        let stored: Vec<FlightRecord> =
            read_json(logbook.storage(), RECORDS_SLOT).unwrap().unwrap();
        assert_eq!(stored, sample_records());

        let checks: ManualChecks = read_json(logbook.storage(), CHECKS_SLOT).unwrap().unwrap();
        assert!(checks.is_done("ir_prep"));

        let targets: MilestoneTargets =
            read_json(logbook.storage(), TARGETS_SLOT).unwrap().unwrap();
        assert_eq!(targets.ppl.total, 45.0);
    }

    #[test]
    fn test_clear_and_reset() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.load_sample().unwrap();
        logbook
            .set_targets(logbook.targets().with_value("ir", "approaches", 8.0).unwrap())
            .unwrap();

        logbook.clear_records().unwrap();
        logbook.reset_targets().unwrap();
        assert!(logbook.records().is_empty());
        assert_eq!(logbook.targets(), &MilestoneTargets::default());
        assert_eq!(
            logbook.storage().read_slot(RECORDS_SLOT).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_invalid_targets_are_not_stored() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook
            .set_targets(logbook.targets().with_value("cpl", "pic", 120.0).unwrap())
            .unwrap();
        let stored = logbook.storage().read_slot(TARGETS_SLOT).unwrap();

        let mut bad = logbook.targets().clone();
        bad.ppl.total = f64::NAN;
        let err = logbook.set_targets(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));

        assert_eq!(logbook.targets().cpl.pic, 120.0);
        assert_eq!(logbook.storage().read_slot(TARGETS_SLOT).unwrap(), stored);
    }

    #[test]
    fn test_import_replaces_records() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.load_sample().unwrap();

        let count = logbook
            .import_text("Date,Total Time,PIC Time\n2024-01-15,2.5,1.0\n", today())
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(logbook.records().len(), 1);
        assert_eq!(logbook.records()[0].total, 2.5);
        assert_eq!(logbook.records()[0].pic, 1.0);
    }

    #[test]
    fn test_failed_import_leaves_records_untouched() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.load_sample().unwrap();

        let err = logbook.import_text("Date,Total\n", today()).unwrap_err();
        assert!(matches!(err, Error::NoRowsParsed));
        assert_eq!(logbook.records(), sample_records().as_slice());

        let stored: Vec<FlightRecord> =
            read_json(logbook.storage(), RECORDS_SLOT).unwrap().unwrap();
        assert_eq!(stored.len(), 8);
    }

    #[test]
    fn test_import_missing_file() {
        let mut logbook = Logbook::in_memory().unwrap();
        let path = std::env::temp_dir().join(format!(
            "flightlog_missing_{}.csv",
            std::process::id()
        ));
        let err = logbook.import_file(&path, today()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let mut logbook = Logbook::in_memory().unwrap();
        logbook.load_sample().unwrap();
        logbook.storage().break_slots_table();

        assert!(logbook.clear_records().is_err());
        assert_eq!(logbook.records().len(), 8);

        assert!(logbook.set_check("ir_prep", true).is_err());
        assert!(!logbook.checks().is_done("ir_prep"));

        let targets = logbook.targets().with_value("cpl", "pic", 1.0).unwrap();
        assert!(logbook.set_targets(targets).is_err());
        assert_eq!(logbook.targets().cpl.pic, 100.0);
    }
}

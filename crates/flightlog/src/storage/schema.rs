//! `SQLite` schema definitions for the logbook store.
//!
//! The store is a small key-value table. Each slot holds one JSON document:
//! the record list, the milestone targets or the manual checklist.

/// SQL statement to create the slots table.
pub const CREATE_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_SLOTS_TABLE, CREATE_METADATA_TABLE];

/// Slot holding the flight records as a JSON array.
pub const RECORDS_SLOT: &str = "ftl_log_entries_v1";

/// Slot holding the milestone targets as a JSON object.
pub const TARGETS_SLOT: &str = "ftl_targets_v1";

/// Slot holding the manual checklist as a JSON object of id to bool.
pub const CHECKS_SLOT: &str = "ftl_manual_checks_v1";

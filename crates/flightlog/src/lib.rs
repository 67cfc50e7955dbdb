//! `flightlog` - A flight-training logbook companion
//!
//! This library imports CSV logbook exports, keeps the records in a local
//! `SQLite` store, and computes totals, currency and progress toward
//! certificate minimums from them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod logbook;
pub mod logging;
pub mod record;
pub mod storage;
pub mod targets;

pub use aggregate::{CurrencyRules, Totals, Window};
pub use checks::{ManualChecks, CHECKLIST};
pub use config::Config;
pub use error::{Error, Result};
pub use export::to_csv;
pub use import::import_csv;
pub use logbook::{LoadOptions, Logbook};
pub use logging::init_logging;
pub use record::{Field, FlightRecord};
pub use storage::{Storage, StorageStats};
pub use targets::MilestoneTargets;

//! Error types for flightlog.
//!
//! Most problems in a logbook import degrade to a default value instead of
//! failing (see [`crate::import`]); the variants here cover what is left:
//! storage, configuration, rejected imports and bad command input.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Import Errors ===
    /// No flight records survived CSV mapping.
    #[error("no rows parsed, check your CSV headers")]
    NoRowsParsed,

    // === Input Errors ===
    /// A milestone track or requirement name was not recognized.
    #[error("unknown milestone target '{track}.{name}'")]
    UnknownTarget {
        /// Track name as given.
        track: String,
        /// Requirement name as given.
        name: String,
    },

    /// A milestone target value was negative or not a finite number.
    #[error("invalid value {value} for milestone target '{track}.{name}', expected a number >= 0")]
    InvalidTarget {
        /// Track name as given.
        track: String,
        /// Requirement name as given.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A date given on the command line could not be interpreted.
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown-target error.
    #[must_use]
    pub fn unknown_target(track: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownTarget {
            track: track.into(),
            name: name.into(),
        }
    }
}

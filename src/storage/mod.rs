//! Storage module for persisting airport records
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - Insert-or-report-conflict keyed by the FAA code

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::AirportStore;

use thiserror::Error;

/// One extracted airport record
///
/// The FAA code is the uniqueness key; it should be absent only when the
/// directory genuinely has no FAA entry for the airport. Records are created
/// transiently during scraping, persisted immediately, and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// FAA airport code, at most 4 characters (primary key)
    pub faa: Option<String>,
    /// IATA airport code, at most 3 characters
    pub iata: Option<String>,
    /// ICAO airport code, at most 4 characters
    pub icao: Option<String>,
    pub name: String,
    pub city: Option<String>,
    /// Two-letter state code; absent for non-US airports
    pub state: Option<String>,
    pub country: String,
    /// Latitude in signed degrees
    pub latitude: f64,
    /// Longitude in signed degrees
    pub longitude: f64,
    /// Elevation in feet; 0 when the directory did not provide one
    pub elevation: i32,
}

/// Outcome of an insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored
    Inserted,
    /// A record with the same FAA code already exists; nothing was written
    Conflict { faa: Option<String> },
}

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

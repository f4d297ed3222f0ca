//! Database schema definitions
//!
//! This module contains the SQL schema for the aerodex database.

use rusqlite::Connection;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Extracted airport records, keyed by FAA code
CREATE TABLE IF NOT EXISTS airports (
    faa TEXT PRIMARY KEY,
    iata TEXT,
    icao TEXT,
    name TEXT NOT NULL,
    city TEXT,
    state TEXT,
    country TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    elevation INTEGER NOT NULL DEFAULT 0,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_airports_iata ON airports(iata);
CREATE INDEX IF NOT EXISTS idx_airports_icao ON airports(icao);
CREATE INDEX IF NOT EXISTS idx_airports_country ON airports(country);
"#;

/// Initializes the database schema
///
/// Safe to call on an existing database; all statements are `IF NOT EXISTS`.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}

//! SQLite storage implementation

use crate::storage::schema::initialize_schema;
use crate::storage::{Airport, InsertOutcome, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;

/// SQLite-backed airport store
pub struct AirportStore {
    conn: Connection,
}

impl AirportStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts one airport record
    ///
    /// A record whose FAA code is already present is reported as a
    /// [`InsertOutcome::Conflict`]; the existing row is never overwritten.
    pub fn insert(&mut self, airport: &Airport) -> StorageResult<InsertOutcome> {
        let now = Utc::now().to_rfc3339();
        let result = self.conn.execute(
            "INSERT INTO airports
             (faa, iata, icao, name, city, state, country, latitude, longitude, elevation, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                airport.faa,
                airport.iata,
                airport.icao,
                airport.name,
                airport.city,
                airport.state,
                airport.country,
                airport.latitude,
                airport.longitude,
                airport.elevation,
                now,
            ],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(InsertOutcome::Conflict {
                    faa: airport.faa.clone(),
                })
            }
            Err(e) => Err(StorageError::Sqlite(e)),
        }
    }

    /// Looks up an airport by FAA code
    pub fn get_by_faa(&self, faa: &str) -> StorageResult<Option<Airport>> {
        let mut stmt = self.conn.prepare(
            "SELECT faa, iata, icao, name, city, state, country, latitude, longitude, elevation
             FROM airports WHERE faa = ?1",
        )?;

        let airport = stmt
            .query_row(params![faa], |row| {
                Ok(Airport {
                    faa: row.get(0)?,
                    iata: row.get(1)?,
                    icao: row.get(2)?,
                    name: row.get(3)?,
                    city: row.get(4)?,
                    state: row.get(5)?,
                    country: row.get(6)?,
                    latitude: row.get(7)?,
                    longitude: row.get(8)?,
                    elevation: row.get(9)?,
                })
            })
            .optional()?;

        Ok(airport)
    }

    /// Number of stored airport records
    pub fn count(&self) -> StorageResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM airports", [], |row| row.get(0))?;
        Ok(count)
    }
}

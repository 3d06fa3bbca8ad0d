//! SQLite backend (feature `sqlite`).
//!
//! Creates a single `satwatch.db` file in the configured directory with two
//! tables: `iss_locations` and `my_sightings`.

use std::path::Path;

use rusqlite::{Connection, Row, params};
use sw_core::{RecordId, Timestamp};

use crate::store::RecordStore;
use crate::{PositionRecord, SightingRecord, StoreError, StoreResult};

pub const DATABASE_FILE: &str = "satwatch.db";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS iss_locations (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp        INTEGER NOT NULL,
        latitude         REAL    NOT NULL,
        longitude        REAL    NOT NULL,
        altitude         REAL    NOT NULL,
        footprint_radius REAL    NOT NULL
    );
    CREATE TABLE IF NOT EXISTS my_sightings (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp      INTEGER NOT NULL,
        iss_latitude   REAL    NOT NULL,
        iss_longitude  REAL    NOT NULL,
        user_latitude  REAL    NOT NULL,
        user_longitude REAL    NOT NULL,
        distance       REAL    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS iss_locations_ts ON iss_locations (timestamp);
    CREATE INDEX IF NOT EXISTS my_sightings_ts  ON my_sightings (timestamp);";

/// Stores records in an SQLite database.
pub struct SqliteStore {
    conn:     Connection,
    finished: bool,
}

impl SqliteStore {
    /// Open (or create) `satwatch.db` in `dir` and initialise the schema.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join(DATABASE_FILE))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::with_connection(conn)
    }

    /// A throwaway database that lives only as long as the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, finished: false })
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.finished { Err(StoreError::Finished) } else { Ok(()) }
    }
}

impl RecordStore for SqliteStore {
    fn insert_position(&mut self, record: &PositionRecord) -> StoreResult<RecordId> {
        self.check_open()?;
        self.conn.execute(
            "INSERT INTO iss_locations \
             (timestamp, latitude, longitude, altitude, footprint_radius) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.timestamp.unix_secs(),
                record.latitude,
                record.longitude,
                record.altitude_km,
                record.footprint_radius_km,
            ],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid() as u64))
    }

    fn insert_sighting(&mut self, record: &SightingRecord) -> StoreResult<RecordId> {
        self.check_open()?;
        self.conn.execute(
            "INSERT INTO my_sightings \
             (timestamp, iss_latitude, iss_longitude, user_latitude, user_longitude, distance) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.timestamp.unix_secs(),
                record.iss_latitude,
                record.iss_longitude,
                record.user_latitude,
                record.user_longitude,
                record.distance_km,
            ],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid() as u64))
    }

    fn recent_positions(&self, limit: usize) -> StoreResult<Vec<PositionRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT timestamp, latitude, longitude, altitude, footprint_radius \
             FROM iss_locations ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], position_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn recent_sightings(&self, limit: usize) -> StoreResult<Vec<SightingRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT timestamp, iss_latitude, iss_longitude, user_latitude, user_longitude, distance \
             FROM my_sightings ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], sighting_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn finish(&mut self) -> StoreResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

fn position_row(row: &Row<'_>) -> rusqlite::Result<PositionRecord> {
    Ok(PositionRecord {
        timestamp:           Timestamp(row.get(0)?),
        latitude:            row.get(1)?,
        longitude:           row.get(2)?,
        altitude_km:         row.get(3)?,
        footprint_radius_km: row.get(4)?,
    })
}

fn sighting_row(row: &Row<'_>) -> rusqlite::Result<SightingRecord> {
    Ok(SightingRecord {
        timestamp:      Timestamp(row.get(0)?),
        iss_latitude:   row.get(1)?,
        iss_longitude:  row.get(2)?,
        user_latitude:  row.get(3)?,
        user_longitude: row.get(4)?,
        distance_km:    row.get(5)?,
    })
}

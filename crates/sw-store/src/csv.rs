//! CSV backend.
//!
//! Keeps two files in the configured directory:
//! - `iss_locations.csv`
//! - `my_sightings.csv`
//!
//! Existing files are checked on open and appended to afterwards, so a
//! restarted tracker keeps its history.  Only row counts stay in memory;
//! `recent_*` reads the file again on every call.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use ::csv::{Reader, StringRecord, Writer, WriterBuilder};
use sw_core::{RecordId, Timestamp};

use crate::record::newest_first;
use crate::store::RecordStore;
use crate::{PositionRecord, SightingRecord, StoreError, StoreResult};

pub const POSITIONS_FILE: &str = "iss_locations.csv";
pub const SIGHTINGS_FILE: &str = "my_sightings.csv";

pub const POSITION_HEADERS: [&str; 5] =
    ["Timestamp", "Latitude", "Longitude", "Altitude", "Footprint_Radius"];

pub const SIGHTING_HEADERS: [&str; 6] = [
    "Timestamp",
    "ISS_Latitude",
    "ISS_Longitude",
    "User_Latitude",
    "User_Longitude",
    "Distance",
];

/// Appends records to two CSV files.
pub struct CsvStore {
    positions:      Writer<File>,
    sightings:      Writer<File>,
    positions_path: PathBuf,
    sightings_path: PathBuf,
    position_count: usize,
    sighting_count: usize,
    finished:       bool,
}

impl CsvStore {
    /// Open (or create) both files in `dir`, checking any rows already there.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;

        let positions_path = dir.join(POSITIONS_FILE);
        let sightings_path = dir.join(SIGHTINGS_FILE);
        let position_count = load(&positions_path, parse_position)?.len();
        let sighting_count = load(&sightings_path, parse_sighting)?.len();

        Ok(Self {
            positions: open_append(&positions_path, &POSITION_HEADERS)?,
            sightings: open_append(&sightings_path, &SIGHTING_HEADERS)?,
            positions_path,
            sightings_path,
            position_count,
            sighting_count,
            finished: false,
        })
    }

    /// Rows in the positions file, including those from earlier runs.
    pub fn position_count(&self) -> usize {
        self.position_count
    }

    pub fn sighting_count(&self) -> usize {
        self.sighting_count
    }
}

impl RecordStore for CsvStore {
    fn insert_position(&mut self, record: &PositionRecord) -> StoreResult<RecordId> {
        if self.finished {
            return Err(StoreError::Finished);
        }
        self.positions.write_record(&[
            record.timestamp.to_rfc3339(),
            record.latitude.to_string(),
            record.longitude.to_string(),
            record.altitude_km.to_string(),
            record.footprint_radius_km.to_string(),
        ])?;
        self.positions.flush()?;
        self.position_count += 1;
        Ok(RecordId(self.position_count as u64 - 1))
    }

    fn insert_sighting(&mut self, record: &SightingRecord) -> StoreResult<RecordId> {
        if self.finished {
            return Err(StoreError::Finished);
        }
        self.sightings.write_record(&[
            record.timestamp.to_rfc3339(),
            record.iss_latitude.to_string(),
            record.iss_longitude.to_string(),
            record.user_latitude.to_string(),
            record.user_longitude.to_string(),
            record.distance_km.to_string(),
        ])?;
        self.sightings.flush()?;
        self.sighting_count += 1;
        Ok(RecordId(self.sighting_count as u64 - 1))
    }

    fn recent_positions(&self, limit: usize) -> StoreResult<Vec<PositionRecord>> {
        let rows = load(&self.positions_path, parse_position)?;
        Ok(newest_first(&rows, |r| r.timestamp, limit))
    }

    fn recent_sightings(&self, limit: usize) -> StoreResult<Vec<SightingRecord>> {
        let rows = load(&self.sightings_path, parse_sighting)?;
        Ok(newest_first(&rows, |r| r.timestamp, limit))
    }

    fn finish(&mut self) -> StoreResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.sightings.flush()?;
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Open `path` for appending, writing `headers` first if the file is new or empty.
fn open_append(path: &Path, headers: &[&str]) -> StoreResult<Writer<File>> {
    let is_new = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if is_new {
        writer.write_record(headers)?;
        writer.flush()?;
    }
    Ok(writer)
}

fn load<T>(path: &Path, parse: fn(&StringRecord) -> StoreResult<T>) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = Reader::from_path(path)?;
    let mut out = Vec::new();
    for row in reader.records() {
        out.push(parse(&row?)?);
    }
    Ok(out)
}

fn parse_position(row: &StringRecord) -> StoreResult<PositionRecord> {
    Ok(PositionRecord {
        timestamp:           Timestamp::parse(field(row, 0)?)?,
        latitude:            number(row, 1)?,
        longitude:           number(row, 2)?,
        altitude_km:         number(row, 3)?,
        footprint_radius_km: number(row, 4)?,
    })
}

fn parse_sighting(row: &StringRecord) -> StoreResult<SightingRecord> {
    Ok(SightingRecord {
        timestamp:      Timestamp::parse(field(row, 0)?)?,
        iss_latitude:   number(row, 1)?,
        iss_longitude:  number(row, 2)?,
        user_latitude:  number(row, 3)?,
        user_longitude: number(row, 4)?,
        distance_km:    number(row, 5)?,
    })
}

fn field(row: &StringRecord, i: usize) -> StoreResult<&str> {
    row.get(i).ok_or_else(|| malformed(row, format!("missing column {i}")))
}

fn number(row: &StringRecord, i: usize) -> StoreResult<f64> {
    let raw = field(row, i)?;
    raw.trim()
        .parse()
        .map_err(|_| malformed(row, format!("column {i}: {raw:?} is not a number")))
}

fn malformed(row: &StringRecord, reason: String) -> StoreError {
    let line = row.position().map_or(0, |p| p.line());
    StoreError::Malformed(format!("line {line}: {reason}"))
}

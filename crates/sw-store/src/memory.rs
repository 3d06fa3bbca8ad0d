//! In-memory backend.

use sw_core::RecordId;

use crate::record::newest_first;
use crate::{PositionRecord, RecordStore, SightingRecord, StoreResult};

/// Keeps every record in a `Vec`.  Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    positions: Vec<PositionRecord>,
    sightings: Vec<SightingRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn sightings(&self) -> &[SightingRecord] {
        &self.sightings
    }
}

impl RecordStore for MemoryStore {
    fn insert_position(&mut self, record: &PositionRecord) -> StoreResult<RecordId> {
        self.positions.push(*record);
        Ok(RecordId(self.positions.len() as u64 - 1))
    }

    fn insert_sighting(&mut self, record: &SightingRecord) -> StoreResult<RecordId> {
        self.sightings.push(*record);
        Ok(RecordId(self.sightings.len() as u64 - 1))
    }

    fn recent_positions(&self, limit: usize) -> StoreResult<Vec<PositionRecord>> {
        Ok(newest_first(&self.positions, |r| r.timestamp, limit))
    }

    fn recent_sightings(&self, limit: usize) -> StoreResult<Vec<SightingRecord>> {
        Ok(newest_first(&self.sightings, |r| r.timestamp, limit))
    }

    fn finish(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

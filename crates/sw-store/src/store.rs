//! The `RecordStore` trait implemented by all backends.

use sw_core::RecordId;

use crate::{PositionRecord, SightingRecord, StoreResult};

/// Trait implemented by the memory, CSV, and SQLite stores.
pub trait RecordStore {
    /// Append one position.
    fn insert_position(&mut self, record: &PositionRecord) -> StoreResult<RecordId>;

    /// Append one sighting.
    fn insert_sighting(&mut self, record: &SightingRecord) -> StoreResult<RecordId>;

    /// Up to `limit` positions, newest first.
    fn recent_positions(&self, limit: usize) -> StoreResult<Vec<PositionRecord>>;

    /// Up to `limit` sightings, newest first.
    fn recent_sightings(&self, limit: usize) -> StoreResult<Vec<SightingRecord>>;

    /// The newest position, if any.
    fn latest_position(&self) -> StoreResult<Option<PositionRecord>> {
        Ok(self.recent_positions(1)?.into_iter().next())
    }

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> StoreResult<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn insert_position(&mut self, record: &PositionRecord) -> StoreResult<RecordId> {
        (**self).insert_position(record)
    }

    fn insert_sighting(&mut self, record: &SightingRecord) -> StoreResult<RecordId> {
        (**self).insert_sighting(record)
    }

    fn recent_positions(&self, limit: usize) -> StoreResult<Vec<PositionRecord>> {
        (**self).recent_positions(limit)
    }

    fn recent_sightings(&self, limit: usize) -> StoreResult<Vec<SightingRecord>> {
        (**self).recent_sightings(limit)
    }

    fn latest_position(&self) -> StoreResult<Option<PositionRecord>> {
        (**self).latest_position()
    }

    fn finish(&mut self) -> StoreResult<()> {
        (**self).finish()
    }
}

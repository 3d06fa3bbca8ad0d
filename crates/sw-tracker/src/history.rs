//! The short list of recent positions shown next to the map.

use std::collections::VecDeque;

use sw_store::PositionRecord;

/// The newest `capacity` positions, newest first.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    capacity: usize,
    entries:  VecDeque<PositionRecord>,
}

impl PositionHistory {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    /// Seed from rows in any order; keeps the newest `capacity` of them.
    pub fn from_records(capacity: usize, records: impl IntoIterator<Item = PositionRecord>) -> Self {
        let mut h = Self::new(capacity);
        for r in records {
            h.push(r);
        }
        h
    }

    /// Insert in timestamp order.  A record ties ahead of existing ones with
    /// the same timestamp.  The oldest entry falls off when full.
    pub fn push(&mut self, record: PositionRecord) {
        let at = self
            .entries
            .iter()
            .position(|e| e.timestamp <= record.timestamp)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, record);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&PositionRecord> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionRecord> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<PositionRecord> {
        self.entries.iter().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

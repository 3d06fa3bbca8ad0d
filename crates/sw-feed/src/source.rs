//! The `PositionSource` trait and a scripted implementation.

use std::collections::VecDeque;

use sw_core::Timestamp;

use crate::{FeedError, FeedResult, SatellitePosition};

/// Anything that can report where the satellite is.
///
/// `now` is the caller's notion of the current time.  Live sources ignore it;
/// generated and cached sources use it to decide what to return.
pub trait PositionSource {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch the latest position.
    fn fetch(&mut self, now: Timestamp) -> FeedResult<SatellitePosition>;
}

impl<S: PositionSource + ?Sized> PositionSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&mut self, now: Timestamp) -> FeedResult<SatellitePosition> {
        (**self).fetch(now)
    }
}

/// A source that replays a queue of prepared results, then reports
/// [`FeedError::Exhausted`].
///
/// Useful for tests and for replaying recorded payloads.
pub struct ScriptedSource {
    name:    String,
    script:  VecDeque<FeedResult<SatellitePosition>>,
    /// Number of `fetch` calls so far, including failed ones.
    pub calls: usize,
}

impl ScriptedSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), script: VecDeque::new(), calls: 0 }
    }

    /// Queue a successful fetch.
    pub fn then_ok(mut self, position: SatellitePosition) -> Self {
        self.script.push_back(Ok(position));
        self
    }

    /// Queue a failed fetch.
    pub fn then_err(mut self, error: FeedError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Queue one result per position.
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = SatellitePosition>) -> Self {
        self.script.extend(positions.into_iter().map(Ok));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PositionSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&mut self, _now: Timestamp) -> FeedResult<SatellitePosition> {
        self.calls += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(FeedError::Exhausted { source_name: self.name.clone() }))
    }
}

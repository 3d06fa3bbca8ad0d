//! The `Tracker` struct and its poll loop.

use std::time::Duration;

use sw_alert::{Notifier, ProximityMonitor};
use sw_core::{PollClock, PollConfig, PollTick, Timestamp, WallClock};
use sw_feed::{PositionSource, Sleeper};
use sw_store::{PositionRecord, RecordStore};

use crate::{PositionHistory, TrackerError, TrackerObserver, TrackerResult, TrackerStats};

/// The monitor type the tracker drives; the notifier is chosen at runtime.
pub type BoxedMonitor = ProximityMonitor<Box<dyn Notifier + Send>>;

/// Polls a position source on a fixed interval.
///
/// Each poll:
///
/// 1. **Fetch** the position, passing the time the poll started.  A feed
///    error is reported to the observer and the poll is skipped.
/// 2. **Store** it and add it to the [`PositionHistory`].  Cache replays are
///    shown to the observer but neither stored nor alerted on.
/// 3. **Alert**: the [`ProximityMonitor`], if any, checks the distance to
///    home; a sent alert is stored as a sighting.
///
/// Store errors end the run.  Create via [`TrackerBuilder`][crate::TrackerBuilder].
pub struct Tracker<S: PositionSource, T: RecordStore> {
    /// Poll count, interval, history size.
    pub config: PollConfig,

    /// Counts polls.  Its nominal times stamp the polls of `run_polls`.
    pub clock: PollClock,

    pub(crate) source:  S,
    pub(crate) store:   T,
    pub(crate) monitor: Option<BoxedMonitor>,
    pub(crate) history: PositionHistory,
    pub(crate) pacer:   Box<dyn Sleeper + Send>,
    pub(crate) wall:    Box<dyn WallClock + Send>,
    pub(crate) stats:   TrackerStats,
}

impl<S: PositionSource, T: RecordStore> Tracker<S, T> {
    /// Poll until `config.total_polls` is reached, or forever when unbounded.
    ///
    /// Waits one interval between polls, but not after the last one.  Each
    /// poll is stamped with the wall clock as it starts.  The store is
    /// finished before returning.
    pub fn run<O: TrackerObserver>(&mut self, observer: &mut O) -> TrackerResult<TrackerStats> {
        let interval = Duration::from_secs(u64::from(self.config.interval_secs));
        loop {
            let now = self.clock.current_tick;
            if self.config.is_finished(now) {
                break;
            }

            let at = self.wall.now();
            self.poll(now, at, observer)?;
            self.clock.advance();

            if !self.config.is_finished(self.clock.current_tick) {
                self.pacer.sleep(interval);
            }
        }
        self.store.finish()?;
        observer.on_run_end(self.clock.current_tick, &self.stats);
        Ok(self.stats)
    }

    /// Run exactly `n` polls from the current position without pacing
    /// (ignores `total_polls`).  Polls are stamped with the clock's nominal
    /// times.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_polls<O: TrackerObserver>(&mut self, n: u64, observer: &mut O) -> TrackerResult<TrackerStats> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            let at = self.clock.time_of(now);
            self.poll(now, at, observer)?;
            self.clock.advance();
        }
        Ok(self.stats)
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn monitor(&self) -> Option<&BoxedMonitor> {
        self.monitor.as_ref()
    }

    pub fn monitor_mut(&mut self) -> Option<&mut BoxedMonitor> {
        self.monitor.as_mut()
    }

    /// Hand back the source and store, e.g. to inspect them after a run.
    pub fn into_parts(self) -> (S, T) {
        (self.source, self.store)
    }

    // ── One poll ──────────────────────────────────────────────────────────

    fn poll<O: TrackerObserver>(&mut self, tick: PollTick, at: Timestamp, observer: &mut O) -> TrackerResult<()> {
        observer.on_poll_start(tick, at);
        self.stats.polls += 1;

        let position = match self.source.fetch(at) {
            Ok(p) => p,
            Err(e) => {
                self.stats.failures += 1;
                observer.on_poll_error(tick, &TrackerError::Feed(e));
                return Ok(());
            }
        };

        if position.source.is_replay() {
            self.stats.replayed += 1;
            observer.on_position(tick, &position, &self.history);
            return Ok(());
        }

        let record = PositionRecord::from(&position);
        self.store.insert_position(&record)?;
        self.stats.stored += 1;
        self.history.push(record);
        observer.on_position(tick, &position, &self.history);

        let Some(monitor) = self.monitor.as_mut() else {
            return Ok(());
        };
        match monitor.evaluate(&position, at) {
            Ok(outcome) => {
                if let Some(sighting) = outcome.sighting() {
                    self.store.insert_sighting(&sighting)?;
                    self.stats.alerts += 1;
                }
                observer.on_alert(tick, &outcome);
            }
            Err(e) => {
                self.stats.failures += 1;
                observer.on_poll_error(tick, &TrackerError::Alert(e));
            }
        }
        Ok(())
    }
}

//! Fluent builder for constructing a [`Tracker`].

use sw_core::{PollClock, PollConfig, SystemClock, WallClock};
use sw_feed::{PositionSource, Sleeper, ThreadSleeper};
use sw_store::RecordStore;

use crate::{BoxedMonitor, PositionHistory, Tracker, TrackerResult, TrackerStats};

/// Fluent builder for [`Tracker<S, T>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.monitor(m)`    | No proximity alerts                       |
/// | `.pacer(p)`      | [`ThreadSleeper`] (real waiting)          |
/// | `.clock(c)`      | `config.make_clock()`                     |
/// | `.wall_clock(w)` | [`SystemClock`]                           |
///
/// # Example
///
/// ```rust,ignore
/// let mut tracker = TrackerBuilder::new(config, feed, CsvStore::open(dir)?)
///     .monitor(monitor)
///     .build()?;
/// tracker.run(&mut LogObserver)?;
/// ```
pub struct TrackerBuilder<S: PositionSource, T: RecordStore> {
    config:  PollConfig,
    source:  S,
    store:   T,
    monitor: Option<BoxedMonitor>,
    pacer:   Option<Box<dyn Sleeper + Send>>,
    clock:   Option<PollClock>,
    wall:    Option<Box<dyn WallClock + Send>>,
}

impl<S: PositionSource, T: RecordStore> TrackerBuilder<S, T> {
    pub fn new(config: PollConfig, source: S, store: T) -> Self {
        Self {
            config,
            source,
            store,
            monitor: None,
            pacer:   None,
            clock:   None,
            wall:    None,
        }
    }

    /// Check every stored position against the user's home.
    pub fn monitor(mut self, monitor: BoxedMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Replace the between-poll wait, e.g. with `NoSleep` in tests.
    pub fn pacer(mut self, pacer: impl Sleeper + Send + 'static) -> Self {
        self.pacer = Some(Box::new(pacer));
        self
    }

    /// Start from an existing clock instead of `config.make_clock()`.
    pub fn clock(mut self, clock: PollClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the clock `run` reads at the start of each poll.
    pub fn wall_clock(mut self, wall: impl WallClock + Send + 'static) -> Self {
        self.wall = Some(Box::new(wall));
        self
    }

    /// Validate the config and seed the history from the store's newest rows.
    pub fn build(self) -> TrackerResult<Tracker<S, T>> {
        self.config.validate()?;

        let history = PositionHistory::from_records(
            self.config.history_size,
            self.store.recent_positions(self.config.history_size)?,
        );
        let clock = self.clock.unwrap_or_else(|| self.config.make_clock());

        Ok(Tracker {
            config:  self.config,
            clock,
            source:  self.source,
            store:   self.store,
            monitor: self.monitor,
            history,
            pacer:   self.pacer.unwrap_or_else(|| Box::new(ThreadSleeper)),
            wall:    self.wall.unwrap_or_else(|| Box::new(SystemClock)),
            stats:   TrackerStats::default(),
        })
    }
}

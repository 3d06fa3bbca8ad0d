//! Wall-clock timestamps and the poll time model.
//!
//! # Design
//!
//! Poll rounds are counted by a monotonically increasing `PollTick`.  The
//! mapping to wall-clock time is held in `PollClock`:
//!
//!   wall_time = start_unix_secs + tick * interval_secs
//!
//! That nominal time drives stepped runs.  A paced run reads a [`WallClock`]
//! at the start of every round instead, so slow fetches and retry pauses
//! never leave the tracker behind real time.  Feed timestamps are carried
//! separately as [`Timestamp`].

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{CoreError, CoreResult};

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Seconds since the Unix epoch, UTC.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    #[inline]
    pub fn from_unix(secs: i64) -> Self {
        Timestamp(secs)
    }

    /// The current system time.
    pub fn now() -> Self {
        Timestamp(Utc::now().timestamp())
    }

    #[inline]
    pub fn unix_secs(self) -> i64 {
        self.0
    }

    /// Return the timestamp `secs` seconds after `self`.
    #[inline]
    pub fn plus_secs(self, secs: i64) -> Timestamp {
        Timestamp(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn secs_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }

    /// ISO-8601 / RFC 3339 form with a `Z` suffix, e.g. `2024-05-01T12:00:00Z`.
    pub fn to_rfc3339(self) -> String {
        match DateTime::<Utc>::from_timestamp(self.0, 0) {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => self.0.to_string(),
        }
    }

    /// Parse an RFC 3339 timestamp.  A timestamp without an offset (as the
    /// original spreadsheet rows store them) is read as UTC.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp(dt.timestamp()));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Timestamp(naive.and_utc().timestamp()))
            .map_err(|e| CoreError::Timestamp(format!("{s:?}: {e}")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

// ── WallClock ────────────────────────────────────────────────────────────────

/// Tells a paced run what time it is.  Swapped out in tests.
pub trait WallClock {
    fn now(&self) -> Timestamp;
}

impl<C: WallClock + ?Sized> WallClock for Box<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

// ── PollTick ─────────────────────────────────────────────────────────────────

/// Index of one poll round since the tracker started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollTick(pub u64);

impl PollTick {
    pub const ZERO: PollTick = PollTick(0);

    #[inline]
    pub fn next(self) -> PollTick {
        PollTick(self.0 + 1)
    }
}

impl fmt::Display for PollTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ── PollClock ────────────────────────────────────────────────────────────────

/// Converts between poll rounds and Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollClock {
    /// Unix timestamp of round 0.
    pub start_unix_secs: i64,
    /// Seconds between rounds.
    pub interval_secs: u32,
    /// The current round, advanced by `PollClock::advance()`.
    pub current_tick: PollTick,
}

impl PollClock {
    pub fn new(start_unix_secs: i64, interval_secs: u32) -> Self {
        Self {
            start_unix_secs,
            interval_secs,
            current_tick: PollTick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Nominal wall-clock time of `tick`.
    #[inline]
    pub fn time_of(&self, tick: PollTick) -> Timestamp {
        Timestamp(self.start_unix_secs + tick.0 as i64 * self.interval_secs as i64)
    }

    /// Nominal wall-clock time of the current round.
    #[inline]
    pub fn now(&self) -> Timestamp {
        self.time_of(self.current_tick)
    }

    /// How many rounds span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.interval_secs.max(1) as u64)
    }
}

impl fmt::Display for PollClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.current_tick, self.now())
    }
}

// ── PollConfig ───────────────────────────────────────────────────────────────

/// Default seconds between polls, as in the dashboard and ingestion agent.
pub const DEFAULT_INTERVAL_SECS: u32 = 5;

/// Default number of recent positions kept for display.
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// Top-level polling configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the tracker builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PollConfig {
    /// Unix timestamp of round 0.  `None` means "now" at clock creation.
    pub start_unix_secs: Option<i64>,

    /// Seconds between polls.  Must be at least 1.
    pub interval_secs: u32,

    /// Total rounds to run.  `None` polls until the process is stopped.
    pub total_polls: Option<u64>,

    /// How many recent positions the in-memory history keeps.  Must be at
    /// least 1.
    pub history_size: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            start_unix_secs: None,
            interval_secs:   DEFAULT_INTERVAL_SECS,
            total_polls:     None,
            history_size:    DEFAULT_HISTORY_SIZE,
        }
    }
}

impl PollConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.interval_secs == 0 {
            return Err(CoreError::Config("interval_secs must be at least 1".into()));
        }
        if self.history_size == 0 {
            return Err(CoreError::Config("history_size must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` once `tick` has reached the configured number of rounds.
    #[inline]
    pub fn is_finished(&self, tick: PollTick) -> bool {
        self.total_polls.is_some_and(|n| tick.0 >= n)
    }

    /// Construct a `PollClock` pre-configured for this run.
    pub fn make_clock(&self) -> PollClock {
        let start = self.start_unix_secs.unwrap_or_else(|| Timestamp::now().0);
        PollClock::new(start, self.interval_secs)
    }
}

//! Tracker observer trait for progress reporting and dashboards.

use sw_alert::AlertOutcome;
use sw_core::{PollTick, Timestamp};
use sw_feed::SatellitePosition;

use crate::{PositionHistory, TrackerError};

/// Running totals for one tracker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackerStats {
    /// Polls attempted.
    pub polls:    u64,
    /// Positions written to the store.
    pub stored:   u64,
    /// Cached positions replayed while every live feed was down.
    pub replayed: u64,
    /// Polls that produced no position, or whose alert could not be sent.
    pub failures: u64,
    /// Sightings recorded.
    pub alerts:   u64,
}

/// Callbacks invoked by [`Tracker::run`][crate::Tracker::run] during each poll.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait TrackerObserver {
    /// Called at the very start of each poll, before fetching.
    fn on_poll_start(&mut self, _tick: PollTick, _at: Timestamp) {}

    /// Called once a position is in hand.  `history` already includes it
    /// unless it was a cache replay.
    fn on_position(
        &mut self,
        _tick:     PollTick,
        _position: &SatellitePosition,
        _history:  &PositionHistory,
    ) {}

    /// Called after the proximity check, whatever it decided.
    fn on_alert(&mut self, _tick: PollTick, _outcome: &AlertOutcome) {}

    /// Called for a failure that skips this poll without stopping the run.
    fn on_poll_error(&mut self, _tick: PollTick, _error: &TrackerError) {}

    /// Called once after the final poll.
    fn on_run_end(&mut self, _final_tick: PollTick, _stats: &TrackerStats) {}
}

/// A [`TrackerObserver`] that does nothing.
pub struct NoopObserver;

impl TrackerObserver for NoopObserver {}

/// Reports every poll through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TrackerObserver for LogObserver {
    fn on_position(&mut self, tick: PollTick, position: &SatellitePosition, _history: &PositionHistory) {
        tracing::info!(
            %tick,
            source = %position.source,
            lat = position.point.lat,
            lon = position.point.lon,
            altitude_km = position.altitude_km,
            "station position"
        );
    }

    fn on_alert(&mut self, tick: PollTick, outcome: &AlertOutcome) {
        match outcome {
            AlertOutcome::Notified(alert) => {
                tracing::info!(%tick, distance_km = alert.distance_km, "sighting recorded");
            }
            AlertOutcome::CoolingDown { distance_km, until } => {
                tracing::debug!(%tick, distance_km, %until, "nearby, alert cooling down");
            }
            AlertOutcome::OutOfRange { distance_km } => {
                tracing::debug!(%tick, distance_km, "out of range");
            }
        }
    }

    fn on_poll_error(&mut self, tick: PollTick, error: &TrackerError) {
        tracing::warn!(%tick, %error, "poll skipped");
    }

    fn on_run_end(&mut self, final_tick: PollTick, stats: &TrackerStats) {
        tracing::info!(
            %final_tick,
            polls = stats.polls,
            stored = stats.stored,
            replayed = stats.replayed,
            failures = stats.failures,
            alerts = stats.alerts,
            "tracker stopped"
        );
    }
}

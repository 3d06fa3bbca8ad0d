//! The per-poll proximity check.

use sw_core::{Timestamp, distance_km};
use sw_feed::SatellitePosition;
use sw_store::SightingRecord;

use crate::{AlertPolicy, AlertResult, AlertSettings, Notifier, ProximityAlert};

/// What one evaluation decided.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// Too far away.
    OutOfRange { distance_km: f64 },
    /// Close enough, but an alert went out too recently.
    CoolingDown { distance_km: f64, until: Timestamp },
    /// The notifier accepted this alert.
    Notified(ProximityAlert),
}

impl AlertOutcome {
    pub fn distance_km(&self) -> f64 {
        match self {
            AlertOutcome::OutOfRange { distance_km }
            | AlertOutcome::CoolingDown { distance_km, .. } => *distance_km,
            AlertOutcome::Notified(alert) => alert.distance_km,
        }
    }

    pub fn is_notified(&self) -> bool {
        matches!(self, AlertOutcome::Notified(_))
    }

    /// The row to persist, present only for a sent alert.
    pub fn sighting(&self) -> Option<SightingRecord> {
        match self {
            AlertOutcome::Notified(alert) => Some(alert.sighting()),
            _ => None,
        }
    }
}

/// Compares each position against the user's home and forwards close
/// passes to a [`Notifier`], at most once per cooldown.
pub struct ProximityMonitor<N: Notifier> {
    settings:   AlertSettings,
    policy:     AlertPolicy,
    notifier:   N,
    last_alert: Option<Timestamp>,
}

impl<N: Notifier> ProximityMonitor<N> {
    /// Fails if `settings` does not validate.
    pub fn new(settings: AlertSettings, policy: AlertPolicy, notifier: N) -> AlertResult<Self> {
        settings.validate()?;
        Ok(Self { settings, policy, notifier, last_alert: None })
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn last_alert(&self) -> Option<Timestamp> {
        self.last_alert
    }

    /// Replace the settings, e.g. after the user moves.  The cooldown carries over.
    pub fn update_settings(&mut self, settings: AlertSettings) -> AlertResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Check one position at time `now`.
    ///
    /// The cooldown only starts once the notifier succeeds; a failed
    /// notification is returned as an error and retried on the next call.
    pub fn evaluate(&mut self, position: &SatellitePosition, now: Timestamp) -> AlertResult<AlertOutcome> {
        let distance_km = distance_km(position.point, self.settings.home)?;

        if !self.policy.in_range(distance_km, self.settings.radius_km, position.footprint_radius_km) {
            return Ok(AlertOutcome::OutOfRange { distance_km });
        }
        if let Some(until) = self.policy.blocked_until(self.last_alert, now) {
            return Ok(AlertOutcome::CoolingDown { distance_km, until });
        }

        let alert = ProximityAlert {
            at:   now,
            iss:  position.point,
            home: self.settings.home,
            distance_km,
        };
        self.notifier.notify(&alert)?;
        self.last_alert = Some(now);
        Ok(AlertOutcome::Notified(alert))
    }
}

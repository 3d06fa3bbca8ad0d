//! Where proximity alerts go once the policy lets them through.

use sw_core::{GeoPoint, Timestamp};
use sw_store::SightingRecord;

use crate::{AlertError, AlertResult};

/// One close pass worth telling the user about.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityAlert {
    pub at:          Timestamp,
    pub iss:         GeoPoint,
    pub home:        GeoPoint,
    pub distance_km: f64,
}

impl ProximityAlert {
    /// The text shown to the user.
    pub fn message(&self) -> String {
        format!("ISS is nearby! Current distance: {:.1} km", self.distance_km)
    }

    /// The row persisted to the sightings table for this alert.
    pub fn sighting(&self) -> SightingRecord {
        SightingRecord::new(self.at, self.iss, self.home, self.distance_km)
    }
}

/// A sink for alerts.
///
/// A returned error means the user was not told; the monitor will try again
/// on the next in-range poll.
pub trait Notifier {
    fn name(&self) -> &str;

    fn notify(&mut self, alert: &ProximityAlert) -> AlertResult<()>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn notify(&mut self, alert: &ProximityAlert) -> AlertResult<()> {
        (**self).notify(alert)
    }
}

/// Emits each alert as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&mut self, alert: &ProximityAlert) -> AlertResult<()> {
        tracing::info!(
            at = %alert.at,
            iss = %alert.iss,
            distance_km = alert.distance_km,
            "{}",
            alert.message(),
        );
        Ok(())
    }
}

/// Keeps every alert it receives.  Can be told to fail instead.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub sent:      Vec<ProximityAlert>,
    pub fail_with: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { sent: Vec::new(), fail_with: Some(reason.into()) }
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn notify(&mut self, alert: &ProximityAlert) -> AlertResult<()> {
        if let Some(reason) = &self.fail_with {
            return Err(AlertError::Notify {
                notifier: self.name().to_owned(),
                reason:   reason.clone(),
            });
        }
        self.sent.push(alert.clone());
        Ok(())
    }
}

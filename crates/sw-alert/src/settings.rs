//! User alert settings and the cooldown policy.

use sw_core::{GeoPoint, PointRole, Timestamp};

use crate::{AlertError, AlertResult};

pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 1000.0;
pub const DEFAULT_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_COOLDOWN_SECS: i64 = 5 * 60;

/// Where the user is and how close the station must come to trigger an alert.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertSettings {
    pub home:      GeoPoint,
    pub radius_km: f64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self { home: GeoPoint::default(), radius_km: DEFAULT_RADIUS_KM }
    }
}

impl AlertSettings {
    /// Validated constructor.
    pub fn new(home: GeoPoint, radius_km: f64) -> AlertResult<Self> {
        let s = Self { home, radius_km };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> AlertResult<()> {
        self.home.validate_as(PointRole::Single)?;
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&self.radius_km) {
            return Err(AlertError::Radius {
                radius_km: self.radius_km,
                min:       MIN_RADIUS_KM,
                max:       MAX_RADIUS_KM,
            });
        }
        Ok(())
    }
}

/// When a computed distance is close enough, and how often to say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertPolicy {
    pub cooldown_secs: i64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self { cooldown_secs: DEFAULT_COOLDOWN_SECS }
    }
}

impl AlertPolicy {
    /// The station counts as nearby when the user is inside the alert radius
    /// grown by the station's visibility footprint.
    #[inline]
    pub fn in_range(&self, distance_km: f64, radius_km: f64, footprint_radius_km: f64) -> bool {
        distance_km <= radius_km + footprint_radius_km
    }

    /// `None` when a notification may go out at `now`, otherwise the earliest
    /// time the next one may.
    pub fn blocked_until(&self, last: Option<Timestamp>, now: Timestamp) -> Option<Timestamp> {
        let last = last?;
        let ready = last.plus_secs(self.cooldown_secs);
        (now < ready).then_some(ready)
    }
}

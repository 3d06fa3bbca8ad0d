//! Deterministic ground track of a circular orbit.
//!
//! Used for offline runs and demos.  The model is a circular orbit over a
//! spherical Earth rotating at the sidereal rate, good enough to produce a
//! realistic-looking sinusoidal track, not for pass prediction.

use std::f64::consts::TAU;

use sw_core::{EARTH_RADIUS_KM, GeoPoint, Timestamp};

use crate::{FeedKind, FeedResult, PositionSource, SatellitePosition};
use crate::payload::NOMINAL_ALTITUDE_KM;

/// ISS orbital inclination, degrees.
pub const ISS_INCLINATION_DEG: f64 = 51.64;

/// ISS orbital period, seconds (≈ 92.68 min).
pub const ISS_PERIOD_SECS: f64 = 92.68 * 60.0;

const SIDEREAL_DAY_SECS: f64 = 86_164.090_5;

/// Parameters of the generated orbit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    pub inclination_deg: f64,
    pub period_secs:     f64,
    pub altitude_km:     f64,
    /// Time at which the satellite crosses the equator northbound.
    pub epoch:           Timestamp,
    /// Longitude of that crossing, degrees.
    pub epoch_lon_deg:   f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            inclination_deg: ISS_INCLINATION_DEG,
            period_secs:     ISS_PERIOD_SECS,
            altitude_km:     NOMINAL_ALTITUDE_KM,
            epoch:           Timestamp::EPOCH,
            epoch_lon_deg:   0.0,
        }
    }
}

impl OrbitParams {
    /// Sub-satellite point at `t`.
    pub fn point_at(&self, t: Timestamp) -> GeoPoint {
        let dt = t.secs_since(self.epoch) as f64;
        let inc = self.inclination_deg.to_radians();
        let u = TAU * dt / self.period_secs;

        let lat = (inc.sin() * u.sin()).asin();
        let lon_inertial = (inc.cos() * u.sin()).atan2(u.cos());
        let earth_turn = TAU * dt / SIDEREAL_DAY_SECS;
        let lon = self.epoch_lon_deg.to_radians() + lon_inertial - earth_turn;

        GeoPoint::new(lat.to_degrees(), wrap_degrees(lon.to_degrees()))
    }

    /// Radius of the ground circle with the satellite above the horizon.
    pub fn footprint_radius_km(&self) -> f64 {
        let r = EARTH_RADIUS_KM;
        r * (r / (r + self.altitude_km)).acos()
    }
}

/// Map any longitude into `[-180, 180)`.
fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// A [`PositionSource`] that computes the position from [`OrbitParams`].
#[derive(Clone, Debug, Default)]
pub struct GroundTrackSource {
    pub orbit: OrbitParams,
}

impl GroundTrackSource {
    pub fn new(orbit: OrbitParams) -> Self {
        Self { orbit }
    }
}

impl PositionSource for GroundTrackSource {
    fn name(&self) -> &str {
        "ground-track"
    }

    fn fetch(&mut self, now: Timestamp) -> FeedResult<SatellitePosition> {
        Ok(SatellitePosition {
            timestamp:           now,
            point:               self.orbit.point_at(now),
            altitude_km:         self.orbit.altitude_km,
            footprint_radius_km: self.orbit.footprint_radius_km(),
            source:              FeedKind::Synthetic,
        })
    }
}

//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` stores latitude/longitude as `f64` degrees.  Construction is
//! unchecked; every distance function validates its inputs first and returns
//! [`GeoError::InvalidCoordinate`] before doing any arithmetic.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{Axis, GeoError, GeoResult, PointRole};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Half the circumference of the mean-radius sphere: the largest distance
/// [`distance_km`] can return.
pub const MAX_DISTANCE_KM: f64 = PI * EARTH_RADIUS_KM;

const KM_TO_MILES: f64 = 0.621_371;
const KM_TO_METERS: f64 = 1_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point and check the latitude/longitude ranges.
    pub fn try_new(lat: f64, lon: f64) -> GeoResult<Self> {
        let p = Self::new(lat, lon);
        p.validate_as(PointRole::Single)?;
        Ok(p)
    }

    /// `true` when both coordinates are finite and inside their ranges.
    /// The bounds themselves (±90, ±180) are valid.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.validate_as(PointRole::Single).is_ok()
    }

    /// Check the point, reporting failures against `role`.
    pub fn validate_as(self, role: PointRole) -> GeoResult<()> {
        check_axis(role, Axis::Latitude, self.lat, 90.0)?;
        check_axis(role, Axis::Longitude, self.lon, 180.0)
    }

    /// Haversine great-circle distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> GeoResult<f64> {
        distance_km(self, other)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

fn check_axis(role: PointRole, axis: Axis, value: f64, limit: f64) -> GeoResult<()> {
    // NaN fails the `<=` comparison, so this also rejects non-finite input.
    if value.abs() <= limit {
        Ok(())
    } else {
        Err(GeoError::InvalidCoordinate { point: role, axis, value })
    }
}

#[inline]
fn to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// Both points are validated before any computation.  The result is exactly
/// `0.0` for identical points, symmetric in its arguments, and lies in
/// `[0, MAX_DISTANCE_KM]`.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> GeoResult<f64> {
    a.validate_as(PointRole::First)?;
    b.validate_as(PointRole::Second)?;
    Ok(haversine_unchecked(a, b))
}

/// The formula itself, for callers that already validated both points.
pub(crate) fn haversine_unchecked(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = to_rad(a.lat);
    let lat2 = to_rad(b.lat);
    let d_lat = lat2 - lat1;
    let d_lon = to_rad(b.lon) - to_rad(a.lon);

    // Rounding can push `h` a hair past 1 for antipodal pairs.
    let h = ((d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2))
        .min(1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

// ── Units ─────────────────────────────────────────────────────────────────────

/// Length unit for presenting a distance.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
    Meters,
}

impl DistanceUnit {
    /// Convert a distance given in kilometres into this unit.
    #[inline]
    pub fn from_km(self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles      => km * KM_TO_MILES,
            DistanceUnit::Meters     => km * KM_TO_METERS,
        }
    }

    /// Short label used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles      => "mi",
            DistanceUnit::Meters     => "m",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "mi" | "miles"                     => Ok(DistanceUnit::Miles),
            "m" | "meters" | "metres"          => Ok(DistanceUnit::Meters),
            other => Err(format!("unknown distance unit {other:?}: expected km, mi, or m")),
        }
    }
}

/// [`distance_km`] converted into `unit`.
pub fn distance_in(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> GeoResult<f64> {
    distance_km(a, b).map(|km| unit.from_km(km))
}

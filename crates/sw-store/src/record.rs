//! Plain data rows kept by every store backend.
//!
//! Column names follow the spreadsheet tables the dashboard reads:
//! `ISS_Locations` and `My_Sightings`.

use serde::{Deserialize, Serialize};
use sw_core::{GeoPoint, Timestamp};
use sw_feed::SatellitePosition;

/// One observed station position (`ISS_Locations`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub timestamp:           Timestamp,
    pub latitude:            f64,
    pub longitude:           f64,
    pub altitude_km:         f64,
    pub footprint_radius_km: f64,
}

impl PositionRecord {
    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl From<&SatellitePosition> for PositionRecord {
    fn from(p: &SatellitePosition) -> Self {
        Self {
            timestamp:           p.timestamp,
            latitude:            p.point.lat,
            longitude:           p.point.lon,
            altitude_km:         p.altitude_km,
            footprint_radius_km: p.footprint_radius_km,
        }
    }
}

/// A notified close pass (`My_Sightings`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightingRecord {
    pub timestamp:      Timestamp,
    pub iss_latitude:   f64,
    pub iss_longitude:  f64,
    pub user_latitude:  f64,
    pub user_longitude: f64,
    pub distance_km:    f64,
}

impl SightingRecord {
    pub fn new(at: Timestamp, iss: GeoPoint, user: GeoPoint, distance_km: f64) -> Self {
        Self {
            timestamp:      at,
            iss_latitude:   iss.lat,
            iss_longitude:  iss.lon,
            user_latitude:  user.lat,
            user_longitude: user.lon,
            distance_km,
        }
    }

    pub fn iss_point(&self) -> GeoPoint {
        GeoPoint::new(self.iss_latitude, self.iss_longitude)
    }

    pub fn user_point(&self) -> GeoPoint {
        GeoPoint::new(self.user_latitude, self.user_longitude)
    }
}

/// Newest-first ordering shared by the in-memory backends: descending
/// timestamp, later insertions first among equal timestamps.
pub(crate) fn newest_first<T: Copy>(rows: &[T], ts: impl Fn(&T) -> Timestamp, limit: usize) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().copied().collect();
    out.sort_by(|a, b| ts(b).cmp(&ts(a)));
    out.truncate(limit);
    out
}

//! The satellite position every source produces.

use std::fmt;

use serde::{Deserialize, Serialize};
use sw_core::{GeoPoint, Timestamp};

/// Where a [`SatellitePosition`] came from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// The primary feed (full telemetry, measured footprint).
    Primary,
    /// The fallback feed (position only, nominal altitude and footprint).
    Fallback,
    /// A recent position replayed while every live source is down.
    Cache,
    /// Generated locally, e.g. by [`GroundTrackSource`][crate::GroundTrackSource].
    Synthetic,
}

impl FeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::Primary   => "primary",
            FeedKind::Fallback  => "fallback",
            FeedKind::Cache     => "cache",
            FeedKind::Synthetic => "synthetic",
        }
    }

    /// `true` for positions that were already observed (and stored) before.
    #[inline]
    pub fn is_replay(self) -> bool {
        matches!(self, FeedKind::Cache)
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "primary"   => Ok(FeedKind::Primary),
            "fallback"  => Ok(FeedKind::Fallback),
            "cache"     => Ok(FeedKind::Cache),
            "synthetic" => Ok(FeedKind::Synthetic),
            other => Err(format!("unknown feed kind {other:?}")),
        }
    }
}

/// One observed sub-satellite point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SatellitePosition {
    pub timestamp:           Timestamp,
    pub point:               GeoPoint,
    pub altitude_km:         f64,
    /// Radius of the ground circle from which the satellite is visible.
    pub footprint_radius_km: f64,
    pub source:              FeedKind,
}

impl SatellitePosition {
    /// The same observation, relabelled as a cache replay.
    pub fn replayed(self) -> Self {
        Self { source: FeedKind::Cache, ..self }
    }

    /// Seconds between this observation and `now`.
    #[inline]
    pub fn age_secs(&self, now: Timestamp) -> i64 {
        now.secs_since(self.timestamp)
    }
}

impl fmt::Display for SatellitePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} alt {:.1} km footprint {:.1} km [{}]",
            self.timestamp, self.point, self.altitude_km, self.footprint_radius_km, self.source
        )
    }
}

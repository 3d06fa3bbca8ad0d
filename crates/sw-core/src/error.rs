//! Error types for sw-core.
//!
//! [`GeoError`] is the only failure of the distance functions.  [`CoreError`]
//! is the common base that other `sw-*` crates wrap or convert from.

use std::fmt;

use thiserror::Error;

/// Which input a coordinate failure refers to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointRole {
    /// A point validated on its own (e.g. `GeoPoint::try_new`).
    Single,
    /// First argument of a two-point function.
    First,
    /// Second argument of a two-point function.
    Second,
    /// The `n`-th target of a batch call.
    Target(usize),
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointRole::Single    => f.write_str("point"),
            PointRole::First     => f.write_str("first point"),
            PointRole::Second    => f.write_str("second point"),
            PointRole::Target(i) => write!(f, "target #{i}"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Inclusive magnitude bound for this axis, in degrees.
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude  => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude  => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Coordinate validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid {axis} {value} on {point}: out of range or not finite")]
    InvalidCoordinate {
        point: PointRole,
        axis:  Axis,
        value: f64,
    },
}

/// Shorthand result for the distance functions.
pub type GeoResult<T> = Result<T, GeoError>;

/// The common error type for `sw-core` and a base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("timestamp error: {0}")]
    Timestamp(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

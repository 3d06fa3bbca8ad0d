//! `sw-core`: foundational types for the `satwatch` tracker.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no
//! `sw-*` dependencies and few external ones (`chrono`, `thiserror`, plus
//! optional `serde` and `rayon`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`geo`]    | `GeoPoint`, haversine `distance_km`, `DistanceUnit`    |
//! | [`batch`]  | one-to-many `distances_km`, `nearest`                  |
//! | [`ids`]    | `SatelliteId`, `RecordId`                              |
//! | [`time`]   | `Timestamp`, `WallClock`, `PollClock`, `PollConfig`    |
//! | [`error`]  | `GeoError`, `CoreError`                                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `serde`    | Adds `Serialize`/`Deserialize` to all public types.   |
//! | `parallel` | Runs `batch::distances_km` on Rayon's thread pool.    |
//!
//! # Example
//!
//! ```
//! use sw_core::{GeoPoint, distance_km};
//!
//! let nyc    = GeoPoint::new(40.7128, -74.0060);
//! let london = GeoPoint::new(51.5074, -0.1278);
//! let km = distance_km(nyc, london).unwrap();
//! assert!((km - 5570.2).abs() < 1.0);
//! ```

pub mod batch;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use batch::{distances_km, nearest};
pub use error::{Axis, CoreError, CoreResult, GeoError, GeoResult, PointRole};
pub use geo::{DistanceUnit, EARTH_RADIUS_KM, GeoPoint, MAX_DISTANCE_KM, distance_in, distance_km};
pub use ids::{RecordId, SatelliteId};
pub use time::{PollClock, PollConfig, PollTick, SystemClock, Timestamp, WallClock};

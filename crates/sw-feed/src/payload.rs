//! Wire formats of the two public position feeds.
//!
//! # Primary feed (`wheretheiss.at`, v1 satellite endpoint)
//!
//! ```json
//! { "name": "iss", "id": 25544, "latitude": 50.1, "longitude": -3.2,
//!   "altitude": 421.3, "velocity": 27600.1, "visibility": "daylight",
//!   "footprint": 4500.2, "timestamp": 1714564800, "units": "kilometers" }
//! ```
//!
//! `footprint` is the diameter of the visibility circle, so the radius is
//! half of it.  `units` may be `"miles"`, in which case lengths are
//! converted to kilometres.
//!
//! # Fallback feed (`open-notify`, iss-now endpoint)
//!
//! ```json
//! { "message": "success", "timestamp": 1714564800,
//!   "iss_position": { "latitude": "50.1000", "longitude": "-3.2000" } }
//! ```
//!
//! Coordinates arrive as strings and there is no altitude, so a nominal
//! altitude and a footprint derived from it are filled in.

use serde::Deserialize;
use sw_core::{GeoPoint, PointRole, SatelliteId, Timestamp};

use crate::{FeedError, FeedKind, FeedResult, SatellitePosition};

/// Primary feed endpoint for the ISS.
pub const PRIMARY_URL: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// Fallback feed endpoint.
pub const FALLBACK_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Altitude assumed when the feed does not report one.
pub const NOMINAL_ALTITUDE_KM: f64 = 408.0;

/// Footprint radius per km of altitude for the fallback feed (≈ tan 30°).
pub const FALLBACK_FOOTPRINT_FACTOR: f64 = 0.577;

const MILES_TO_KM: f64 = 1.609_344;

// ── Primary ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PrimaryPayload {
    #[serde(default)]
    id:        Option<u32>,
    latitude:  f64,
    longitude: f64,
    altitude:  f64,
    footprint: f64,
    timestamp: i64,
    #[serde(default)]
    units:     Option<String>,
}

/// Decode a primary-feed response body.
pub fn parse_primary(body: &str) -> FeedResult<SatellitePosition> {
    let raw: PrimaryPayload = serde_json::from_str(body)?;

    if let Some(id) = raw.id {
        if SatelliteId(id) != SatelliteId::ISS {
            return Err(FeedError::Payload(format!("unexpected satellite id {id}")));
        }
    }

    let scale = match raw.units.as_deref() {
        None | Some("kilometers") => 1.0,
        Some("miles") => MILES_TO_KM,
        Some(other) => return Err(FeedError::Payload(format!("unknown units {other:?}"))),
    };

    let altitude_km = finite("altitude", raw.altitude * scale)?;
    let footprint_km = finite("footprint", raw.footprint * scale)?;
    let point = GeoPoint::new(raw.latitude, raw.longitude);
    point.validate_as(PointRole::Single)?;

    Ok(SatellitePosition {
        timestamp:           Timestamp::from_unix(raw.timestamp),
        point,
        altitude_km,
        footprint_radius_km: footprint_km / 2.0,
        source:              FeedKind::Primary,
    })
}

// ── Fallback ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FallbackPayload {
    #[serde(default)]
    message:      Option<String>,
    timestamp:    i64,
    iss_position: FallbackCoords,
}

#[derive(Debug, Deserialize)]
struct FallbackCoords {
    latitude:  String,
    longitude: String,
}

/// Decode a fallback-feed response body.
pub fn parse_fallback(body: &str) -> FeedResult<SatellitePosition> {
    let raw: FallbackPayload = serde_json::from_str(body)?;

    if let Some(msg) = raw.message.as_deref() {
        if msg != "success" {
            return Err(FeedError::Payload(format!("feed reported {msg:?}")));
        }
    }

    let point = GeoPoint::new(
        parse_degrees("latitude", &raw.iss_position.latitude)?,
        parse_degrees("longitude", &raw.iss_position.longitude)?,
    );
    point.validate_as(PointRole::Single)?;

    Ok(SatellitePosition {
        timestamp:           Timestamp::from_unix(raw.timestamp),
        point,
        altitude_km:         NOMINAL_ALTITUDE_KM,
        footprint_radius_km: NOMINAL_ALTITUDE_KM * FALLBACK_FOOTPRINT_FACTOR,
        source:              FeedKind::Fallback,
    })
}

/// Decode a body from the feed identified by `kind`.
pub fn parse(kind: FeedKind, body: &str) -> FeedResult<SatellitePosition> {
    match kind {
        FeedKind::Primary  => parse_primary(body),
        FeedKind::Fallback => parse_fallback(body),
        other => Err(FeedError::Payload(format!("{other} positions have no wire format"))),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_degrees(field: &str, s: &str) -> FeedResult<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| FeedError::Payload(format!("{field} {s:?} is not a number")))
}

fn finite(field: &str, v: f64) -> FeedResult<f64> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(FeedError::Payload(format!("{field} {v} is not a finite non-negative length")))
    }
}

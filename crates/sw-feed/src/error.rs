//! Error types for sw-feed.

use sw_core::GeoError;
use thiserror::Error;

/// Errors raised while fetching or decoding a satellite position.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("position out of range: {0}")]
    Coordinate(#[from] GeoError),

    #[error("source {source_name:?} has no more scripted results")]
    Exhausted { source_name: String },

    #[error("source {source_name:?} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        source_name: String,
        attempts:    u32,
        last:        Box<FeedError>,
    },

    #[error("primary source skipped until the next health check")]
    PrimaryUnhealthy,

    #[error("all sources failed (primary: {primary}; fallback: {fallback})")]
    AllSourcesFailed {
        primary:  Box<FeedError>,
        fallback: Box<FeedError>,
    },

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Alias for `Result<T, FeedError>`.
pub type FeedResult<T> = Result<T, FeedError>;

//! Error types for sw-alert.

use sw_core::GeoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("invalid location: {0}")]
    Geo(#[from] GeoError),

    #[error("alert radius {radius_km} km is outside [{min}, {max}] km")]
    Radius { radius_km: f64, min: f64, max: f64 },

    #[error("notifier `{notifier}` failed: {reason}")]
    Notify { notifier: String, reason: String },
}

pub type AlertResult<T> = Result<T, AlertError>;

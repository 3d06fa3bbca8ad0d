//! One-to-many distance computation.
//!
//! With the `parallel` feature the per-target work runs on Rayon's global
//! pool.  Output order always matches input order.

use crate::error::{GeoResult, PointRole};
use crate::geo::{GeoPoint, haversine_unchecked};

/// Distance in kilometres from `origin` to every point in `targets`.
///
/// The origin is validated once as [`PointRole::First`]; each target is
/// validated as [`PointRole::Target`] with its index.  The first invalid
/// target (lowest index) aborts the whole batch.
pub fn distances_km(origin: GeoPoint, targets: &[GeoPoint]) -> GeoResult<Vec<f64>> {
    origin.validate_as(PointRole::First)?;
    for (i, t) in targets.iter().enumerate() {
        t.validate_as(PointRole::Target(i))?;
    }
    Ok(compute(origin, targets))
}

#[cfg(not(feature = "parallel"))]
fn compute(origin: GeoPoint, targets: &[GeoPoint]) -> Vec<f64> {
    targets.iter().map(|&t| haversine_unchecked(origin, t)).collect()
}

#[cfg(feature = "parallel")]
fn compute(origin: GeoPoint, targets: &[GeoPoint]) -> Vec<f64> {
    use rayon::prelude::*;
    targets.par_iter().map(|&t| haversine_unchecked(origin, t)).collect()
}

/// Index and distance of the target closest to `origin`, or `None` for an
/// empty slice.
pub fn nearest(origin: GeoPoint, targets: &[GeoPoint]) -> GeoResult<Option<(usize, f64)>> {
    let distances = distances_km(origin, targets)?;
    Ok(distances
        .into_iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1)))
}

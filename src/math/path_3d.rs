use crate::error::GeometryError;

use super::{Point3, Vector3, TOLERANCE};

/// Unit direction from `from` to `to`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the two points coincide within
/// [`TOLERANCE`].
pub fn unit_direction(from: &Point3, to: &Point3) -> Result<Vector3, GeometryError> {
    (to - from)
        .try_normalize(TOLERANCE)
        .ok_or(GeometryError::ZeroVector)
}

/// Cumulative arc length at each point of an open polyline.
///
/// The first entry is always `0.0`; entry `i` is the summed Euclidean length
/// of segments `0..i`. Returns an empty vector for an empty input.
#[must_use]
pub fn cumulative_lengths(points: &[Point3]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    let mut prev: Option<&Point3> = None;
    for p in points {
        if let Some(q) = prev {
            total += (p - q).norm();
        }
        lengths.push(total);
        prev = Some(p);
    }
    lengths
}

/// Linear interpolation between two positions.
///
/// `t = 0` yields `a`, `t = 1` yields `b`.
#[must_use]
#[inline]
pub fn blend(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a.lerp(b, t)
}

//! Polar geometry helpers shared by the search, planner and impact estimator.
//!
//! Angles are degrees measured from the positive x-axis; distances are pixels
//! from the focal "self" node at the origin.

use crate::models::company::PolarPosition;

/// Normalises any finite angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Converts a polar position to Cartesian `(x, y)` around the origin.
pub fn to_cartesian(position: &PolarPosition) -> (f64, f64) {
    let radians = position.angle.to_radians();
    (
        position.distance * radians.cos(),
        position.distance * radians.sin(),
    )
}

/// Euclidean separation between two polar positions.
pub fn separation(a: &PolarPosition, b: &PolarPosition) -> f64 {
    let (ax, ay) = to_cartesian(a);
    let (bx, by) = to_cartesian(b);
    (ax - bx).hypot(ay - by)
}

/// Shortest rotation between two angles, in `[0, 180]`.
///
/// A move from 350° to 10° is 20°, not 340°.
pub fn angular_delta(from: f64, to: f64) -> f64 {
    let raw = (normalize_angle(to) - normalize_angle(from)).abs();
    raw.min(360.0 - raw)
}

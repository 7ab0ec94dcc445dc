use nalgebra::{Rotation3, Unit};

use super::{Vector3, TOLERANCE};

/// Unsigned angle between two vectors in `[0, pi]`.
///
/// Uses `atan2(|a x b|, a . b)`, which stays accurate for nearly parallel
/// and nearly opposite vectors where `acos` loses precision.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Removes the component of `v` along the unit `normal`, then normalizes.
///
/// Returns `None` when `v` is parallel to `normal`.
#[must_use]
pub fn project_onto_plane(v: &Vector3, normal: &Vector3) -> Option<Vector3> {
    let projected = v - normal * v.dot(normal);
    normalize(&projected)
}

/// Normalizes `v`, returning `None` for (near) zero-length or non-finite
/// vectors.
#[must_use]
pub fn normalize(v: &Vector3) -> Option<Vector3> {
    let len = v.norm();
    if !len.is_finite() || len < TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}

/// Rotates `v` by `angle` radians counter-clockwise about `axis`.
///
/// Returns `None` if `axis` is zero-length.
#[must_use]
pub fn rotate_about_axis(v: &Vector3, axis: &Vector3, angle: f64) -> Option<Vector3> {
    let axis = Unit::try_new(*axis, TOLERANCE)?;
    Some(Rotation3::from_axis_angle(&axis, angle) * v)
}

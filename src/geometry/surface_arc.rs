use crate::math::vector_3d::angle_between;
use crate::math::{chord_length, Point3, Vector3, TOLERANCE};

use super::Ellipsoid;

/// Number of sub-segments needed so that no chord between consecutive points
/// exceeds `min_distance`. Always at least one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn segment_count(start: &Point3, end: &Point3, min_distance: f64) -> usize {
    let count = ((end - start).norm() / min_distance).ceil();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Subdivides the surface path from `start` to `end`.
///
/// Both endpoints are projected onto the surface along their geodetic
/// normals. Interior points are spaced at equal central angles along the
/// great ellipse through the two endpoints, with the sub-segment count set
/// so that each chord is no longer than the chord of `granularity` radians
/// on the ellipsoid's largest radius.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn generate_arc(
    start: &Point3,
    end: &Point3,
    granularity: f64,
    ellipsoid: &Ellipsoid,
) -> Vec<Point3> {
    let min_distance = chord_length(granularity, ellipsoid.maximum_radius());
    let count = segment_count(start, end, min_distance);

    let first = ellipsoid.scale_to_geodetic_surface(start).unwrap_or(*start);
    let last = ellipsoid.scale_to_geodetic_surface(end).unwrap_or(*end);

    let mut points = Vec::with_capacity(count + 1);
    points.push(first);

    let a = first.coords;
    let b = last.coords;
    let theta = angle_between(&a, &b);
    let sin_theta = theta.sin();

    for i in 1..count {
        let t = i as f64 / count as f64;
        let direction: Vector3 = if sin_theta.abs() < TOLERANCE {
            a.lerp(&b, t)
        } else {
            (a * ((1.0 - t) * theta).sin() + b * (t * theta).sin()) / sin_theta
        };
        let interior = Point3::from(direction);
        points.push(ellipsoid.scale_to_geocentric_surface(&interior).unwrap_or(interior));
    }

    points.push(last);
    points
}

use crate::geometry::Ellipsoid;
use crate::math::Point3;

/// Drops every point exactly equal to its predecessor.
#[must_use]
pub fn remove_duplicates(points: &[Point3]) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if unique.last() != Some(p) {
            unique.push(*p);
        }
    }
    unique
}

/// Projects the input polyline onto the ellipsoid surface and removes
/// consecutive duplicates.
///
/// Returns `None` when fewer than two distinct points remain, or when a point
/// sits at the ellipsoid centre or has a non-finite coordinate and so has no
/// surface projection. Either case
/// means there is nothing to build, not that the input is invalid.
#[must_use]
pub fn sanitize(points: &[Point3], ellipsoid: &Ellipsoid) -> Option<Vec<Point3>> {
    let surface = points
        .iter()
        .map(|p| ellipsoid.scale_to_geodetic_surface(p))
        .collect::<Option<Vec<_>>>()?;
    let unique = remove_duplicates(&surface);
    (unique.len() >= 2).then_some(unique)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_distinct_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        assert_eq!(remove_duplicates(&points), points);
    }

    #[test]
    fn drops_consecutive_duplicates_only() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);
        assert_eq!(remove_duplicates(&[a, a, b, b, b, a]), vec![a, b, a]);
    }

    #[test]
    fn equality_is_exact() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0, 2.0, 3.0 + 1e-9);
        assert_eq!(remove_duplicates(&[a, b]).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(remove_duplicates(&[]).is_empty());
        assert!(sanitize(&[], &Ellipsoid::wgs84()).is_none());
    }

    #[test]
    fn repeated_point_is_insufficient() {
        let e = Ellipsoid::wgs84();
        let points = e.cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -30.0]);
        assert!(sanitize(&points, &e).is_none());
    }

    #[test]
    fn single_point_is_insufficient() {
        let e = Ellipsoid::wgs84();
        let points = e.cartesian_array_from_degrees(&[-72.0, 35.0]);
        assert!(sanitize(&points, &e).is_none());
    }

    #[test]
    fn centre_point_is_insufficient() {
        let e = Ellipsoid::wgs84();
        let mut points = e.cartesian_array_from_degrees(&[10.0, 10.0, 11.0, 10.0]);
        points.push(Point3::origin());
        assert!(sanitize(&points, &e).is_none());
    }

    #[test]
    fn non_finite_point_is_insufficient() {
        let e = Ellipsoid::wgs84();
        let mut points = e.cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -35.0]);
        points.push(Point3::new(f64::INFINITY, 0.0, 0.0));
        assert!(sanitize(&points, &e).is_none());
        points[2] = Point3::new(f64::NAN, 0.0, 0.0);
        assert!(sanitize(&points, &e).is_none());
    }

    #[test]
    fn projects_to_surface() {
        let e = Ellipsoid::wgs84();
        let mut points = e.cartesian_array_from_degrees(&[10.0, 10.0, 11.0, 10.0]);
        points[1] *= 1.001;
        let clean = sanitize(&points, &e).unwrap_or_default();
        assert_eq!(clean.len(), 2);
        let r = e.radii();
        let level = (clean[1].x / r.x).powi(2) + (clean[1].y / r.y).powi(2) + (clean[1].z / r.z).powi(2);
        assert!((level - 1.0).abs() < 1e-9);
    }
}

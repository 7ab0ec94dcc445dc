use crate::error::{GeometryError, Result};
use crate::math::{to_radians, Point3, Vector3, EPSILON12};

/// Squared-norm threshold below which a point is treated as the ellipsoid
/// centre when scaling to the surface.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

/// Iteration cap for the geodetic surface projection.
const MAX_SURFACE_ITERATIONS: usize = 64;

fn is_finite(point: &Point3) -> bool {
    point.iter().all(|c| c.is_finite())
}

/// A geodetic position: longitude and latitude in radians, height in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl Cartographic {
    /// Creates a position from radians.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    /// Creates a position from degrees.
    #[must_use]
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self::new(to_radians(longitude), to_radians(latitude), height)
    }
}

/// A triaxial ellipsoid centred at the origin, `x²/a² + y²/b² + z²/c² = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: Vector3,
    radii_squared: Vector3,
    one_over_radii: Vector3,
    one_over_radii_squared: Vector3,
    maximum_radius: f64,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Ellipsoid {
    /// Semi-axis radii of the WGS84 ellipsoid in meters.
    pub const WGS84_RADII: [f64; 3] = [6_378_137.0, 6_378_137.0, 6_356_752.314_245_179_3];

    /// Creates an ellipsoid from its three semi-axis radii.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if any radius is not a positive
    /// finite number.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        if [x, y, z].iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(GeometryError::Degenerate(format!(
                "ellipsoid radii must be positive, got ({x}, {y}, {z})"
            ))
            .into());
        }
        Ok(Self::from_radii(Vector3::new(x, y, z)))
    }

    /// The WGS84 reference ellipsoid.
    #[must_use]
    pub fn wgs84() -> Self {
        let [x, y, z] = Self::WGS84_RADII;
        Self::from_radii(Vector3::new(x, y, z))
    }

    /// The unit sphere.
    #[must_use]
    pub fn unit_sphere() -> Self {
        Self::from_radii(Vector3::new(1.0, 1.0, 1.0))
    }

    fn from_radii(radii: Vector3) -> Self {
        Self {
            radii,
            radii_squared: radii.component_mul(&radii),
            one_over_radii: radii.map(|r| 1.0 / r),
            one_over_radii_squared: radii.map(|r| 1.0 / (r * r)),
            maximum_radius: radii.max(),
        }
    }

    /// Returns the semi-axis radii.
    #[must_use]
    pub fn radii(&self) -> &Vector3 {
        &self.radii
    }

    /// Returns the largest semi-axis radius.
    #[must_use]
    pub fn maximum_radius(&self) -> f64 {
        self.maximum_radius
    }

    /// Unit normal of the surface passing through `point`, perpendicular to
    /// the ellipsoid level surface.
    ///
    /// The result is NaN for the centre point.
    #[must_use]
    pub fn geodetic_surface_normal(&self, point: &Point3) -> Vector3 {
        point
            .coords
            .component_mul(&self.one_over_radii_squared)
            .normalize()
    }

    /// Unit vector from the centre towards `point`.
    #[must_use]
    pub fn geocentric_surface_normal(&self, point: &Point3) -> Vector3 {
        point.coords.normalize()
    }

    /// Projects `point` onto the surface along the geodetic normal.
    ///
    /// Returns `None` for the centre, where the projection is undefined, and
    /// for points with non-finite coordinates.
    #[must_use]
    pub fn scale_to_geodetic_surface(&self, point: &Point3) -> Option<Point3> {
        if !is_finite(point) {
            return None;
        }

        let inv = &self.one_over_radii;
        let inv2 = &self.one_over_radii_squared;

        let x2 = point.x * point.x * inv.x * inv.x;
        let y2 = point.y * point.y * inv.y * inv.y;
        let z2 = point.z * point.z * inv.z * inv.z;

        let squared_norm = x2 + y2 + z2;
        let ratio = (1.0 / squared_norm).sqrt();
        if !ratio.is_finite() {
            return None;
        }

        // Radial projection; close enough near the centre.
        let intersection = point.coords * ratio;
        if squared_norm < CENTER_TOLERANCE_SQUARED {
            return Some(Point3::from(intersection));
        }

        let gradient = intersection.component_mul(inv2) * 2.0;
        let mut lambda = (1.0 - ratio) * point.coords.norm() / (0.5 * gradient.norm());
        let mut correction = 0.0;
        let mut multiplier = Vector3::new(1.0, 1.0, 1.0);

        for _ in 0..MAX_SURFACE_ITERATIONS {
            lambda -= correction;

            multiplier = inv2.map(|i| 1.0 / (1.0 + lambda * i));
            let m2 = multiplier.component_mul(&multiplier);
            let m3 = m2.component_mul(&multiplier);

            let func = x2 * m2.x + y2 * m2.y + z2 * m2.z - 1.0;
            if func.abs() <= EPSILON12 {
                break;
            }

            let denominator = x2 * m3.x * inv2.x + y2 * m3.y * inv2.y + z2 * m3.z * inv2.z;
            correction = func / (-2.0 * denominator);
        }

        let surface = Point3::from(point.coords.component_mul(&multiplier));
        is_finite(&surface).then_some(surface)
    }

    /// Projects `point` onto the surface along the line through the centre.
    #[must_use]
    pub fn scale_to_geocentric_surface(&self, point: &Point3) -> Option<Point3> {
        let scaled = point.coords.component_mul(&self.one_over_radii);
        let surface = Point3::from(point.coords / scaled.norm());
        is_finite(&surface).then_some(surface)
    }

    /// Moves `point` to `height` meters above the surface along its geodetic
    /// normal. The centre is returned unchanged.
    #[must_use]
    pub fn scale_to_geodetic_height(&self, point: &Point3, height: f64) -> Point3 {
        match self.scale_to_geodetic_surface(point) {
            Some(surface) => surface + self.geodetic_surface_normal(&surface) * height,
            None => *point,
        }
    }

    /// Converts a geodetic position to Cartesian coordinates.
    #[must_use]
    pub fn cartographic_to_cartesian(&self, cartographic: &Cartographic) -> Point3 {
        let cos_lat = cartographic.latitude.cos();
        let n = Vector3::new(
            cos_lat * cartographic.longitude.cos(),
            cos_lat * cartographic.longitude.sin(),
            cartographic.latitude.sin(),
        )
        .normalize();
        let k = self.radii_squared.component_mul(&n);
        let gamma = n.dot(&k).sqrt();
        Point3::from(k / gamma + n * cartographic.height)
    }

    /// Converts a flat `[lon, lat, lon, lat, ...]` list of degrees into
    /// surface points. A trailing unpaired value is ignored.
    #[must_use]
    pub fn cartesian_array_from_degrees(&self, coordinates: &[f64]) -> Vec<Point3> {
        coordinates
            .chunks_exact(2)
            .map(|pair| self.cartographic_to_cartesian(&Cartographic::from_degrees(pair[0], pair[1], 0.0)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn on_surface(ellipsoid: &Ellipsoid, p: &Point3) -> f64 {
        let r = ellipsoid.radii();
        (p.x / r.x).powi(2) + (p.y / r.y).powi(2) + (p.z / r.z).powi(2)
    }

    #[test]
    fn rejects_non_positive_radii() {
        assert!(Ellipsoid::new(1.0, 0.0, 1.0).is_err());
        assert!(Ellipsoid::new(1.0, 1.0, -2.0).is_err());
        assert!(Ellipsoid::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(Ellipsoid::new(1.0, 2.0, 3.0).is_ok());
    }

    #[test]
    fn wgs84_maximum_radius() {
        let e = Ellipsoid::wgs84();
        assert_relative_eq!(e.maximum_radius(), 6_378_137.0);
        assert_eq!(e, Ellipsoid::default());
    }

    #[test]
    fn cartographic_equator_prime_meridian() {
        let e = Ellipsoid::wgs84();
        let p = e.cartographic_to_cartesian(&Cartographic::from_degrees(0.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(6_378_137.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn cartographic_height_moves_along_normal() {
        let e = Ellipsoid::wgs84();
        let base = e.cartographic_to_cartesian(&Cartographic::from_degrees(45.0, 30.0, 0.0));
        let raised = e.cartographic_to_cartesian(&Cartographic::from_degrees(45.0, 30.0, 1000.0));
        assert_relative_eq!((raised - base).norm(), 1000.0, epsilon = 1e-6);
        let normal = e.geodetic_surface_normal(&base);
        assert_relative_eq!((raised - base).normalize(), normal, epsilon = 1e-9);
    }

    #[test]
    fn geodetic_surface_projection_lands_on_surface() {
        let e = Ellipsoid::wgs84();
        let surface = e.cartographic_to_cartesian(&Cartographic::from_degrees(12.0, -40.0, 0.0));
        let normal = e.geodetic_surface_normal(&surface);
        let lifted = surface + normal * 25_000.0;
        let projected = e.scale_to_geodetic_surface(&lifted).unwrap();
        assert_relative_eq!(on_surface(&e, &projected), 1.0, epsilon = 1e-12);
        assert_relative_eq!(projected, surface, epsilon = 1e-5);
    }

    #[test]
    fn centre_cannot_be_projected() {
        let e = Ellipsoid::wgs84();
        assert!(e.scale_to_geodetic_surface(&Point3::origin()).is_none());
        assert!(e.scale_to_geocentric_surface(&Point3::origin()).is_none());
        assert_eq!(e.scale_to_geodetic_height(&Point3::origin(), 10.0), Point3::origin());
    }

    #[test]
    fn non_finite_points_cannot_be_projected() {
        let e = Ellipsoid::wgs84();
        for p in [
            Point3::new(f64::INFINITY, 0.0, 0.0),
            Point3::new(1.0e7, f64::NEG_INFINITY, 0.0),
            Point3::new(1.0e7, 0.0, f64::NAN),
        ] {
            assert!(e.scale_to_geodetic_surface(&p).is_none(), "{p}");
            assert!(e.scale_to_geocentric_surface(&p).is_none(), "{p}");
        }
    }

    #[test]
    fn geocentric_projection_keeps_direction() {
        let e = Ellipsoid::wgs84();
        let p = Point3::new(1.0, 2.0, 3.0);
        let s = e.scale_to_geocentric_surface(&p).unwrap();
        assert_relative_eq!(on_surface(&e, &s), 1.0, epsilon = 1e-12);
        assert_relative_eq!(s.coords.normalize(), p.coords.normalize(), epsilon = 1e-12);
        assert_relative_eq!(e.geocentric_surface_normal(&s), p.coords.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn normals_differ_away_from_equator() {
        let e = Ellipsoid::wgs84();
        let equator = e.cartographic_to_cartesian(&Cartographic::from_degrees(10.0, 0.0, 0.0));
        assert_relative_eq!(
            e.geodetic_surface_normal(&equator),
            e.geocentric_surface_normal(&equator),
            epsilon = 1e-12
        );
        let mid = e.cartographic_to_cartesian(&Cartographic::from_degrees(10.0, 45.0, 0.0));
        let gap = (e.geodetic_surface_normal(&mid) - e.geocentric_surface_normal(&mid)).norm();
        assert!(gap > 1e-3);
    }

    #[test]
    fn geodetic_height_round_trip() {
        let e = Ellipsoid::wgs84();
        let surface = e.cartographic_to_cartesian(&Cartographic::from_degrees(90.0, -30.0, 0.0));
        let raised = e.scale_to_geodetic_height(&surface, 500.0);
        let expected = e.cartographic_to_cartesian(&Cartographic::from_degrees(90.0, -30.0, 500.0));
        assert_relative_eq!(raised, expected, epsilon = 1e-6);
    }

    #[test]
    fn degree_array_pairs_coordinates() {
        let e = Ellipsoid::wgs84();
        let points = e.cartesian_array_from_degrees(&[90.0, -30.0, 90.0, -35.0, 1.0]);
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_relative_eq!(on_surface(&e, p), 1.0, epsilon = 1e-12);
        }
    }
}

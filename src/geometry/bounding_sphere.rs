use crate::math::{Point3, TOLERANCE};

/// A sphere enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3,
    pub radius: f64,
}

impl BoundingSphere {
    /// Computes a tight (not minimal) sphere around `points`.
    ///
    /// Runs one Ritter pass seeded by the widest axis-extreme pair and also
    /// takes the sphere around the axis-aligned box; the smaller wins.
    /// An empty slice yields a zero sphere at the origin.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                center: Point3::origin(),
                radius: 0.0,
            };
        };

        let mut min_pts = [*first; 3];
        let mut max_pts = [*first; 3];
        for p in points {
            for axis in 0..3 {
                if p[axis] < min_pts[axis][axis] {
                    min_pts[axis] = *p;
                }
                if p[axis] > max_pts[axis][axis] {
                    max_pts[axis] = *p;
                }
            }
        }

        let mut widest = 0;
        let mut widest_span = -1.0;
        for axis in 0..3 {
            let span = (max_pts[axis] - min_pts[axis]).norm_squared();
            if span > widest_span {
                widest_span = span;
                widest = axis;
            }
        }

        let mut ritter_center = nalgebra::center(&min_pts[widest], &max_pts[widest]);
        let mut ritter_radius = (max_pts[widest] - ritter_center).norm();

        let box_min = Point3::new(min_pts[0].x, min_pts[1].y, min_pts[2].z);
        let box_max = Point3::new(max_pts[0].x, max_pts[1].y, max_pts[2].z);
        let naive_center = nalgebra::center(&box_min, &box_max);
        let mut naive_radius: f64 = 0.0;

        for p in points {
            naive_radius = naive_radius.max((p - naive_center).norm());

            let distance = (p - ritter_center).norm();
            if distance > ritter_radius + TOLERANCE {
                ritter_radius = (ritter_radius + distance) * 0.5;
                let shift = distance - ritter_radius;
                ritter_center = Point3::from(
                    (ritter_center.coords * ritter_radius + p.coords * shift) / distance,
                );
            }
        }

        if ritter_radius < naive_radius {
            Self {
                center: ritter_center,
                radius: ritter_radius,
            }
        } else {
            Self {
                center: naive_center,
                radius: naive_radius,
            }
        }
    }

    /// Returns `true` if `point` lies inside or on the sphere, within `tolerance`.
    #[must_use]
    pub fn contains(&self, point: &Point3, tolerance: f64) -> bool {
        (point - self.center).norm() <= self.radius + tolerance
    }
}

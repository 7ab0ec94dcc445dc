use crate::geometry::Ellipsoid;
use crate::math::Point3;

use super::CornerType;

/// Construction options for a [`CorridorOutlineGeometry`](super::CorridorOutlineGeometry).
///
/// `positions` and `width` are required; everything else falls back to a
/// default when left `None`.
#[derive(Debug, Clone, Default)]
pub struct CorridorOutlineOptions {
    /// Centerline points, on or near the ellipsoid surface.
    pub positions: Option<Vec<Point3>>,
    /// Distance between the two corridor edges, in meters.
    pub width: Option<f64>,
    /// Corner style. Defaults to [`CornerType::Mitered`].
    pub corner_type: Option<CornerType>,
    /// Angular distance in radians between centerline samples. Defaults to
    /// one degree.
    pub granularity: Option<f64>,
    /// Elevation of the outline above the surface. Defaults to zero.
    pub height: Option<f64>,
    /// Second elevation; when set the outline becomes a prism outline.
    pub extruded_height: Option<f64>,
    /// Reference ellipsoid. Defaults to WGS84.
    pub ellipsoid: Option<Ellipsoid>,
}

impl CorridorOutlineOptions {
    /// Options with the two required fields set.
    #[must_use]
    pub fn new(positions: Vec<Point3>, width: f64) -> Self {
        Self {
            positions: Some(positions),
            width: Some(width),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_corner_type(mut self, corner_type: CornerType) -> Self {
        self.corner_type = Some(corner_type);
        self
    }

    #[must_use]
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = Some(granularity);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_extruded_height(mut self, extruded_height: f64) -> Self {
        self.extruded_height = Some(extruded_height);
        self
    }

    #[must_use]
    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = Some(ellipsoid);
        self
    }
}

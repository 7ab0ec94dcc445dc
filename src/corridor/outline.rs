use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::geometry::Ellipsoid;
use crate::math::{Point3, RADIANS_PER_DEGREE};

use super::assemble::OutlineLoop;
use super::centerline::{walk, WalkParams};
use super::extrude::extrude;
use super::mesh::OutlineMesh;
use super::options::CorridorOutlineOptions;
use super::sanitize::sanitize;
use super::CornerType;

/// Validated description of a corridor outline.
///
/// Building one only checks that the required options are present; whether
/// the corridor actually has any geometry is decided by
/// [`create_geometry`](Self::create_geometry).
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorOutlineGeometry {
    pub(crate) positions: Vec<Point3>,
    pub(crate) width: f64,
    pub(crate) corner_type: CornerType,
    pub(crate) granularity: f64,
    pub(crate) height: f64,
    pub(crate) extruded_height: Option<f64>,
    pub(crate) ellipsoid: Ellipsoid,
}

impl CorridorOutlineGeometry {
    /// Default angular distance between centerline samples: one degree.
    pub const DEFAULT_GRANULARITY: f64 = RADIANS_PER_DEGREE;

    /// Builds the geometry description from `options`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingPositions`] / [`ConfigError::MissingWidth`] if
    ///   a required option is absent
    /// - [`ConfigError::InvalidGranularity`] if granularity is not a positive
    ///   finite number
    /// - [`ConfigError::InvalidExtrudedHeight`] if the extruded height is not
    ///   finite
    pub fn new(options: CorridorOutlineOptions) -> Result<Self> {
        let positions = options.positions.ok_or(ConfigError::MissingPositions)?;
        let width = options.width.ok_or(ConfigError::MissingWidth)?;
        let granularity = options.granularity.unwrap_or(Self::DEFAULT_GRANULARITY);
        validate(granularity, options.extruded_height)?;

        Ok(Self {
            positions,
            width,
            corner_type: options.corner_type.unwrap_or_default(),
            granularity,
            height: options.height.unwrap_or(0.0),
            extruded_height: options.extruded_height,
            ellipsoid: options.ellipsoid.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn corner_type(&self) -> CornerType {
        self.corner_type
    }

    #[must_use]
    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Second elevation, `None` for a flat outline.
    #[must_use]
    pub fn extruded_height(&self) -> Option<f64> {
        self.extruded_height
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Computes the outline mesh.
    ///
    /// Returns `None` when there is nothing to draw: fewer than two distinct
    /// positions, a width that is not positive, or a centerline whose
    /// directions cannot be resolved.
    #[must_use]
    pub fn create_geometry(&self) -> Option<OutlineMesh> {
        create_geometry(self)
    }
}

/// Checks the options shared by construction and unpacking.
pub(crate) fn validate(granularity: f64, extruded_height: Option<f64>) -> Result<()> {
    if !granularity.is_finite() || granularity <= 0.0 {
        return Err(ConfigError::InvalidGranularity(granularity).into());
    }
    if let Some(h) = extruded_height.filter(|h| !h.is_finite()) {
        return Err(ConfigError::InvalidExtrudedHeight(h).into());
    }
    Ok(())
}

/// Computes the outline mesh for `geometry`.
///
/// Pipeline: surface projection and duplicate removal, centerline walk with
/// corner resolution, loop assembly, then either lifting to the base height
/// or extrusion between the two heights.
#[must_use]
pub fn create_geometry(geometry: &CorridorOutlineGeometry) -> Option<OutlineMesh> {
    let ellipsoid = &geometry.ellipsoid;

    let Some(positions) = sanitize(&geometry.positions, ellipsoid) else {
        debug!(
            input = geometry.positions.len(),
            "corridor has fewer than two distinct positions"
        );
        return None;
    };

    if !geometry.width.is_finite() || geometry.width <= 0.0 {
        debug!(width = geometry.width, "corridor width is not a positive finite number");
        return None;
    }

    if !geometry.height.is_finite() {
        debug!(height = geometry.height, "corridor height is not finite");
        return None;
    }

    let params = WalkParams {
        ellipsoid,
        half_width: geometry.width * 0.5,
        corner_type: geometry.corner_type,
        granularity: geometry.granularity,
    };
    let Some(sides) = walk(&positions, &params) else {
        debug!("corridor centerline could not be resolved");
        return None;
    };

    let mesh = OutlineLoop::assemble(&sides).and_then(|outline| match geometry.extruded_height {
        Some(extruded_height) => extrude(&outline, geometry.height, extruded_height, ellipsoid),
        None => Some(outline.into_mesh(geometry.height, ellipsoid)),
    });
    let Some(mesh) = mesh else {
        debug!("corridor outline has too many vertices to index");
        return None;
    };

    debug!(
        corner_type = ?geometry.corner_type,
        corners = sides.corners.len(),
        vertices = mesh.vertex_count(),
        segments = mesh.segment_count(),
        "built corridor outline"
    );
    Some(mesh)
}

use crate::geometry::BoundingSphere;
use crate::math::Point3;

/// Line-list outline of a corridor.
///
/// Each index pair is one rendered line segment between two entries of
/// `positions`.
#[derive(Debug, Clone)]
pub struct OutlineMesh {
    /// Vertex positions in emission order.
    pub positions: Vec<Point3>,
    /// Line segments as index pairs into `positions`.
    pub indices: Vec<[u32; 2]>,
    /// Sphere enclosing every vertex.
    pub bounding_sphere: BoundingSphere,
}

impl OutlineMesh {
    /// Wraps vertex and segment buffers, deriving the bounding sphere.
    #[must_use]
    pub fn new(positions: Vec<Point3>, indices: Vec<[u32; 2]>) -> Self {
        let bounding_sphere = BoundingSphere::from_points(&positions);
        Self {
            positions,
            indices,
            bounding_sphere,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of line segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.indices.len()
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` buffer.
    #[must_use]
    pub fn flat_positions(&self) -> Vec<f64> {
        self.positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Indices as a flat `[a, b, a, b, ...]` buffer.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}

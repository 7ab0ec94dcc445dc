use crate::geometry::Ellipsoid;

use super::assemble::OutlineLoop;
use super::mesh::OutlineMesh;

/// Raises a flat outline loop into a prism outline.
///
/// Vertices are the loop at the upper elevation followed by the loop at the
/// lower elevation. Segments are the upper loop, the lower loop, then one
/// vertical edge per wall vertex of the loop.
///
/// Returns `None` when the doubled vertex count does not fit a `u32` index.
pub(crate) fn extrude(
    outline: &OutlineLoop,
    height: f64,
    extruded_height: f64,
    ellipsoid: &Ellipsoid,
) -> Option<OutlineMesh> {
    let count = outline.vertex_count();
    if count.checked_mul(2).is_none() {
        return None;
    }

    let top = height.max(extruded_height);
    let bottom = height.min(extruded_height);

    let mut positions = outline.lifted(top, ellipsoid);
    positions.extend(outline.lifted(bottom, ellipsoid));

    let edges = outline.edges();

    let mut indices = Vec::with_capacity(edges.len() * 2 + outline.walls.len());
    indices.extend_from_slice(&edges);
    indices.extend(edges.iter().map(|[a, b]| [a + count, b + count]));
    indices.extend(outline.walls.iter().map(|w| [*w, w + count]));

    Some(OutlineMesh::new(positions, indices))
}

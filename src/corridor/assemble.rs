use crate::geometry::Ellipsoid;
use crate::math::Point3;

use super::centerline::CorridorSides;
use super::corner::{Side, WallPoint};
use super::mesh::OutlineMesh;

/// One side of the corridor boundary, in walking order.
#[derive(Debug, Default)]
struct SideChain {
    points: Vec<Point3>,
    /// Offsets into `points` that get a vertical edge when extruded.
    walls: Vec<usize>,
}

impl SideChain {
    fn last_index(&self) -> usize {
        self.points.len() - 1
    }
}

/// The flat corridor boundary as a single closed loop on the surface.
///
/// Edge `i` joins loop vertices `i` and `i + 1`, wrapping at the end, so the
/// segment count equals the vertex count.
#[derive(Debug, Clone)]
pub(crate) struct OutlineLoop {
    pub positions: Vec<Point3>,
    /// Loop vertices that get a vertical edge when extruded.
    pub walls: Vec<u32>,
    count: u32,
}

impl OutlineLoop {
    /// Stitches offset runs, corners and caps into one loop: start cap,
    /// right side forwards, end cap, left side backwards.
    ///
    /// Returns `None` when the loop has more vertices than a `u32` index can
    /// address.
    pub fn assemble(sides: &CorridorSides) -> Option<Self> {
        let mut right = SideChain::default();
        let mut left = SideChain::default();

        if let Some(first) = sides.runs.first() {
            right.points.extend_from_slice(&first.right);
            left.points.extend_from_slice(&first.left);
            right.walls.push(0);
            left.walls.push(0);
        }

        for (corner, run) in sides.corners.iter().zip(sides.runs.iter().skip(1)) {
            let (outer, inner, outer_run, inner_run) = match corner.outside {
                Side::Left => (&mut left, &mut right, &run.left, &run.right),
                Side::Right => (&mut right, &mut left, &run.right, &run.left),
            };

            // The inner side pivots on the point shared by both runs, or on
            // the incoming end when the runs do not meet.
            inner.walls.push(inner.last_index());
            let inner_skip = usize::from(!corner.split_inner);
            inner.points.extend_from_slice(&inner_run[inner_skip..]);

            let incoming_end = outer.last_index();
            let base = outer.points.len();
            outer.points.extend_from_slice(&corner.points);
            for wall in corner.outer_walls() {
                outer.walls.push(match wall {
                    WallPoint::IncomingEnd => incoming_end,
                    WallPoint::Point(offset) => base + offset,
                });
            }

            // The outgoing run starts where the corner ended.
            outer.points.extend_from_slice(&outer_run[1..]);
        }

        right.walls.push(right.last_index());
        left.walls.push(left.last_index());

        let cap_len = sides
            .end_caps
            .as_ref()
            .map_or(0, |[start, end]| start.len() + end.len() - 2);
        let mut positions = Vec::with_capacity(right.points.len() + left.points.len() + cap_len);
        let mut walls = Vec::with_capacity(right.walls.len() + left.walls.len() + 2);

        let (start_cap, end_cap) = match &sides.end_caps {
            Some([start, end]) => (cap_interior(start), cap_interior(end)),
            None => (&[][..], &[][..]),
        };

        if !start_cap.is_empty() {
            walls.push(start_cap.len() / 2);
            positions.extend_from_slice(start_cap);
        }

        let right_base = positions.len();
        positions.extend_from_slice(&right.points);
        walls.extend(right.walls.iter().map(|w| right_base + w));

        if !end_cap.is_empty() {
            walls.push(positions.len() + end_cap.len() / 2);
            positions.extend_from_slice(end_cap);
        }

        let left_base = positions.len();
        let left_last = left.last_index();
        positions.extend(left.points.iter().rev());
        walls.extend(left.walls.iter().map(|w| left_base + (left_last - w)));

        let count = u32::try_from(positions.len()).ok()?;
        let walls = walls
            .into_iter()
            .map(|w| u32::try_from(w).ok())
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            positions,
            walls,
            count,
        })
    }

    /// Number of loop vertices.
    pub fn vertex_count(&self) -> u32 {
        self.count
    }

    /// Closed-loop edges.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let n = self.count;
        (0..n).map(|i| [i, (i + 1) % n]).collect()
    }

    /// Lifts the loop to `height` above the surface.
    pub fn lifted(&self, height: f64, ellipsoid: &Ellipsoid) -> Vec<Point3> {
        self.positions
            .iter()
            .map(|p| ellipsoid.scale_to_geodetic_height(p, height))
            .collect()
    }

    /// The flat outline mesh at `height`.
    pub fn into_mesh(self, height: f64, ellipsoid: &Ellipsoid) -> OutlineMesh {
        let edges = self.edges();
        OutlineMesh::new(self.lifted(height, ellipsoid), edges)
    }
}

/// Cap points strictly between the two side points it joins. The last swept
/// point duplicates the side point the cap closes onto.
fn cap_interior(cap: &[Point3]) -> &[Point3] {
    &cap[..cap.len().saturating_sub(1)]
}

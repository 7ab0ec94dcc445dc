use tracing::trace;

use crate::geometry::surface_arc::{generate_arc, segment_count};
use crate::geometry::Ellipsoid;
use crate::math::vector_3d::normalize;
use crate::math::{chord_length, Point3, Vector3};

use super::corner::{sweep_arc, Corner, CornerFrame, CornerType, Join, Side, Turn};

/// Ratio between the rounded-corner sweep step and the centerline granularity.
///
/// At the default one-degree granularity corners and caps step by 5°.
pub(crate) const CORNER_STEP_FACTOR: f64 = 5.0;

/// Parameters for walking one sanitized centerline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkParams<'a> {
    pub ellipsoid: &'a Ellipsoid,
    pub half_width: f64,
    pub corner_type: CornerType,
    pub granularity: f64,
}

impl WalkParams<'_> {
    fn corner_step(&self) -> f64 {
        self.granularity * CORNER_STEP_FACTOR
    }
}

/// Matching right and left offset points of one corridor run (the stretch
/// between two corners), both in walking order.
#[derive(Debug, Clone, Default)]
pub(crate) struct SideEdges {
    pub right: Vec<Point3>,
    pub left: Vec<Point3>,
}

/// Everything the assembler needs to stitch the outline.
///
/// `runs.len() == corners.len() + 1`; corner `i` sits between runs `i` and
/// `i + 1`.
#[derive(Debug, Clone)]
pub(crate) struct CorridorSides {
    pub runs: Vec<SideEdges>,
    pub corners: Vec<Corner>,
    /// Swept points of the start and end caps, present for rounded corridors.
    /// Each ends with the point it closes onto.
    pub end_caps: Option<[Vec<Point3>; 2]>,
}

/// Walks a sanitized centerline (at least two distinct surface points),
/// offsetting each run by half the width to both sides and resolving each
/// corner.
///
/// Returns `None` when a direction cannot be formed, e.g. a segment running
/// along the surface normal.
pub(crate) fn walk(positions: &[Point3], params: &WalkParams<'_>) -> Option<CorridorSides> {
    let ellipsoid = params.ellipsoid;
    let half_width = params.half_width;

    let (first, rest) = positions.split_first()?;
    let mut position = *rest.first()?;
    let mut forward = normalize(&(position - first))?;
    let mut left = normalize(&ellipsoid.geodetic_surface_normal(first).cross(&forward))?;
    let mut backward = -forward;
    let mut previous = *first;

    let mut runs = Vec::with_capacity(positions.len() - 1);
    let mut corners = Vec::new();

    for next in &rest[1..] {
        let normal = ellipsoid.geodetic_surface_normal(&position);
        forward = normalize(&(next - position))?;

        if let Some(turn) = Turn::detect(&forward, &backward, &normal, half_width) {
            // Runs end one half width outward of the pivot, so their inner
            // sides meet on it. Sharp turns pivot on the centerline itself.
            let (inner, shift) = match turn.join {
                Join::Inner(offset) => (position + offset, half_width),
                Join::Pivot => (position, 0.0),
            };
            let outward = outward_unit(&left, turn.outside);
            runs.push(offset_run(&previous, &(inner + outward * shift), &left, params)?);

            let start = inner + outward * (shift + half_width);
            left = normalize(&normal.cross(&forward))?;
            let outward = outward_unit(&left, turn.outside);
            let end = inner + outward * (shift + half_width);
            previous = inner + outward * shift;

            let frame = CornerFrame {
                position,
                inner,
                start,
                end,
            };
            let corner = Corner::resolve(
                params.corner_type,
                &turn,
                &frame,
                ellipsoid,
                params.corner_step(),
            )?;
            trace!(
                outside = ?corner.outside,
                sharp = corner.split_inner,
                points = corner.points.len(),
                "resolved corner"
            );
            corners.push(corner);
            backward = -forward;
        }
        position = *next;
    }

    runs.push(offset_run(&previous, &position, &left, params)?);

    let end_caps = if params.corner_type == CornerType::Rounded {
        Some(end_caps(&runs, ellipsoid, params.corner_step())?)
    } else {
        None
    };

    Some(CorridorSides {
        runs,
        corners,
        end_caps,
    })
}

/// Unit vector from the inner side towards the outer side of a turn.
fn outward_unit(left: &Vector3, outside: Side) -> Vector3 {
    match outside {
        Side::Left => *left,
        Side::Right => -left,
    }
}

/// Subdivides the centerline from `start` to `end` and shifts every point
/// by `±half_width` along the run's `left` direction.
///
/// Returns `None` when the run would need more samples than a `u32` index
/// can address.
fn offset_run(
    start: &Point3,
    end: &Point3,
    left: &Vector3,
    params: &WalkParams<'_>,
) -> Option<SideEdges> {
    let min_distance = chord_length(params.granularity, params.ellipsoid.maximum_radius());
    u32::try_from(segment_count(start, end, min_distance)).ok()?;

    let centerline = generate_arc(start, end, params.granularity, params.ellipsoid);
    let shift = left * params.half_width;
    Some(SideEdges {
        right: centerline.iter().map(|p| p - shift).collect(),
        left: centerline.iter().map(|p| p + shift).collect(),
    })
}

/// Semicircular caps closing both ends of a rounded corridor.
///
/// The start cap sweeps from the first left point round the back to the
/// first right point; the end cap from the last right point round the front
/// to the last left point.
fn end_caps(runs: &[SideEdges], ellipsoid: &Ellipsoid, step: f64) -> Option<[Vec<Point3>; 2]> {
    let first = runs.first()?;
    let last = runs.last()?;
    let start_cap = half_turn(first.left.first()?, first.right.first()?, ellipsoid, step)?;
    let end_cap = half_turn(last.right.last()?, last.left.last()?, ellipsoid, step)?;
    Some([start_cap, end_cap])
}

fn half_turn(from: &Point3, to: &Point3, ellipsoid: &Ellipsoid, step: f64) -> Option<Vec<Point3>> {
    let pivot = nalgebra::center(from, to);
    let up = ellipsoid.geodetic_surface_normal(&pivot);
    sweep_arc(&pivot, from, to, &up, step)
}

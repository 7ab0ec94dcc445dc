use crate::geometry::Ellipsoid;
use crate::math::vector_3d::{angle_between, normalize, project_onto_plane, rotate_about_axis};
use crate::math::{Point3, Vector3, EPSILON7};

/// When the miter scale (`1 / sin` of the half interior angle) exceeds this
/// limit, the corner pivots on the centerline point instead of the inner
/// intersection and the outer side is bevelled.
const BEVEL_THRESHOLD: f64 = 2.0;

/// Slack subtracted from `angle / step` before rounding up, so a sweep that
/// is an exact multiple of the step does not gain a point from rounding noise.
const ARC_STEP_SLACK: f64 = 1e-9;

/// How the corridor boundary is shaped where the centerline changes direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CornerType {
    /// Outer corner swept as a circular arc around the inner pivot; corridor
    /// ends are closed with semicircular caps.
    Rounded,
    /// Outer corner extended to the intersection of the two offset lines.
    #[default]
    Mitered,
    /// Outer corner cut by a straight edge between the two offset lines.
    Beveled,
}

impl CornerType {
    /// Numeric code used in packed parameter buffers.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Rounded => 0,
            Self::Mitered => 1,
            Self::Beveled => 2,
        }
    }

    /// Inverse of [`CornerType::code`]. Non-integral or unknown codes yield `None`.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(Self::Rounded)
        } else if code == 1.0 {
            Some(Self::Mitered)
        } else if code == 2.0 {
            Some(Self::Beveled)
        } else {
            None
        }
    }
}

/// Side of the corridor relative to the walking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Where the two runs meeting at a corner are joined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Join {
    /// Both inner offset lines meet; the vector runs from the centerline
    /// point to that intersection.
    Inner(Vector3),
    /// Turn too sharp for an intersection: both runs end on the centerline
    /// point and each side keeps its own offset points.
    Pivot,
}

/// A change of direction at an interior centerline point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Turn {
    pub join: Join,
    /// Side on the outside of the turn.
    pub outside: Side,
}

impl Turn {
    /// Detects a turn between the incoming (`backward`, pointing back along
    /// the previous segment) and outgoing (`forward`) unit directions.
    ///
    /// Returns `None` for a straight join or a full reversal, where no
    /// corner geometry is emitted.
    pub fn detect(
        forward: &Vector3,
        backward: &Vector3,
        normal: &Vector3,
        half_width: f64,
    ) -> Option<Self> {
        let forward_projection = project_onto_plane(forward, normal)?;
        let backward_projection = project_onto_plane(backward, normal)?;
        let alignment = forward_projection.dot(&backward_projection).abs();
        if (alignment - 1.0).abs() <= EPSILON7 {
            return None;
        }

        let outside = if normal.dot(&backward.cross(forward)) >= 0.0 {
            Side::Left
        } else {
            Side::Right
        };

        let bisector = normalize(&(forward + backward))?;
        let bisector = project_onto_plane(&bisector, normal)?;
        let sine = bisector.cross(backward).norm();
        let join = if sine * BEVEL_THRESHOLD < 1.0 {
            Join::Pivot
        } else {
            Join::Inner(bisector * (half_width / sine))
        };

        Some(Self { join, outside })
    }

    pub fn is_sharp(&self) -> bool {
        self.join == Join::Pivot
    }
}

/// Points that fix the geometry of one corner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CornerFrame {
    /// Centerline point of the corner.
    pub position: Point3,
    /// Pivot of the corner: the inner intersection, or the centerline point
    /// for sharp turns.
    pub inner: Point3,
    /// End of the incoming outer offset line.
    pub start: Point3,
    /// Start of the outgoing outer offset line.
    pub end: Point3,
}

/// Outer point of a corner that receives a vertical edge when extruded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WallPoint {
    /// The end of the incoming outer offset line, emitted before the corner.
    IncomingEnd,
    /// An index into [`Corner::points`].
    Point(usize),
}

/// Outer-side boundary points produced for one corner, in walking order.
///
/// The list always ends with the start of the outgoing outer offset line;
/// consecutive points (and the incoming outer end before the first) are
/// joined by outline edges.
#[derive(Debug, Clone)]
pub(crate) struct Corner {
    pub style: CornerType,
    pub outside: Side,
    pub points: Vec<Point3>,
    /// The inner side keeps both runs' end points instead of sharing one.
    pub split_inner: bool,
}

impl Corner {
    /// Resolves the outer boundary of a corner for the given style.
    ///
    /// `step` is the angular step of rounded sweeps.
    pub fn resolve(
        style: CornerType,
        turn: &Turn,
        frame: &CornerFrame,
        ellipsoid: &Ellipsoid,
        step: f64,
    ) -> Option<Self> {
        let points = match (style, turn.join) {
            (CornerType::Mitered, Join::Inner(offset)) => vec![frame.position - offset, frame.end],
            (CornerType::Mitered | CornerType::Beveled, _) => vec![frame.end],
            (CornerType::Rounded, _) => {
                let up = ellipsoid.geodetic_surface_normal(&frame.inner);
                let axis = match turn.outside {
                    Side::Left => -up,
                    Side::Right => up,
                };
                sweep_arc(&frame.inner, &frame.start, &frame.end, &axis, step)?
            }
        };

        Some(Self {
            style,
            outside: turn.outside,
            points,
            split_inner: turn.is_sharp(),
        })
    }

    /// Outer points that receive a vertical edge when extruded.
    pub fn outer_walls(&self) -> Vec<WallPoint> {
        match self.style {
            CornerType::Rounded => vec![WallPoint::Point(self.points.len() / 2)],
            CornerType::Mitered if !self.split_inner => vec![WallPoint::Point(0)],
            CornerType::Mitered | CornerType::Beveled => {
                vec![WallPoint::IncomingEnd, WallPoint::Point(0)]
            }
        }
    }
}

/// Number of points swept for `angle` at `step`: `ceil(angle / step) + 1`,
/// never fewer than two.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(crate) fn arc_point_count(angle: f64, step: f64) -> usize {
    let steps = (angle / step - ARC_STEP_SLACK).ceil();
    if steps.is_finite() && steps >= 1.0 {
        steps as usize + 1
    } else {
        2
    }
}

/// Rotates `start` about `pivot` towards `end` in equal increments around
/// `axis`, returning the swept points after `start`. The final point is
/// exactly `end`.
///
/// Returns `None` for a zero axis, or when the sweep needs more points than
/// a `u32` index can address.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn sweep_arc(
    pivot: &Point3,
    start: &Point3,
    end: &Point3,
    axis: &Vector3,
    step: f64,
) -> Option<Vec<Point3>> {
    let from = start - pivot;
    let angle = angle_between(&from, &(end - pivot));
    let count = arc_point_count(angle, step);
    u32::try_from(count).ok()?;
    let increment = angle / count as f64;

    let mut points = Vec::with_capacity(count);
    for i in 1..count {
        let rotated = rotate_about_axis(&from, axis, increment * i as f64)?;
        points.push(pivot + rotated);
    }
    points.push(*end);
    Some(points)
}

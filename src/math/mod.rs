pub mod vector_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// `1e-7`
pub const EPSILON7: f64 = 1e-7;

/// `1e-12`
pub const EPSILON12: f64 = 1e-12;

/// One degree in radians.
pub const RADIANS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Converts degrees to radians.
#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * RADIANS_PER_DEGREE
}

/// Length of the chord subtending `angle` on a circle of `radius`.
#[must_use]
pub fn chord_length(angle: f64, radius: f64) -> f64 {
    2.0 * radius * (angle * 0.5).sin()
}

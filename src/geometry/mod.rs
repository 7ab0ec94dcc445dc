pub mod bounding_sphere;
pub mod ellipsoid;
pub mod surface_arc;

pub use bounding_sphere::BoundingSphere;
pub use ellipsoid::{Cartographic, Ellipsoid};

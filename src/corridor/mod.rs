//! Corridor outline generation.
//!
//! A corridor is a fixed-width band following a polyline on the ellipsoid.
//! [`CorridorOutlineGeometry`] describes one; [`create_geometry`] turns it
//! into an [`OutlineMesh`] of line segments tracing the band boundary, and
//! optionally the vertical edges of its extrusion.

mod assemble;
mod centerline;
pub mod codec;
mod corner;
mod extrude;
mod mesh;
mod options;
mod outline;
mod sanitize;

pub use codec::Packable;
pub use corner::CornerType;
pub use mesh::OutlineMesh;
pub use options::CorridorOutlineOptions;
pub use outline::{create_geometry, CorridorOutlineGeometry};
pub use sanitize::{remove_duplicates, sanitize};

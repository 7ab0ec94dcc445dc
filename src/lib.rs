pub mod corridor;
pub mod error;
pub mod geometry;
pub mod math;

pub use corridor::{
    create_geometry, CornerType, CorridorOutlineGeometry, CorridorOutlineOptions, OutlineMesh,
    Packable,
};
pub use error::{CorridorError, Result};

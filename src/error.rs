use thiserror::Error;

/// Top-level error type for corridor outline construction and transfer.
#[derive(Debug, Error)]
pub enum CorridorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Fatal errors raised while building a corridor outline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("positions are required")]
    MissingPositions,

    #[error("width is required")]
    MissingWidth,

    #[error("granularity must be a positive finite number, got {0}")]
    InvalidGranularity(f64),

    #[error("extruded height must be finite, got {0}")]
    InvalidExtrudedHeight(f64),
}

/// Errors related to geometric collaborators.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while reading a packed parameter buffer.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("packed buffer too short: need {needed} slots from offset {offset}, {available} available")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid point count slot: {0}")]
    InvalidPointCount(f64),

    #[error("unknown corner type code: {0}")]
    UnknownCornerType(f64),
}

/// Convenience type alias for results using [`CorridorError`].
pub type Result<T> = std::result::Result<T, CorridorError>;

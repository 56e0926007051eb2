// Copyright @yucwang 2026

use crate::math::constants::Float;
use thiserror::Error;

/// Rejected scene configuration. Raised when a value is built, never while
/// tracing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("circle radius must be positive and finite, got {0}")]
    DegenerateCircle(Float),
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon encloses no area")]
    ZeroAreaPolygon,
    #[error("polygon edges {0} and {1} cross each other")]
    SelfIntersectingPolygon(usize, usize),
    #[error("polygon reference point index {index} out of range for {len} vertices")]
    ReferencePointOutOfRange { index: usize, len: usize },
    #[error("prism size must be positive and finite, got {0}")]
    InvalidPrismSize(Float),
    #[error("coordinates must be finite")]
    NonFiniteCoordinate,
    #[error("index of refraction must be at least 1, got {0}")]
    NonPhysicalIndex(Float),
    #[error("wavelength {0} nm is outside the visible range")]
    WavelengthOutOfRange(Float),
    #[error("scene bounds must have positive finite extent")]
    InvalidBounds,
    #[error("probe diameter must be positive and finite, got {0}")]
    InvalidProbeDiameter(Float),
    #[error("power cutoff must lie in [0, 1), got {0}")]
    InvalidPowerCutoff(Float),
    #[error("laser power must lie in (0, 1], got {0}")]
    InvalidLaserPower(Float),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

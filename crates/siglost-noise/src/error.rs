use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing factor must lie in (0, 1], got {0}")]
    SmoothingOutOfRange(f32),
    #[error("{name} floor must lie in [0, 1], got {value}")]
    FloorOutOfRange { name: &'static str, value: f32 },
    #[error("intensity bounds must satisfy 0 <= min < max <= 1, got [{min}, {max}]")]
    InvalidBounds { min: f32, max: f32 },
    #[error("static intensity must lie in [0, 1], got {0}")]
    IntensityOutOfRange(f32),
    #[error("a noise bank needs at least one entity")]
    NoEntities,
    #[error("static field must be at least 1x1 pixels, got {width}x{height}")]
    EmptyField { width: u32, height: u32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

use thiserror::Error;

/// Rejected construction parameters.
///
/// Every runtime input (deltas, strengths, message text) is clamped or
/// skipped instead, so this is the only error the crate produces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("morse unit must be a positive number of seconds, got {0}")]
    NonPositiveUnit(f32),
    #[error("history retention window must be positive, got {0}")]
    NonPositiveRetention(f32),
    #[error("mark widths must be positive, got dot {dot} and dash {dash}")]
    NonPositiveWidth { dot: f32, dash: f32 },
    #[error("signal gate threshold must lie in [0, 1), got {0}")]
    GateOutOfRange(f32),
}

//! Orbit control errors

use thiserror::Error;

/// Reasons the orbit controls refuse to attach
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlsError {
    #[error("no camera carries an orbit controller")]
    MissingCamera,

    #[error("viewport has no usable area ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },

    #[error("invalid distance bounds: min {min}, max {max}")]
    InvalidDistanceBounds { min: f32, max: f32 },

    #[error("damping factor must lie in (0, 1], got {0}")]
    InvalidDampingFactor(f32),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },

    #[error("camera position or target is not finite")]
    NonFiniteCamera,
}

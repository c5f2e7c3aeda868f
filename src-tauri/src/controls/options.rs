//! Orbit control settings

use serde::{Deserialize, Serialize};

use super::error::ControlsError;
use super::spherical::DistanceBounds;

/// How pointer travel turns into rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum RotateScaling {
    /// A drag across the full viewport turns the view by 2π
    ViewportRelative,
    /// Fixed radians per pixel, independent of viewport size
    RadiansPerPixel(f32),
}

impl Default for RotateScaling {
    fn default() -> Self {
        Self::ViewportRelative
    }
}

/// Tunables for [`OrbitControls`](super::OrbitControls)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControlsConfig {
    pub enable_rotate: bool,
    pub rotate_speed: f32,
    pub rotate_scaling: RotateScaling,

    pub enable_zoom: bool,
    /// One dolly step scales the distance by `1 + zoom_speed`
    pub zoom_speed: f32,

    pub enable_pan: bool,
    pub pan_speed: f32,
    /// Pixels panned per arrow key press
    pub key_pan_speed: f32,

    pub min_distance: f32,
    /// `null` in JSON means unbounded
    #[serde(with = "unbounded")]
    pub max_distance: f32,

    pub enable_damping: bool,
    /// Fraction of pending motion applied per frame while damping
    pub damping_factor: f32,
}

impl Default for OrbitControlsConfig {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            rotate_speed: 1.0,
            rotate_scaling: RotateScaling::ViewportRelative,
            enable_zoom: true,
            zoom_speed: 1.2,
            enable_pan: true,
            pan_speed: 0.3,
            key_pan_speed: 7.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_damping: false,
            damping_factor: 0.05,
        }
    }
}

impl OrbitControlsConfig {
    pub fn distance_bounds(&self) -> DistanceBounds {
        DistanceBounds::new(self.min_distance, self.max_distance)
    }

    pub fn validate(&self) -> Result<(), ControlsError> {
        let (min, max) = (self.min_distance, self.max_distance);
        if min.is_nan() || max.is_nan() || min < 0.0 || min.is_infinite() || max < min {
            return Err(ControlsError::InvalidDistanceBounds { min, max });
        }

        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ControlsError::InvalidDampingFactor(self.damping_factor));
        }

        let speeds = [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
            ("key_pan_speed", self.key_pan_speed),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlsError::InvalidSpeed { name, value });
            }
        }

        if let RotateScaling::RadiansPerPixel(value) = self.rotate_scaling {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlsError::InvalidSpeed {
                    name: "rotate_scaling",
                    value,
                });
            }
        }

        Ok(())
    }
}

/// JSON has no infinity, so an unbounded distance travels as `null`
mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f32(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::INFINITY))
    }
}

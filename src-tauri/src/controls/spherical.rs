//! Spherical coordinate model
//!
//! Camera offsets relative to the orbit target, expressed as
//! (radius, polar, azimuth). Y is up, the polar angle is measured from +Y
//! and the azimuth is measured around +Y starting at +Z.

use bevy::math::Vec3;
use std::f32::consts::PI;

/// Margin kept between the polar angle and the poles
pub const POLAR_EPSILON: f32 = 1e-6;

/// Smallest camera-to-target distance, whatever `min_distance` says
pub const MIN_RADIUS: f32 = 1e-4;

/// Largest camera-to-target distance. Offsets stay far from `f32` overflow.
pub const MAX_RADIUS: f32 = 1e9;

/// Camera offset from the target in spherical form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Angle from +Y (radians)
    pub polar: f32,
    /// Angle around +Y, starting at +Z (radians)
    pub azimuth: f32,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            polar: 0.0,
            azimuth: 0.0,
        }
    }
}

impl Spherical {
    pub fn new(radius: f32, polar: f32, azimuth: f32) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }

    /// Convert an offset vector.
    ///
    /// A zero-length offset has no direction, so the angles of `previous`
    /// are kept and the radius is reported as zero; the caller raises it to
    /// its lower distance bound.
    pub fn from_offset(offset: Vec3, previous: Spherical) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON || !radius.is_finite() {
            return Self {
                radius: 0.0,
                polar: previous.polar,
                azimuth: previous.azimuth,
            };
        }

        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }

    /// Copy with the polar angle pulled off the poles
    pub fn make_safe(self) -> Self {
        Self {
            polar: clamp_safe(self.polar),
            ..self
        }
    }
}

/// Restrict a polar angle to `[ε, π − ε]` so look-at never degenerates
pub fn clamp_safe(polar: f32) -> f32 {
    polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON)
}

/// Allowed camera-to-target distance range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBounds {
    pub min: f32,
    pub max: f32,
}

impl DistanceBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a radius into the bounds.
    ///
    /// The bounds are kept inside `[MIN_RADIUS, MAX_RADIUS]`. The floor sits
    /// well above the zero-offset threshold of [`Spherical::from_offset`].
    pub fn clamp(&self, radius: f32) -> f32 {
        let min = self.min.max(MIN_RADIUS);
        let max = self.max.min(MAX_RADIUS).max(min);
        if radius.is_nan() {
            return min;
        }
        radius.clamp(min, max)
    }
}

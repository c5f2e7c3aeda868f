//! Per-frame camera update

use bevy::math::Vec3;

use super::host::OrbitCamera;
use super::spherical::Spherical;
use super::{OrbitControls, PendingDelta};

/// Squared distance below which the camera counts as stationary
const MOTION_EPSILON: f32 = 1e-6;

/// Damped residue below this is dropped instead of decaying forever
const RESIDUE_EPSILON: f32 = 1e-6;

impl OrbitControls {
    /// Apply pending motion to the camera.
    ///
    /// Call once per frame, after all input for the frame was handled.
    /// Returns `true` if the camera moved noticeably.
    pub fn update(&mut self, camera: &mut impl OrbitCamera) -> bool {
        let position = camera.position();

        // Pans already moved the target; the camera catches up by the same
        // vector so the offset, and with it the radius, is preserved.
        let offset = position + self.pending.pan - self.target;
        let mut spherical = Spherical::from_offset(offset, self.spherical);

        let damping = self.config.enable_damping;
        let share = if damping {
            self.config.damping_factor
        } else {
            1.0
        };

        spherical.azimuth += self.pending.azimuth * share;
        spherical.polar += self.pending.polar * share;
        spherical = spherical.make_safe();

        // A collapsed offset restarts from the floor so zoom can grow it again
        let bounds = self.config.distance_bounds();
        let scale = self.pending.scale.powf(share);
        spherical.radius = bounds.clamp(bounds.clamp(spherical.radius) * scale);

        let new_position = self.target + spherical.to_offset();
        camera.set_position(new_position);
        camera.look_at(self.target, Vec3::Y);
        self.spherical = spherical;

        if damping {
            self.decay_pending();
        } else {
            self.pending = PendingDelta::NONE;
        }

        new_position.distance_squared(position) > MOTION_EPSILON
    }

    /// Keep `1 - damping_factor` of the rotation and zoom for later frames
    fn decay_pending(&mut self) {
        let keep = 1.0 - self.config.damping_factor;
        let pending = &mut self.pending;

        pending.azimuth *= keep;
        pending.polar *= keep;
        pending.scale = pending.scale.powf(keep);
        pending.pan = Vec3::ZERO;

        if pending.azimuth.abs() < RESIDUE_EPSILON {
            pending.azimuth = 0.0;
        }
        if pending.polar.abs() < RESIDUE_EPSILON {
            pending.polar = 0.0;
        }
        if pending.scale.ln().abs() < RESIDUE_EPSILON {
            pending.scale = 1.0;
        }
    }
}

//! Host seams
//!
//! The controls never own the camera or the viewport. They borrow whatever
//! the host exposes through these traits for the duration of one call.

use bevy::math::{Quat, Vec2, Vec3};
use bevy::transform::components::Transform;

/// Read access to a perspective camera
pub trait CameraView {
    fn position(&self) -> Vec3;

    fn orientation(&self) -> Quat;

    /// Vertical field of view in radians
    fn fov_y(&self) -> f32;
}

/// A camera the controls may move
pub trait OrbitCamera: CameraView {
    fn set_position(&mut self, position: Vec3);

    /// Orient the camera towards `target`
    fn look_at(&mut self, target: Vec3, up: Vec3);
}

/// The surface that produces pointer input
pub trait Viewport {
    /// Client size in the same units as pointer coordinates
    fn size(&self) -> Vec2;

    /// Keep routing moves for `pointer_id` to us until released.
    /// Hosts without capture support can ignore this.
    fn set_pointer_capture(&mut self, _pointer_id: u32) {}

    fn release_pointer_capture(&mut self, _pointer_id: u32) {}
}

/// A Bevy camera transform paired with its vertical field of view
pub struct TransformCamera<'a> {
    pub transform: &'a mut Transform,
    pub fov_y: f32,
}

impl<'a> TransformCamera<'a> {
    pub fn new(transform: &'a mut Transform, fov_y: f32) -> Self {
        Self { transform, fov_y }
    }
}

impl CameraView for TransformCamera<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn orientation(&self) -> Quat {
        self.transform.rotation
    }

    fn fov_y(&self) -> f32 {
        self.fov_y
    }
}

impl OrbitCamera for TransformCamera<'_> {
    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.transform.look_at(target, up);
    }
}

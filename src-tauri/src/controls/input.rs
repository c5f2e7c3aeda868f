//! Input interpretation
//!
//! Classifies the current drag and accumulates pending rotation, zoom and
//! pan. Nothing here touches the camera.

use bevy::log::debug;
use bevy::math::{Vec2, Vec3};
use std::f32::consts::TAU;

use super::event::{ControlEvent, PanKey, PointerButton};
use super::host::{CameraView, Viewport};
use super::options::RotateScaling;
use super::OrbitControls;

/// What a held pointer is currently doing. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Rotating,
    Dollying,
    Panning,
}

/// State of the current drag session
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Last pointer position seen for the active drag
    pub last_pointer: Vec2,
    /// Pointer that started the drag
    pub pointer_id: Option<u32>,
    /// Pointer currently captured on the viewport
    pub captured: Option<u32>,
}

impl OrbitControls {
    /// Feed one input event.
    ///
    /// Returns `true` if the event changed any control state. Releases
    /// (pointer up/cancel, blur) are honoured even while disabled so a drag
    /// can never get stuck.
    pub fn handle_event(
        &mut self,
        event: ControlEvent,
        camera: &impl CameraView,
        viewport: &mut impl Viewport,
    ) -> bool {
        match event {
            ControlEvent::PointerUp { .. }
            | ControlEvent::PointerCancel { .. }
            | ControlEvent::Blur => return self.end_interaction(viewport),
            _ => {}
        }

        if !self.enabled || !self.attached {
            return false;
        }

        match event {
            ControlEvent::PointerDown {
                pointer_id,
                button,
                x,
                y,
            } => self.begin_interaction(pointer_id, button, Vec2::new(x, y), viewport),
            ControlEvent::PointerMove { pointer_id, x, y } => {
                self.drag(pointer_id, Vec2::new(x, y), camera, &*viewport)
            }
            ControlEvent::Wheel { delta_y } => self.wheel(delta_y),
            ControlEvent::Key { key } => self.key(key, camera, &*viewport),
            ControlEvent::PointerUp { .. }
            | ControlEvent::PointerCancel { .. }
            | ControlEvent::Blur => false,
        }
    }

    /// Queue an orbit by the given angles (radians)
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.pending.azimuth += azimuth;
        self.pending.polar += polar;
    }

    /// Move closer: divide the distance by `scale` (default `1 + zoom_speed`)
    pub fn dolly_in(&mut self, scale: Option<f32>) {
        let scale = scale.unwrap_or(1.0 + self.config.zoom_speed);
        if scale.is_finite() && scale > 0.0 {
            self.pending.scale /= scale;
        }
    }

    /// Move away: multiply the distance by `scale` (default `1 + zoom_speed`)
    pub fn dolly_out(&mut self, scale: Option<f32>) {
        let scale = scale.unwrap_or(1.0 + self.config.zoom_speed);
        if scale.is_finite() && scale > 0.0 {
            self.pending.scale *= scale;
        }
    }

    /// Pan by a screen-space amount in pixels.
    ///
    /// Positive `dx` moves the target along the camera's right axis and
    /// positive `dy` along its up axis. The target moves immediately; the
    /// camera follows on the next update.
    /// Returns the world-space translation applied to the target.
    pub fn pan(
        &mut self,
        dx: f32,
        dy: f32,
        camera: &impl CameraView,
        viewport: &impl Viewport,
    ) -> Vec3 {
        let height = viewport.size().y;
        if height.is_nan() || height <= 0.0 {
            return Vec3::ZERO;
        }

        // Distance the camera will have once it catches up with earlier pans
        let offset = camera.position() + self.pending.pan - self.target;
        let half_extent = offset.length() * (camera.fov_y() * 0.5).tan();

        let shift = Vec3::new(
            2.0 * dx * half_extent / height,
            2.0 * dy * half_extent / height,
            0.0,
        );
        let world = camera.orientation() * shift;
        if !world.is_finite() {
            return Vec3::ZERO;
        }

        self.target += world;
        self.pending.pan += world;
        world
    }

    /// Return to idle and drop any pointer capture
    pub(crate) fn end_interaction(&mut self, viewport: &mut impl Viewport) -> bool {
        let was_active = self.session.mode != InteractionMode::Idle;
        let released = self.release_capture(viewport);
        if was_active {
            debug!("[Controls] {:?} -> Idle", self.session.mode);
        }
        self.session.mode = InteractionMode::Idle;
        self.session.pointer_id = None;
        was_active || released
    }

    fn release_capture(&mut self, viewport: &mut impl Viewport) -> bool {
        match self.session.captured.take() {
            Some(pointer_id) => {
                viewport.release_pointer_capture(pointer_id);
                true
            }
            None => false,
        }
    }

    fn begin_interaction(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        position: Vec2,
        viewport: &mut impl Viewport,
    ) -> bool {
        let mode = match button {
            PointerButton::Primary if self.config.enable_rotate => InteractionMode::Rotating,
            PointerButton::Middle if self.config.enable_zoom => InteractionMode::Dollying,
            PointerButton::Secondary if self.config.enable_pan => InteractionMode::Panning,
            _ => return false,
        };

        // A capture still held here means its release never reached us
        self.release_capture(viewport);

        debug!("[Controls] {:?} -> {:?}", self.session.mode, mode);
        self.session.mode = mode;
        self.session.last_pointer = position;
        self.session.pointer_id = Some(pointer_id);

        viewport.set_pointer_capture(pointer_id);
        self.session.captured = Some(pointer_id);
        true
    }

    fn drag(
        &mut self,
        pointer_id: u32,
        position: Vec2,
        camera: &impl CameraView,
        viewport: &impl Viewport,
    ) -> bool {
        if self.session.pointer_id != Some(pointer_id) {
            return false;
        }

        let allowed = match self.session.mode {
            InteractionMode::Idle => false,
            InteractionMode::Rotating => self.config.enable_rotate,
            InteractionMode::Dollying => self.config.enable_zoom,
            InteractionMode::Panning => self.config.enable_pan,
        };
        if !allowed {
            return false;
        }

        let delta = position - self.session.last_pointer;
        self.session.last_pointer = position;

        match self.session.mode {
            InteractionMode::Rotating => self.rotate_by_pixels(delta, viewport.size()),
            InteractionMode::Dollying => {
                // Only the direction matters, one step per move
                if delta.y > 0.0 {
                    self.dolly_in(None);
                } else if delta.y < 0.0 {
                    self.dolly_out(None);
                }
            }
            InteractionMode::Panning => {
                let speed = self.config.pan_speed;
                self.pan(delta.x * speed, delta.y * speed, camera, viewport);
            }
            InteractionMode::Idle => {}
        }
        true
    }

    fn rotate_by_pixels(&mut self, delta: Vec2, size: Vec2) {
        let angle = match self.config.rotate_scaling {
            RotateScaling::ViewportRelative => {
                if !(size.x > 0.0 && size.y > 0.0) {
                    return;
                }
                Vec2::new(TAU * delta.x / size.x, TAU * delta.y / size.y)
            }
            RotateScaling::RadiansPerPixel(radians) => delta * radians,
        } * self.config.rotate_speed;

        // Dragging right swings the camera left: the world follows the hand
        self.rotate(-angle.x, -angle.y);
    }

    fn wheel(&mut self, delta_y: f32) -> bool {
        if !self.config.enable_zoom || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        // Scrolling up backs away from the target
        if delta_y < 0.0 {
            self.dolly_out(None);
        } else {
            self.dolly_in(None);
        }
        true
    }

    fn key(&mut self, key: PanKey, camera: &impl CameraView, viewport: &impl Viewport) -> bool {
        if !self.config.enable_pan {
            return false;
        }
        let step = self.config.key_pan_speed;
        let (dx, dy) = match key {
            PanKey::Up => (0.0, step),
            PanKey::Down => (0.0, -step),
            PanKey::Left => (step, 0.0),
            PanKey::Right => (-step, 0.0),
        };
        self.pan(dx, dy, camera, viewport);
        true
    }
}

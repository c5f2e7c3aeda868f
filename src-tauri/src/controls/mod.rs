//! Orbit camera controls
//!
//! Turns pointer, wheel and arrow-key input into camera orbit, dolly and
//! pan around a target point. The camera pose is never stored here: every
//! [`OrbitControls::update`] rebuilds it from the target and the spherical
//! offset, so position and orientation cannot drift apart.
//!
//! Flow per frame:
//! - [`OrbitControls::handle_event`] for every queued input event. This only
//!   touches the pending deltas, the interaction mode and (for pans) the
//!   target.
//! - [`OrbitControls::update`] once. Applies the pending deltas to the
//!   camera, then clears or decays them.

pub mod error;
pub mod event;
pub mod host;
pub mod input;
pub mod options;
pub mod spherical;
pub mod updater;

pub use error::ControlsError;
pub use event::{ControlEvent, PanKey, PointerButton};
pub use host::{CameraView, OrbitCamera, TransformCamera, Viewport};
pub use input::{InteractionMode, InteractionState};
pub use options::{OrbitControlsConfig, RotateScaling};
pub use spherical::{
    clamp_safe, DistanceBounds, Spherical, MAX_RADIUS, MIN_RADIUS, POLAR_EPSILON,
};

use bevy::log::debug;
use bevy::math::Vec3;

/// Motion requested by input since the last update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDelta {
    pub polar: f32,
    pub azimuth: f32,
    /// Multiplier for the orbit radius; 1 means no zoom
    pub scale: f32,
    /// How far the target already moved; the camera follows on update
    pub pan: Vec3,
}

impl PendingDelta {
    pub const NONE: Self = Self {
        polar: 0.0,
        azimuth: 0.0,
        scale: 1.0,
        pan: Vec3::ZERO,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for PendingDelta {
    fn default() -> Self {
        Self::NONE
    }
}

/// Orbit camera controller bound to one camera and one viewport
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Master switch for input; `update` keeps running either way
    pub enabled: bool,
    pub config: OrbitControlsConfig,
    target: Vec3,
    spherical: Spherical,
    pending: PendingDelta,
    session: InteractionState,
    attached: bool,
}

impl OrbitControls {
    /// Attach controls to a camera orbiting `target`.
    ///
    /// The starting spherical offset comes from the camera's current
    /// position.
    pub fn new(
        camera: &impl CameraView,
        viewport: &impl Viewport,
        target: Vec3,
        config: OrbitControlsConfig,
    ) -> Result<Self, ControlsError> {
        config.validate()?;

        let size = viewport.size();
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(ControlsError::EmptyViewport {
                width: size.x,
                height: size.y,
            });
        }

        let position = camera.position();
        if !position.is_finite() || !target.is_finite() {
            return Err(ControlsError::NonFiniteCamera);
        }

        let spherical = Spherical::from_offset(position - target, Spherical::default());
        debug!(
            "[Controls] Attached: radius {:.2}, polar {:.3}, azimuth {:.3}",
            spherical.radius, spherical.polar, spherical.azimuth
        );

        Ok(Self {
            enabled: true,
            config,
            target,
            spherical,
            pending: PendingDelta::NONE,
            session: InteractionState::default(),
            attached: true,
        })
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit centre; the camera re-aims on the next update
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Spherical offset as of the last update
    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn pending(&self) -> PendingDelta {
        self.pending
    }

    pub fn mode(&self) -> InteractionMode {
        self.session.mode
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Swap in new settings, keeping the current ones if they don't validate
    pub fn reconfigure(&mut self, config: OrbitControlsConfig) -> Result<(), ControlsError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Detach from the viewport.
    ///
    /// Releases any pointer capture, drops pending motion and ignores every
    /// later event. `update` still re-aims the camera at the target.
    pub fn dispose(&mut self, viewport: &mut impl Viewport) {
        self.end_interaction(viewport);
        self.pending = PendingDelta::NONE;
        self.attached = false;
        debug!("[Controls] Disposed");
    }
}

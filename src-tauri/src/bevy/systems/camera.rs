//! Camera control systems
//!
//! Attaches [`OrbitControls`] to the controller camera once the scene
//! exists, then feeds it the input queued by the frontend every frame.

use bevy::{math::Vec3, prelude::*};

use crate::bevy::components::CameraController;
use crate::bevy::resources::{
    ControlEventsRes, ControlsConfigRes, OrbitCameraState, RenderViewport, SceneSettings,
};
use crate::config::camera::FOV_DEGREES;
use crate::controls::{ControlsError, OrbitControls, TransformCamera};

/// Vertical field of view of a camera projection, in radians
pub fn vertical_fov(projection: &Projection) -> f32 {
    match projection {
        Projection::Perspective(perspective) => perspective.fov,
        _ => FOV_DEGREES.to_radians(),
    }
}

/// Bind the orbit controls to the controller camera, orbiting the sun
pub fn attach_orbit_controls(
    mut commands: Commands,
    cameras: Query<(&Transform, &Projection), With<CameraController>>,
    viewport: Res<RenderViewport>,
    settings: Res<SceneSettings>,
) -> Result {
    let (transform, projection) = cameras
        .single()
        .map_err(|_| ControlsError::MissingCamera)?;

    let mut pose = *transform;
    let camera = TransformCamera::new(&mut pose, vertical_fov(projection));
    let controls = OrbitControls::new(&camera, &*viewport, Vec3::ZERO, settings.controls)?;

    info!(
        "[Controls] Attached at distance {:.1} (damping: {})",
        controls.spherical().radius,
        controls.config.enable_damping
    );
    commands.insert_resource(OrbitCameraState { controls });
    Ok(())
}

/// Apply queued settings and input, then move the camera once
pub fn drive_orbit_controls(
    state: Option<ResMut<OrbitCameraState>>,
    events: Res<ControlEventsRes>,
    requested: Res<ControlsConfigRes>,
    mut viewport: ResMut<RenderViewport>,
    mut cameras: Query<(&mut Transform, &Projection), With<CameraController>>,
) {
    let Some(mut state) = state else { return };
    let Ok((mut transform, projection)) = cameras.single_mut() else {
        return;
    };

    if let Some(config) = requested.0.take() {
        match state.controls.reconfigure(config) {
            Ok(()) => info!("[Controls] Settings updated"),
            Err(e) => warn!("[Controls] Rejected settings: {}", e),
        }
    }

    let mut camera = TransformCamera::new(&mut *transform, vertical_fov(projection));
    for event in events.0.drain() {
        state.controls.handle_event(event, &camera, &mut *viewport);
    }
    state.controls.update(&mut camera);
}

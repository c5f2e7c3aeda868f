//! Orbit controls for the offscreen camera
//!
//! Expects the scene to spawn exactly one [`CameraController`] camera
//! during `Startup`, with a `Camera` whose computed values Bevy's camera
//! system keeps current. The shared queues default to fresh ones; the app
//! inserts the handles it shares with the Tauri side.
//!
//! [`CameraController`]: crate::bevy::components::CameraController

use bevy::{camera::CameraUpdateSystems, prelude::*};

use crate::bevy::resources::{
    ControlEventsRes, ControlsConfigRes, RenderViewport, SceneSettings, SceneSnapshotRes,
};
use crate::bevy::systems::{attach_orbit_controls, drive_orbit_controls, publish_scene_snapshot};

pub struct OrbitControlsPlugin;

impl Plugin for OrbitControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_resource::<RenderViewport>()
            .init_resource::<ControlEventsRes>()
            .init_resource::<ControlsConfigRes>()
            .init_resource::<SceneSnapshotRes>()
            .add_systems(PostStartup, attach_orbit_controls)
            .add_systems(Update, drive_orbit_controls)
            .add_systems(
                PostUpdate,
                publish_scene_snapshot
                    .after(TransformSystems::Propagate)
                    .after(CameraUpdateSystems),
            );
    }
}

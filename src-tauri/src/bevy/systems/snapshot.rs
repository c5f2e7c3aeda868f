//! Scene snapshot publishing
//!
//! Copies the camera and planet positions into shared state after every
//! update, so click picking can run on the Tauri side without locking the
//! Bevy world. Labels are placed here with the camera's own projection.

use bevy::prelude::*;

use crate::bevy::components::{CameraController, Planet};
use crate::bevy::resources::SceneSnapshotRes;
use crate::config::scene::PLANET_RADIUS;
use crate::picking::{CameraSnapshot, PlanetSphere, SceneSnapshot};

/// Runs after transform propagation and the camera update so the global
/// transform and projection match the frame about to render
pub fn publish_scene_snapshot(
    snapshot: Res<SceneSnapshotRes>,
    cameras: Query<(&Camera, &GlobalTransform), With<CameraController>>,
    planets: Query<(&GlobalTransform, &Planet)>,
) {
    let Ok((camera, transform)) = cameras.single() else {
        return;
    };

    let planets = planets
        .iter()
        .map(|(transform, planet)| PlanetSphere {
            name: planet.name.clone(),
            url: planet.url.clone(),
            center: transform.translation(),
            radius: PLANET_RADIUS,
        })
        .collect();

    let camera = CameraSnapshot {
        camera: camera.clone(),
        transform: *transform,
    };
    snapshot.0.publish(SceneSnapshot::new(camera, planets));
}

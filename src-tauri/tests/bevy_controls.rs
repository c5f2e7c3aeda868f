use approx::assert_relative_eq;
use bevy::camera::{CameraProjection, ComputedCameraValues, RenderTargetInfo};
use bevy::prelude::*;
use std::f32::consts::PI;

use solar_orbit_lib::bevy::components::{CameraController, Planet};
use solar_orbit_lib::bevy::resources::{
    ControlEventsRes, ControlsConfigRes, OrbitCameraState, RenderViewport, SceneSettings,
    SceneSnapshotRes,
};
use solar_orbit_lib::bevy::OrbitControlsPlugin;
use solar_orbit_lib::config::AppConfig;
use solar_orbit_lib::controls::{ControlEvent, OrbitControlsConfig, PointerButton};
use solar_orbit_lib::tauri_bridge::{
    SharedControlEvents, SharedControlsConfig, SharedSceneSnapshot,
};

struct Harness {
    app: App,
    events: SharedControlEvents,
    config: SharedControlsConfig,
    snapshot: SharedSceneSnapshot,
}

fn spawn_scene(mut commands: Commands) {
    let projection = PerspectiveProjection {
        fov: 0.8,
        aspect_ratio: 1000.0 / 750.0,
        ..default()
    };
    // What the camera system computes for the 1000x750 render target
    let camera = Camera {
        computed: ComputedCameraValues {
            clip_from_view: projection.get_clip_from_view(),
            target_info: Some(RenderTargetInfo {
                physical_size: UVec2::new(1000, 750),
                scale_factor: 1.0,
            }),
            ..default()
        },
        ..default()
    };

    commands.spawn((
        camera,
        Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Projection::Perspective(projection),
        CameraController,
    ));
    commands.spawn((
        Transform::from_xyz(0.0, 0.0, -5.0),
        Planet {
            name: "Research".into(),
            url: "research.html".into(),
            orbit_radius: 5.0,
            speed: 0.02,
            angle: 0.0,
        },
    ));
}

fn harness() -> Harness {
    let events = SharedControlEvents::default();
    let config = SharedControlsConfig::default();
    let snapshot = SharedSceneSnapshot::default();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(SceneSettings(AppConfig {
            controls: OrbitControlsConfig::default(),
            ..default()
        }))
        .insert_resource(ControlEventsRes(events.clone()))
        .insert_resource(ControlsConfigRes(config.clone()))
        .insert_resource(SceneSnapshotRes(snapshot.clone()))
        .add_plugins(OrbitControlsPlugin)
        .add_systems(Startup, spawn_scene);
    app.update();

    Harness {
        app,
        events,
        config,
        snapshot,
    }
}

fn camera_transform(app: &mut App) -> Transform {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<CameraController>>();
    *query.single(app.world()).unwrap()
}

fn drag(events: &SharedControlEvents, pointer_id: u32, from: Vec2, to: Vec2) {
    events
        .push(ControlEvent::PointerDown {
            pointer_id,
            button: PointerButton::Primary,
            x: from.x,
            y: from.y,
        })
        .unwrap();
    events
        .push(ControlEvent::PointerMove {
            pointer_id,
            x: to.x,
            y: to.y,
        })
        .unwrap();
}

#[test]
fn controls_attach_to_the_controller_camera() {
    let h = harness();
    let state = h.app.world().resource::<OrbitCameraState>();
    assert_relative_eq!(state.controls.spherical().radius, 10.0, epsilon = 1e-4);
    assert!(!state.controls.config.enable_damping);
    assert_eq!(state.controls.target(), Vec3::ZERO);
}

#[test]
fn queued_events_move_the_camera_on_the_next_frame() {
    let mut h = harness();
    drag(&h.events, 1, Vec2::new(500.0, 300.0), Vec2::new(600.0, 300.0));
    h.app.update();

    // The default viewport is the 1000px wide render target
    let azimuth = -2.0 * PI * 100.0 / 1000.0;
    let transform = camera_transform(&mut h.app);
    assert_relative_eq!(transform.translation.x, 10.0 * azimuth.sin(), epsilon = 1e-3);
    assert_relative_eq!(transform.translation.z, 10.0 * azimuth.cos(), epsilon = 1e-3);
    assert!(h.events.drain().is_empty());
    assert_eq!(
        h.app.world().resource::<RenderViewport>().captured_pointer,
        Some(1)
    );

    h.events.push(ControlEvent::PointerUp { pointer_id: 1 }).unwrap();
    h.app.update();
    assert_eq!(
        h.app.world().resource::<RenderViewport>().captured_pointer,
        None
    );
    let after = camera_transform(&mut h.app);
    assert_relative_eq!(after.translation.x, transform.translation.x, epsilon = 1e-4);
}

#[test]
fn requested_settings_apply_before_input() {
    let mut h = harness();
    h.config
        .request(OrbitControlsConfig {
            enable_rotate: false,
            ..Default::default()
        })
        .unwrap();
    drag(&h.events, 2, Vec2::new(500.0, 300.0), Vec2::new(900.0, 300.0));
    h.app.update();

    let state = h.app.world().resource::<OrbitCameraState>();
    assert!(!state.controls.config.enable_rotate);
    let transform = camera_transform(&mut h.app);
    assert_relative_eq!(transform.translation.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(transform.translation.z, 10.0, epsilon = 1e-4);
}

#[test]
fn invalid_settings_keep_the_current_ones() {
    let mut h = harness();
    h.config
        .request(OrbitControlsConfig {
            min_distance: 30.0,
            max_distance: 3.0,
            ..Default::default()
        })
        .unwrap();
    h.app.update();

    let state = h.app.world().resource::<OrbitCameraState>();
    assert_eq!(state.controls.config, OrbitControlsConfig::default());
}

#[test]
fn snapshot_supports_picking_and_labels() {
    let h = harness();
    let snapshot = h.snapshot.latest().unwrap().expect("snapshot published");
    assert_eq!(snapshot.planets.len(), 1);

    let centre = snapshot.camera.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
    assert_relative_eq!(centre.x, 500.0, epsilon = 1e-2);
    assert_relative_eq!(centre.y, 375.0, epsilon = 1e-2);

    let link = snapshot.pick(centre.x, centre.y).unwrap();
    assert_eq!(link.url, "research.html");
    assert_eq!(snapshot.pick(5.0, 5.0), None);

    assert_eq!(snapshot.labels.len(), 1);
    assert!(snapshot.labels[0].y < centre.y);
}

#[test]
fn snapshot_follows_the_orbiting_camera() {
    let mut h = harness();
    drag(&h.events, 3, Vec2::new(500.0, 375.0), Vec2::new(750.0, 375.0));
    h.app.update();

    let snapshot = h.snapshot.latest().unwrap().expect("snapshot published");
    let transform = camera_transform(&mut h.app);
    let published = snapshot.camera.transform.translation();
    assert_relative_eq!(published.x, transform.translation.x, epsilon = 1e-4);
    assert_relative_eq!(published.z, transform.translation.z, epsilon = 1e-4);

    // A quarter turn: the planet behind the target is now off to the side
    let planet = snapshot.camera.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
    assert!((planet.x - 500.0).abs() > 100.0, "planet still centred at {planet:?}");
    assert_eq!(snapshot.pick(500.0, 375.0), None);
}

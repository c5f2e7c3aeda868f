//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::{ImageCopyPlugin, OrbitControlsPlugin};
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{AppConfig, ConfigError, PRE_ROLL_FRAMES, TARGET_FPS};
use crate::tauri_bridge::BridgeState;

/// Create and configure the Bevy application
///
/// A config that failed to load is replaced by the defaults and reported
/// once the log subscriber is up.
pub fn create_app(bridge: BridgeState, loaded: Result<AppConfig, ConfigError>) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    let (settings, fallback) = scene_settings(loaded);

    // Shared with the Tauri side; inserted before the plugins so they keep them
    app.insert_resource(settings);
    app.insert_resource(fallback);
    app.insert_resource(FrameBufferRes(bridge.frame_buffer));
    app.insert_resource(PerfStatsRes(bridge.perf_stats));
    app.insert_resource(ControlEventsRes(bridge.control_events));
    app.insert_resource(ControlsConfigRes(bridge.controls_config));
    app.insert_resource(SceneSnapshotRes(bridge.scene_snapshot));
    app.insert_resource(RenderViewport::default());

    app.add_plugins((ImageCopyPlugin, OrbitControlsPlugin));

    app.add_systems(Startup, (report_config_fallback, setup_scene));
    app.add_systems(Update, orbit_planets.before(drive_orbit_controls));
    app.add_systems(Last, extract_and_process_frame);

    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(TARGET_FPS));

    info!("[Bevy] App configured (headless mode with proper GPU-CPU pipeline)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(bridge: BridgeState, loaded: Result<AppConfig, ConfigError>) {
    thread::spawn(move || {
        let mut app = create_app(bridge, loaded);
        info!("[Bevy] Running render loop...");
        app.run();
    });
}

fn scene_settings(loaded: Result<AppConfig, ConfigError>) -> (SceneSettings, ConfigFallback) {
    match loaded {
        Ok(config) => (SceneSettings(config), ConfigFallback(None)),
        Err(e) => (
            SceneSettings(AppConfig::default()),
            ConfigFallback(Some(e.to_string())),
        ),
    }
}

/// Log a rejected config; loading happens before `LogPlugin` is built
fn report_config_fallback(fallback: Res<ConfigFallback>) {
    if let Some(reason) = &fallback.0 {
        error!("[Bevy] {}; using default settings", reason);
    }
}

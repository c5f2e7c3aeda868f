//! Solar Orbit: an orbit-controlled solar system rendered headless by Bevy
//! and shown inside a Tauri webview.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - The webview forwards pointer, wheel and key input as [`controls::ControlEvent`]s
//! - [`controls::OrbitControls`] turns that input into camera orbit, dolly and pan
//! - GPU texture -> Buffer -> CPU channel -> `frame://` protocol (JPEG)
//! - Clicks on planets are raycast against a per-frame scene snapshot
//!
//! # Module Structure
//!
//! - `controls`: orbit camera controls, independent of the scene
//! - `config`: render constants and the loadable [`config::AppConfig`]
//! - `picking`: click raycasting and label projection
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `frame_codec`: JPEG and Base64 frame encodings
//!   - `commands`: Tauri command handlers (`desktop` feature)
//!   - `protocol`: Custom protocol handlers (`desktop` feature)
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Frame copy and orbit controls plugins
//!   - `systems`: Scene, animation, camera and frame systems
//!   - `app`: Application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

pub mod bevy;
pub mod config;
pub mod controls;
pub mod picking;
pub mod tauri_bridge;

#[cfg(feature = "desktop")]
use std::{thread, time::Duration};

/// Main entry point for the Tauri application
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use ::bevy::log::{error, info};

    let bridge = tauri_bridge::BridgeState::default();

    // Start Bevy in background thread; it installs the log subscriber and
    // reports a rejected config itself
    bevy::start_bevy(bridge.clone(), config::AppConfig::load());

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));

    info!("[Tauri] Starting...");

    let protocol_bridge = bridge.clone();

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(bridge.frame_buffer)
        .manage(bridge.perf_stats)
        .manage(bridge.control_events)
        .manage(bridge.controls_config)
        .manage(bridge.scene_snapshot)
        // Register custom protocol "frame://" for direct binary transfer
        // This bypasses Tauri IPC JSON serialization completely!
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_bridge.frame_buffer.clone();
            let perf_stats = protocol_bridge.perf_stats.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                // For Tauri v2, URL format is: http://frame.localhost/path
                let response = tauri_bridge::protocol::handle_frame_protocol(
                    request.uri().path(),
                    &buffer,
                    &perf_stats,
                );
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::send_control_event,
            tauri_bridge::commands::update_controls_config,
            tauri_bridge::commands::pick_planet,
            tauri_bridge::commands::get_planet_labels
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        error!("[Tauri] {}", e);
    }
}

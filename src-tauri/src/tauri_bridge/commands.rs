//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript/TypeScript code.

use bevy::log::{info, warn};
use tauri::State;

use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::controls::{ControlEvent, OrbitControlsConfig};
use crate::picking::{PlanetLabel, PlanetLink};
use super::frame_codec::encode_base64;
use super::shared_state::{
    FrameResponse, PerformanceStats, SharedControlEvents, SharedControlsConfig,
    SharedFrameBuffer, SharedPerfStats, SharedSceneSnapshot,
};

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let guard = state.0.lock().map_err(|e| e.to_string())?;
    let Some(rgba_data) = &*guard else {
        return Err("No frame yet (scene still loading)".into());
    };
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    let encode_start = std::time::Instant::now();
    let response =
        encode_base64(rgba_data, RENDER_WIDTH, RENDER_HEIGHT).map_err(|e| e.to_string())?;
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(response)
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    let guard = state.0.lock().map_err(|e| e.to_string())?;
    Ok(guard.clone())
}

/// Queue one pointer, wheel, key or blur event for the orbit controls
///
/// Coordinates must already be in render-target pixels.
#[tauri::command]
pub fn send_control_event(
    state: State<SharedControlEvents>,
    event: ControlEvent,
) -> Result<(), String> {
    state.push(event)
}

/// Replace the orbit controls settings (enable flags, speeds, bounds)
///
/// Validated here so the frontend sees the error, and again on the Bevy
/// side before it is applied; an invalid config never replaces the
/// active one.
#[tauri::command]
pub fn update_controls_config(
    state: State<SharedControlsConfig>,
    config: OrbitControlsConfig,
) -> Result<(), String> {
    config.validate().map_err(|e| e.to_string())?;
    state.request(config)
}

/// Resolve a click to the planet under it
///
/// External links open in the system browser and are not returned; bundled
/// pages come back for the webview to navigate to.
#[tauri::command]
pub fn pick_planet(
    state: State<SharedSceneSnapshot>,
    x: f32,
    y: f32,
) -> Result<Option<PlanetLink>, String> {
    let Some(snapshot) = state.latest()? else {
        return Ok(None);
    };
    let Some(link) = snapshot.pick(x, y) else {
        return Ok(None);
    };

    info!("[Tauri] Picked {} -> {}", link.name, link.url);
    if link.is_external() {
        if let Err(err) = tauri_plugin_opener::open_url(&link.url, None::<&str>) {
            warn!("[Tauri] Could not open {}: {err}", link.url);
            return Err(err.to_string());
        }
        return Ok(None);
    }
    Ok(Some(link))
}

/// Planet labels projected into render-target pixels
#[tauri::command]
pub fn get_planet_labels(state: State<SharedSceneSnapshot>) -> Result<Vec<PlanetLabel>, String> {
    Ok(state
        .latest()?
        .map(|snapshot| snapshot.labels)
        .unwrap_or_default())
}

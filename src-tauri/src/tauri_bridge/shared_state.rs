//! Shared state structures for communication between Tauri and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the Tauri frontend and the Bevy render backend.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::controls::{ControlEvent, OrbitControlsConfig};
use crate::picking::SceneSnapshot;

// =============================================================================
// Frame Buffer
// =============================================================================

/// Thread-safe RGBA frame buffer shared between Bevy and Tauri
/// Stores raw RGBA8 pixel data (4 bytes per pixel)
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Vec<u8>>>>);

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Control Input
// =============================================================================

/// Input events waiting for the next Bevy frame, in arrival order
#[derive(Clone, Default)]
pub struct SharedControlEvents(pub Arc<Mutex<VecDeque<ControlEvent>>>);

impl SharedControlEvents {
    pub fn push(&self, event: ControlEvent) -> Result<(), String> {
        let mut guard = self.0.lock().map_err(|e| e.to_string())?;
        guard.push_back(event);
        Ok(())
    }

    /// Take every queued event. A poisoned lock still yields its events:
    /// losing a pointer-up would leave a drag stuck.
    pub fn drain(&self) -> Vec<ControlEvent> {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        guard.drain(..).collect()
    }
}

/// Controls configuration requested by the frontend, applied on the next frame
#[derive(Clone, Default)]
pub struct SharedControlsConfig(pub Arc<Mutex<Option<OrbitControlsConfig>>>);

impl SharedControlsConfig {
    pub fn request(&self, config: OrbitControlsConfig) -> Result<(), String> {
        let mut guard = self.0.lock().map_err(|e| e.to_string())?;
        *guard = Some(config);
        Ok(())
    }

    pub fn take(&self) -> Option<OrbitControlsConfig> {
        self.0.lock().ok()?.take()
    }
}

// =============================================================================
// Scene Snapshot
// =============================================================================

/// Camera and planet placement of the last frame, for picking and labels
#[derive(Clone, Default)]
pub struct SharedSceneSnapshot(pub Arc<Mutex<Option<SceneSnapshot>>>);

impl SharedSceneSnapshot {
    pub fn publish(&self, snapshot: SceneSnapshot) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(snapshot);
        }
    }

    pub fn latest(&self) -> Result<Option<SceneSnapshot>, String> {
        let guard = self.0.lock().map_err(|e| e.to_string())?;
        Ok(guard.clone())
    }
}

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Tauri command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);

// =============================================================================
// Bundle
// =============================================================================

/// Everything the Tauri side and the Bevy thread share
#[derive(Clone, Default)]
pub struct BridgeState {
    pub frame_buffer: SharedFrameBuffer,
    pub perf_stats: SharedPerfStats,
    pub control_events: SharedControlEvents,
    pub controls_config: SharedControlsConfig,
    pub scene_snapshot: SharedSceneSnapshot,
}

//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::{AppConfig, RENDER_HEIGHT, RENDER_WIDTH};
use crate::controls::{OrbitControls, Viewport};
use crate::tauri_bridge::shared_state::{
    SharedControlEvents, SharedControlsConfig, SharedFrameBuffer, SharedPerfStats,
    SharedSceneSnapshot,
};

// =============================================================================
// Scene & Camera Control
// =============================================================================

/// Planet table and controls settings the app was started with
#[derive(Resource, Clone, Default, Deref)]
pub struct SceneSettings(pub AppConfig);

/// Why the loaded settings were replaced by the defaults, if they were
#[derive(Resource, Debug, Default)]
pub struct ConfigFallback(pub Option<String>);

/// Orbit controls attached to the [`CameraController`](super::components::CameraController) camera
#[derive(Resource)]
pub struct OrbitCameraState {
    pub controls: OrbitControls,
}

/// The offscreen render target as seen by the orbit controls
///
/// Pointer coordinates arrive in render-target pixels, so the viewport is
/// simply the render target size. The DOM-side pointer capture is done by
/// the frontend; this only tracks which pointer the controls hold.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RenderViewport {
    pub width: f32,
    pub height: f32,
    pub captured_pointer: Option<u32>,
}

impl RenderViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            captured_pointer: None,
        }
    }
}

impl Default for RenderViewport {
    fn default() -> Self {
        Self::new(RENDER_WIDTH, RENDER_HEIGHT)
    }
}

impl Viewport for RenderViewport {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn set_pointer_capture(&mut self, pointer_id: u32) {
        self.captured_pointer = Some(pointer_id);
    }

    fn release_pointer_capture(&mut self, pointer_id: u32) {
        if self.captured_pointer == Some(pointer_id) {
            self.captured_pointer = None;
        }
    }
}

/// Input events queued by the frontend
#[derive(Resource, Default)]
pub struct ControlEventsRes(pub SharedControlEvents);

/// Controls settings requested by the frontend
#[derive(Resource, Default)]
pub struct ControlsConfigRes(pub SharedControlsConfig);

/// Where the per-frame scene snapshot is published
#[derive(Resource, Default)]
pub struct SceneSnapshotRes(pub SharedSceneSnapshot);

// =============================================================================
// Rendering
// =============================================================================

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames rendered
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }

    /// Whether enough time passed since the last accepted frame
    pub fn admit(&mut self, now: std::time::Instant) -> bool {
        if now.duration_since(self.last_frame_time) < self.min_frame_interval {
            return false;
        }
        self.last_frame_time = now;
        true
    }
}

impl Default for FrameRateLimiter {
    fn default() -> Self {
        Self::new(60.0) // Default to 60 FPS
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

impl FrameTimings {
    /// Record one sample, keeping at most `capacity`
    pub fn record(&mut self, millis: f64, capacity: usize) {
        self.frame_times.push(millis);
        if self.frame_times.len() > capacity {
            let excess = self.frame_times.len() - capacity;
            self.frame_times.drain(..excess);
        }
    }

    pub fn average(&self) -> Option<f64> {
        if self.frame_times.is_empty() {
            return None;
        }
        Some(self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64)
    }

    pub fn min_max(&self) -> (f64, f64) {
        self.frame_times
            .iter()
            .fold((f64::MAX, 0.0f64), |(lo, hi), t| (lo.min(*t), hi.max(*t)))
    }
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_releases_only_its_own_capture() {
        let mut viewport = RenderViewport::new(1000, 750);
        assert_eq!(viewport.size(), Vec2::new(1000.0, 750.0));

        viewport.set_pointer_capture(4);
        viewport.release_pointer_capture(9);
        assert_eq!(viewport.captured_pointer, Some(4));
        viewport.release_pointer_capture(4);
        assert_eq!(viewport.captured_pointer, None);
    }

    #[test]
    fn frame_timings_keep_a_bounded_window() {
        let mut timings = FrameTimings::default();
        for t in [4.0, 2.0, 6.0, 8.0] {
            timings.record(t, 3);
        }
        assert_eq!(timings.frame_times, vec![2.0, 6.0, 8.0]);
        assert_eq!(timings.average(), Some(16.0 / 3.0));
        assert_eq!(timings.min_max(), (2.0, 8.0));
    }

    #[test]
    fn limiter_admits_after_the_interval() {
        let mut limiter = FrameRateLimiter::new(10.0);
        let start = limiter.last_frame_time;
        assert!(!limiter.admit(start + Duration::from_millis(50)));
        assert!(limiter.admit(start + Duration::from_millis(120)));
        assert!(!limiter.admit(start + Duration::from_millis(150)));
    }
}

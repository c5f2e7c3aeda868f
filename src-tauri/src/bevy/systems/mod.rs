//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod animation;
pub mod camera;
pub mod frame_extraction;
pub mod scene;
pub mod snapshot;

pub use animation::orbit_planets;
pub use camera::{attach_orbit_controls, drive_orbit_controls, vertical_fov};
pub use frame_extraction::extract_and_process_frame;
pub use scene::setup_scene;
pub use snapshot::publish_scene_snapshot;

//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for the camera driven by the orbit controls
///
/// Exactly one entity should carry it; the controls attach to the first
/// one found at startup.
#[derive(Component)]
pub struct CameraController;

/// Marker component for the sun at the scene origin
#[derive(Component)]
pub struct Sun;

/// A planet circling the sun in the XZ plane
#[derive(Component, Debug, Clone)]
pub struct Planet {
    pub name: String,
    /// Page the planet links to
    pub url: String,
    pub orbit_radius: f32,
    /// Radians per frame at the reference frame rate
    pub speed: f32,
    /// Current orbit angle around +Y
    pub angle: f32,
}

impl Planet {
    /// Position on the orbit for the current angle
    pub fn orbit_position(&self) -> Vec3 {
        Quat::from_rotation_y(self.angle) * Vec3::X * self.orbit_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orbit_position_turns_counter_clockwise_seen_from_above() {
        let mut planet = Planet {
            name: "Research".into(),
            url: "research.html".into(),
            orbit_radius: 10.0,
            speed: 0.02,
            angle: 0.0,
        };
        assert_relative_eq!(planet.orbit_position().x, 10.0);

        planet.angle = std::f32::consts::FRAC_PI_2;
        let position = planet.orbit_position();
        assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, -10.0, epsilon = 1e-5);
        assert_relative_eq!(position.length(), 10.0, epsilon = 1e-5);
    }
}

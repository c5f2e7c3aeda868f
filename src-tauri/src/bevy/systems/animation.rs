//! Animation systems
//!
//! This module contains systems that animate entities in the scene.

use bevy::{prelude::*, time::Time};
use std::f32::consts::TAU;

use crate::bevy::components::Planet;
use crate::config::scene::ORBIT_REFERENCE_FPS;

/// Advance every planet along its orbit.
///
/// Speeds are per reference frame, so the angular velocity does not depend
/// on the actual frame rate.
pub fn orbit_planets(time: Res<Time>, mut planets: Query<(&mut Transform, &mut Planet)>) {
    let frames = time.delta_secs() * ORBIT_REFERENCE_FPS;
    for (mut transform, mut planet) in planets.iter_mut() {
        planet.angle = (planet.angle + planet.speed * frames).rem_euclid(TAU);
        transform.translation = planet.orbit_position();
    }
}

//! Configuration constants and settings
//!
//! Render resolution, frame pacing and performance tuning are compile-time
//! constants. The orbit controls and the planet table form [`AppConfig`],
//! which can be overridden by a JSON file named in `SOLAR_ORBIT_CONFIG`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::controls::{ControlsError, OrbitControlsConfig};

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 1000;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 750;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "SOLAR_ORBIT_CONFIG";

/// Scene camera settings
pub mod camera {
    use bevy::math::Vec3;

    /// Where the camera starts, looking at the sun
    pub const START_POSITION: Vec3 = Vec3::new(0.0, 20.0, 60.0);

    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 50.0;

    pub const NEAR_PLANE: f32 = 0.1;

    pub const FAR_PLANE: f32 = 1000.0;
}

/// Sun and planet geometry
pub mod scene {
    pub const SUN_RADIUS: f32 = 5.0;

    pub const PLANET_RADIUS: f32 = 2.0;

    /// Label anchor height above a planet's centre
    pub const LABEL_HEIGHT: f32 = 3.0;

    /// Orbit speeds are given per frame at this rate
    pub const ORBIT_REFERENCE_FPS: f32 = 60.0;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}

/// One linked planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub name: String,
    /// sRGB colour
    pub color: [u8; 3],
    /// Distance from the sun
    pub orbit_radius: f32,
    /// Orbit advance in radians per frame at 60 fps
    pub speed: f32,
    /// Page opened when the planet is clicked
    pub url: String,
}

impl PlanetConfig {
    fn new(name: &str, color: [u8; 3], orbit_radius: f32, speed: f32, url: &str) -> Self {
        Self {
            name: name.into(),
            color,
            orbit_radius,
            speed,
            url: url.into(),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub controls: OrbitControlsConfig,
    pub planets: Vec<PlanetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            controls: OrbitControlsConfig {
                enable_damping: true,
                ..Default::default()
            },
            planets: vec![
                PlanetConfig::new("Research", [0x00, 0xff, 0xdd], 10.0, 0.02, "research.html"),
                PlanetConfig::new("Outreach", [0xff, 0x00, 0xaa], 16.0, 0.015, "outreach.html"),
                PlanetConfig::new("Myself", [0x00, 0xaa, 0xff], 22.0, 0.01, "myself.html"),
                PlanetConfig::new("Game", [0xaa, 0xff, 0x00], 28.0, 0.008, "game.html"),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid orbit controls: {0}")]
    Invalid(#[from] ControlsError),

    #[error("planet {0:?} needs a positive orbit radius")]
    InvalidPlanet(String),
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `SOLAR_ORBIT_CONFIG` if set, otherwise use the defaults
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()?;
        for planet in &self.planets {
            if !(planet.orbit_radius.is_finite() && planet.orbit_radius > 0.0) {
                return Err(ConfigError::InvalidPlanet(planet.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_landing_page() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.controls.enable_damping);
        let names: Vec<_> = config.planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Research", "Outreach", "Myself", "Game"]);
        assert_eq!(config.planets[3].url, "game.html");
    }

    #[test]
    fn partial_json_keeps_default_planets() {
        let config =
            AppConfig::from_json_str(r#"{"controls":{"min_distance":8,"max_distance":120}}"#)
                .unwrap();
        assert_eq!(config.controls.min_distance, 8.0);
        assert_eq!(config.controls.max_distance, 120.0);
        assert_eq!(config.planets.len(), 4);
    }

    #[test]
    fn rejects_invalid_controls_and_planets() {
        let err = AppConfig::from_json_str(r#"{"controls":{"min_distance":50,"max_distance":5}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ControlsError::InvalidDistanceBounds { .. })
        ));

        let err = AppConfig::from_json_str(
            r#"{"planets":[{"name":"Void","color":[0,0,0],"orbit_radius":0,"speed":0.1,"url":"x.html"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlanet(name) if name == "Void"));

        assert!(matches!(
            AppConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

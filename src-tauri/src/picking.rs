//! Click picking and label placement
//!
//! The render thread publishes a [`SceneSnapshot`] every frame; the UI
//! thread raycasts against it without touching the Bevy world.

use bevy::camera::Camera;
use bevy::math::{Ray3d, Vec2, Vec3};
use bevy::transform::components::GlobalTransform;
use serde::{Deserialize, Serialize};

use crate::config::scene::LABEL_HEIGHT;

/// Camera as seen by the last rendered frame
///
/// `camera` carries the projection and render target size computed by
/// Bevy's camera system, so the viewport conversions match the render.
#[derive(Debug, Clone)]
pub struct CameraSnapshot {
    pub camera: Camera,
    pub transform: GlobalTransform,
}

impl CameraSnapshot {
    /// World-space ray through a viewport pixel
    pub fn ray_through(&self, pixel: Vec2) -> Option<Ray3d> {
        self.camera.viewport_to_world(&self.transform, pixel).ok()
    }

    /// Viewport position of a world point, `None` if it is not in front
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera.world_to_viewport(&self.transform, point).ok()
    }

    /// Name labels for every planet in front of the camera
    pub fn labels(&self, planets: &[PlanetSphere]) -> Vec<PlanetLabel> {
        planets
            .iter()
            .filter_map(|planet| {
                let anchor = planet.center + Vec3::Y * LABEL_HEIGHT;
                self.project(anchor).map(|pixel| PlanetLabel {
                    name: planet.name.clone(),
                    x: pixel.x,
                    y: pixel.y,
                })
            })
            .collect()
    }
}

/// A clickable planet
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSphere {
    pub name: String,
    pub url: String,
    pub center: Vec3,
    pub radius: f32,
}

/// Where a click should take the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetLink {
    pub name: String,
    pub url: String,
}

impl PlanetLink {
    /// Links leaving the bundled pages open in the system browser
    pub fn is_external(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

/// Planet name anchored in viewport pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetLabel {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub camera: CameraSnapshot,
    pub planets: Vec<PlanetSphere>,
    /// Labels placed when the snapshot was taken
    pub labels: Vec<PlanetLabel>,
}

impl SceneSnapshot {
    pub fn new(camera: CameraSnapshot, planets: Vec<PlanetSphere>) -> Self {
        let labels = camera.labels(&planets);
        Self {
            camera,
            planets,
            labels,
        }
    }

    /// Nearest planet under a viewport pixel
    pub fn pick(&self, x: f32, y: f32) -> Option<PlanetLink> {
        let ray = self.camera.ray_through(Vec2::new(x, y))?;
        self.planets
            .iter()
            .filter_map(|planet| {
                intersect_sphere(&ray, planet.center, planet.radius).map(|t| (t, planet))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, planet)| PlanetLink {
                name: planet.name.clone(),
                url: planet.url.clone(),
            })
    }
}

/// Distance along `ray` to the first sphere hit in front of its origin
fn intersect_sphere(ray: &Ray3d, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray.origin - center;
    let direction: Vec3 = *ray.direction;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::camera::{
        CameraProjection, ComputedCameraValues, PerspectiveProjection, RenderTargetInfo,
    };
    use bevy::math::UVec2;
    use bevy::transform::components::Transform;

    fn planet(name: &str, center: Vec3) -> PlanetSphere {
        PlanetSphere {
            name: name.into(),
            url: format!("{}.html", name.to_lowercase()),
            center,
            radius: 2.0,
        }
    }

    /// A camera as Bevy's camera system leaves it for a `size` render target
    fn camera(transform: Transform, size: UVec2) -> CameraSnapshot {
        let projection = PerspectiveProjection {
            fov: 50f32.to_radians(),
            aspect_ratio: size.x as f32 / size.y as f32,
            ..Default::default()
        };
        let camera = Camera {
            computed: ComputedCameraValues {
                clip_from_view: projection.get_clip_from_view(),
                target_info: Some(RenderTargetInfo {
                    physical_size: size,
                    scale_factor: 1.0,
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        CameraSnapshot {
            camera,
            transform: GlobalTransform::from(transform),
        }
    }

    fn snapshot(planets: Vec<PlanetSphere>) -> SceneSnapshot {
        let transform = Transform::from_xyz(0.0, 0.0, 30.0);
        SceneSnapshot::new(camera(transform, UVec2::new(1000, 750)), planets)
    }

    #[test]
    fn click_at_centre_hits_the_planet_in_front() {
        let scene = snapshot(vec![planet("Research", Vec3::ZERO)]);
        let link = scene.pick(500.0, 375.0).unwrap();
        assert_eq!(link.name, "Research");
        assert_eq!(link.url, "research.html");
        assert!(!link.is_external());
    }

    #[test]
    fn click_on_empty_space_hits_nothing() {
        let scene = snapshot(vec![planet("Research", Vec3::ZERO)]);
        assert_eq!(scene.pick(10.0, 10.0), None);
    }

    #[test]
    fn nearest_planet_wins() {
        let scene = snapshot(vec![
            planet("Far", Vec3::new(0.0, 0.0, -20.0)),
            planet("Near", Vec3::new(0.0, 0.0, 10.0)),
        ]);
        assert_eq!(scene.pick(500.0, 375.0).unwrap().name, "Near");
    }

    #[test]
    fn planets_behind_the_camera_are_ignored() {
        let scene = snapshot(vec![planet("Behind", Vec3::new(0.0, 0.0, 40.0))]);
        assert_eq!(scene.pick(500.0, 375.0), None);
        assert!(scene.labels.is_empty());
    }

    #[test]
    fn projection_inverts_the_pick_ray() {
        let scene = snapshot(vec![planet("Side", Vec3::new(6.0, -3.0, 0.0))]);
        let pixel = scene.camera.project(Vec3::new(6.0, -3.0, 0.0)).unwrap();
        assert!(pixel.x > 500.0 && pixel.y > 375.0);
        assert_eq!(scene.pick(pixel.x, pixel.y).unwrap().name, "Side");
    }

    #[test]
    fn target_aspect_ratio_comes_from_the_camera() {
        let transform = Transform::from_xyz(0.0, 0.0, 30.0);
        let wide = camera(transform, UVec2::new(1600, 600));
        let square = camera(transform, UVec2::new(600, 600));
        let point = Vec3::new(5.0, 5.0, 0.0);

        let on_wide = wide.project(point).unwrap() - Vec2::new(800.0, 300.0);
        let on_square = square.project(point).unwrap() - Vec2::new(300.0, 300.0);
        // Same vertical field of view, so the same pixel offsets
        assert_relative_eq!(on_wide.x, on_square.x, epsilon = 1e-2);
        assert_relative_eq!(on_wide.y, on_square.y, epsilon = 1e-2);
        assert_relative_eq!(on_wide.x, -on_wide.y, epsilon = 1e-2);
    }

    #[test]
    fn rotated_camera_picks_along_its_view() {
        let transform = Transform::from_xyz(30.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y);
        let view = camera(transform, UVec2::new(1000, 750));
        let ray = view.ray_through(Vec2::new(500.0, 375.0)).unwrap();
        let toward_origin = (-transform.translation).normalize();
        assert_relative_eq!(ray.direction.dot(toward_origin), 1.0, epsilon = 1e-4);

        let scene = SceneSnapshot::new(view, vec![planet("Game", Vec3::ZERO)]);
        assert_eq!(scene.pick(500.0, 375.0).unwrap().name, "Game");
        assert_relative_eq!(scene.labels[0].x, 500.0, epsilon = 1e-2);
        assert!(scene.labels[0].y < 375.0);
    }

    #[test]
    fn labels_sit_above_their_planet() {
        let scene = snapshot(vec![planet("Game", Vec3::ZERO)]);
        assert_eq!(scene.labels.len(), 1);
        assert_relative_eq!(scene.labels[0].x, 500.0, epsilon = 1e-3);
        assert!(scene.labels[0].y < 375.0);
    }

    #[test]
    fn camera_without_a_target_size_places_nothing() {
        let mut view = camera(Transform::from_xyz(0.0, 0.0, 30.0), UVec2::new(1000, 750));
        view.camera.computed.target_info = None;
        let scene = SceneSnapshot::new(view, vec![planet("Research", Vec3::ZERO)]);
        assert!(scene.labels.is_empty());
        assert_eq!(scene.pick(500.0, 375.0), None);
    }

    #[test]
    fn external_links() {
        let link = PlanetLink {
            name: "Blog".into(),
            url: "https://example.org".into(),
        };
        assert!(link.is_external());
    }
}

//! Scene setup system
//!
//! Builds the solar system: the sun, one sphere per configured planet,
//! the sun light, and the offscreen camera the orbit controls drive.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{primitives::Sphere, Vec3},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::{CameraController, OffscreenCamera, Planet, Sun};
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::SceneSettings;
use crate::config::{camera, scene, RENDER_HEIGHT, RENDER_WIDTH};

/// Setup the solar system with its camera and offscreen render target
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    settings: Res<SceneSettings>,
) {
    info!("[Bevy] Setting up scene...");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: camera::FOV_DEGREES.to_radians(),
            near: camera::NEAR_PLANE,
            far: camera::FAR_PLANE,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(camera::START_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OffscreenCamera,
        CameraController,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(scene::SUN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xff, 0xaa, 0x00),
            emissive: LinearRgba::rgb(1.0, 0.33, 0.0),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0xaa, 0xaa, 0xaa),
        brightness: 300.0,
        ..default()
    });

    // The light sits inside the sun, so it must not cast shadows
    commands.spawn((
        PointLight {
            intensity: 40_000_000.0,
            range: camera::FAR_PLANE,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.95, 0.85),
            ..default()
        },
        Transform::default(),
    ));

    let planet_mesh = meshes.add(Sphere::new(scene::PLANET_RADIUS));
    for config in &settings.planets {
        let [r, g, b] = config.color;
        let planet = Planet {
            name: config.name.clone(),
            url: config.url.clone(),
            orbit_radius: config.orbit_radius,
            speed: config.speed,
            angle: 0.0,
        };

        commands.spawn((
            Mesh3d(planet_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(r, g, b),
                perceptual_roughness: 0.6,
                ..default()
            })),
            Transform::from_translation(planet.orbit_position()),
            planet,
        ));
    }

    info!(
        "[Bevy] Scene setup complete: {} planets",
        settings.planets.len()
    );
}

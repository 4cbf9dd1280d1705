//! Camera, lighting and render surface setup

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use orrery_core::Viewport;
use tracing::info;

use crate::{color_from_hex, OrreryContext, OrrerySet};

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the light that sits inside the sun
#[derive(Component)]
pub struct SunLight;

pub struct BootstrapPlugin;

impl Plugin for BootstrapPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_camera, setup_lighting, init_viewport))
            .add_systems(Update, track_viewport.in_set(OrrerySet::Input));
    }
}

fn setup_camera(mut commands: Commands, ctx: Res<OrreryContext>) {
    let camera = &ctx.config().camera;
    let pose = ctx.camera_pose();

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y),
        MainCamera,
    ));

    info!(
        position = ?pose.position,
        interactive = ctx.rig().is_interactive(),
        "Camera ready"
    );
}

fn setup_lighting(mut commands: Commands, ctx: Res<OrreryContext>) {
    let lighting = &ctx.config().lighting;

    commands.insert_resource(AmbientLight {
        color: color_from_hex(lighting.ambient_color),
        brightness: lighting.ambient_brightness,
        ..default()
    });

    commands.spawn((
        PointLight {
            color: color_from_hex(lighting.sun_light_color),
            intensity: lighting.sun_light_intensity,
            range: lighting.sun_light_range,
            shadows_enabled: lighting.shadows,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
        SunLight,
    ));
}

fn init_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut ctx: ResMut<OrreryContext>,
) {
    if let Ok(window) = windows.single() {
        ctx.resize(Viewport::new(window.width(), window.height()));
    }
}

/// Keep pointer normalization in step with the surface size
fn track_viewport(
    mut resized: MessageReader<WindowResized>,
    mut ctx: ResMut<OrreryContext>,
) {
    if let Some(event) = resized.read().last() {
        ctx.resize(Viewport::new(event.width, event.height));
    }
}

//! The procedural sun and its glow shell

use bevy::asset::embedded_asset;
use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use crate::{color_from_hex, OrreryContext, OrrerySet};

const SUN_SHADER: &str = "embedded://orrery_scene/sun.wgsl";

#[derive(ShaderType, Clone, Copy, Debug)]
pub struct SunParams {
    pub base_color: Vec3,
    /// Accumulated shader time
    pub time: f32,
}

/// Plasma surface; all animation comes from `params.time`
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SunMaterial {
    #[uniform(0)]
    pub params: SunParams,
}

impl Material for SunMaterial {
    fn fragment_shader() -> ShaderRef {
        SUN_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Opaque
    }
}

#[derive(Component)]
pub struct Sun;

#[derive(Component)]
pub struct SunGlow;

pub struct SunPlugin;

impl Plugin for SunPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "sun.wgsl");
        app.add_plugins(MaterialPlugin::<SunMaterial>::default())
            .add_systems(Startup, spawn_sun)
            .add_systems(Update, sync_sun_time.in_set(OrrerySet::Sync));
    }
}

fn spawn_sun(
    mut commands: Commands,
    ctx: Res<OrreryContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut sun_materials: ResMut<Assets<SunMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sun = &ctx.config().sun;

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(sun.radius).mesh().uv(64, 64))),
        MeshMaterial3d(sun_materials.add(SunMaterial {
            params: SunParams {
                base_color: ctx.sun().base_color(),
                time: ctx.sun().elapsed(),
            },
        })),
        Transform::default(),
        Sun,
    ));

    let glow = color_from_hex(sun.glow_color).with_alpha(sun.glow_opacity);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(sun.glow_radius).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: glow,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        SunGlow,
    ));
}

fn sync_sun_time(
    ctx: Res<OrreryContext>,
    sun_query: Query<&MeshMaterial3d<SunMaterial>, With<Sun>>,
    mut sun_materials: ResMut<Assets<SunMaterial>>,
) {
    for handle in sun_query.iter() {
        if let Some(material) = sun_materials.get_mut(&handle.0) {
            material.params.time = ctx.sun().elapsed();
        }
    }
}

//! Starfield point cloud

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::{color_from_hex, OrreryContext, OrrerySet};

#[derive(Component)]
pub struct StarfieldCloud;

pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_starfield)
            .add_systems(Update, sync_starfield_rotation.in_set(OrrerySet::Sync));
    }
}

pub fn point_cloud_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

fn spawn_starfield(
    mut commands: Commands,
    ctx: Res<OrreryContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let stars = ctx.starfield();

    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(stars.points()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color_from_hex(ctx.config().starfield.color),
            unlit: true,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_y(stars.rotation_angle())),
        StarfieldCloud,
    ));
}

fn sync_starfield_rotation(
    ctx: Res<OrreryContext>,
    mut query: Query<&mut Transform, With<StarfieldCloud>>,
) {
    let rotation = Quat::from_rotation_y(ctx.starfield().rotation_angle());
    for mut transform in query.iter_mut() {
        transform.rotation = rotation;
    }
}

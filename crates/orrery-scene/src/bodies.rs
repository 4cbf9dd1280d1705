//! Planet meshes, orbit guides and their per-frame sync

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::{color_from_hex, OrreryContext, OrrerySet};

/// Emissive tint applied to the body under the pointer
const HIGHLIGHT_EMISSIVE: u32 = 0x333333;

/// A rendered planet, tied to its index in the body set
#[derive(Component)]
pub struct BodyVisual {
    pub index: usize,
    /// Highlight state last written to the material
    highlighted: bool,
}

/// Marker for orbit guide lines
#[derive(Component)]
pub struct OrbitGuide;

pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies)
            .add_systems(Update, (sync_body_transforms, sync_body_highlight).in_set(OrrerySet::Sync));
    }
}

/// Open polyline mesh through `points`
pub fn line_strip_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

fn spawn_bodies(
    mut commands: Commands,
    ctx: Res<OrreryContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let guides = &ctx.config().orbit_guides;
    let guide_material = materials.add(StandardMaterial {
        base_color: color_from_hex(guides.color).with_alpha(guides.opacity),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for (index, body) in ctx.bodies().iter().enumerate() {
        let sphere = Sphere::new(body.radius)
            .mesh()
            .uv(32, 32)
            .with_duplicated_vertices()
            .with_computed_flat_normals();

        commands.spawn((
            Mesh3d(meshes.add(sphere)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color_from_hex(body.color),
                perceptual_roughness: 0.8,
                metallic: 0.1,
                ..default()
            })),
            Transform::from_translation(body.position()),
            BodyVisual {
                index,
                highlighted: false,
            },
            Name::new(body.name.clone()),
        ));

        commands.spawn((
            Mesh3d(meshes.add(line_strip_mesh(&body.orbit_guide(guides.segments)))),
            MeshMaterial3d(guide_material.clone()),
            Transform::default(),
            OrbitGuide,
        ));
    }
}

fn sync_body_transforms(
    ctx: Res<OrreryContext>,
    mut body_query: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in body_query.iter_mut() {
        if let Some(body) = ctx.bodies().get(visual.index) {
            transform.translation = body.position();
            transform.rotation = Quat::from_rotation_y(body.spin());
        }
    }
}

fn sync_body_highlight(
    ctx: Res<OrreryContext>,
    mut body_query: Query<(&mut BodyVisual, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut visual, handle) in body_query.iter_mut() {
        let highlighted = ctx
            .bodies()
            .get(visual.index)
            .is_some_and(|body| body.is_highlighted());
        if highlighted == visual.highlighted {
            continue;
        }

        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = if highlighted {
                color_from_hex(HIGHLIGHT_EMISSIVE).to_linear()
            } else {
                LinearRgba::BLACK
            };
        }
        visual.highlighted = highlighted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    #[test]
    fn test_line_strip_mesh() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0)];
        let mesh = line_strip_mesh(&points);

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineStrip);
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => {
                assert_eq!(positions.len(), 3);
                assert_eq!(positions[2], [1.0, 0.0, 1.0]);
            }
            other => panic!("unexpected positions: {other:?}"),
        }
    }
}

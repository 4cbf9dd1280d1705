//! The per-frame tick

use bevy::prelude::*;

use crate::bootstrap::MainCamera;
use crate::controls::PendingRigInput;
use crate::{OrreryContext, OrrerySet};

pub struct DriverPlugin;

impl Plugin for DriverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drive_orrery.in_set(OrrerySet::Tick));
    }
}

/// Advance the context one frame and place the camera where the rig says
fn drive_orrery(
    time: Res<Time>,
    mut ctx: ResMut<OrreryContext>,
    mut pending: ResMut<PendingRigInput>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let input = pending.take();
    let pose = ctx.tick(time.delta_secs(), &input);

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::time::TimeUpdateStrategy;
    use orrery_core::OrreryConfig;
    use std::time::Duration;

    #[test]
    fn test_tick_moves_bodies_and_camera() {
        let mut config = OrreryConfig::default();
        config.starfield.count = 10;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .insert_resource(OrreryContext::new(config).unwrap())
            .init_resource::<PendingRigInput>()
            .add_systems(Update, drive_orrery);
        let camera = app.world_mut().spawn((Transform::default(), MainCamera)).id();

        let before = app.world().resource::<OrreryContext>().bodies().get(0).unwrap().angle();
        for _ in 0..5 {
            app.update();
        }

        let ctx = app.world().resource::<OrreryContext>();
        assert_eq!(ctx.frames(), 5);
        assert!(ctx.bodies().get(0).unwrap().angle() > before);
        assert!(ctx.starfield().rotation() > 0.0);

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_abs_diff_eq!(transform.translation.x, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(transform.translation.y, 5.0, epsilon = 1e-3);
        assert_abs_diff_eq!(transform.translation.z, 15.0, epsilon = 1e-3);
    }
}

//! Mouse and touch input for the camera rig

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use orrery_core::RigInput;

use crate::OrrerySet;

/// Wheel pixels that count as one line of scrolling
const PIXELS_PER_LINE: f32 = 100.0;

/// Whether an overlay is using the pointer this frame
#[derive(Resource, Default, Debug)]
pub struct PointerCapture {
    pub ui_wants_pointer: bool,
}

/// Rig input collected since the last tick
#[derive(Resource, Default, Debug)]
pub struct PendingRigInput(pub RigInput);

impl PendingRigInput {
    pub fn take(&mut self) -> RigInput {
        std::mem::take(&mut self.0)
    }
}

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerCapture>()
            .init_resource::<PendingRigInput>()
            .add_systems(Update, gather_rig_input.in_set(OrrerySet::Input));
    }
}

fn wheel_lines(wheel: &MouseWheel) -> f32 {
    match wheel.unit {
        MouseScrollUnit::Line => wheel.y,
        MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_LINE,
    }
}

fn gather_rig_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    capture: Res<PointerCapture>,
    mut pending: ResMut<PendingRigInput>,
) {
    let total_motion: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let scrolled: f32 = mouse_wheel.read().map(wheel_lines).sum();

    if capture.ui_wants_pointer {
        return;
    }

    // Orbit with left mouse drag
    if mouse_button.pressed(MouseButton::Left) {
        pending.0.rotate += total_motion;
    }
    pending.0.zoom += scrolled;

    // One finger orbits, two fingers pinch
    let touches: Vec<_> = touch_input.iter().collect();
    match touches.as_slice() {
        [touch] => pending.0.rotate += touch.delta(),
        [first, second] => {
            let current = first.position().distance(second.position());
            let previous = (first.position() - first.delta())
                .distance(second.position() - second.delta());
            pending.0.zoom += (current - previous) / PIXELS_PER_LINE;
        }
        _ => {}
    }
}

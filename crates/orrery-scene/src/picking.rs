//! Hover and click picking against the planets

use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};
use orrery_core::Ray;
use tracing::debug;

use crate::bootstrap::MainCamera;
use crate::controls::PointerCapture;
use crate::{OrreryContext, OrrerySet};

/// Tells a click from a camera drag
#[derive(Resource, Default, Debug)]
pub struct DragTracker {
    /// Position where the press started
    start: Option<Vec2>,
    /// Whether the press has moved past the threshold
    dragged: bool,
}

impl DragTracker {
    pub fn press(&mut self, at: Vec2) {
        self.start = Some(at);
        self.dragged = false;
    }

    pub fn moved(&mut self, to: Vec2, threshold: f32) {
        if let Some(start) = self.start {
            if to.distance(start) > threshold {
                self.dragged = true;
            }
        }
    }

    /// End the press; returns where it started if it was a click
    pub fn release(&mut self) -> Option<Vec2> {
        let start = self.start.take();
        let dragged = std::mem::take(&mut self.dragged);
        start.filter(|_| !dragged)
    }
}

pub struct BodyPickingPlugin;

impl Plugin for BodyPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragTracker>().add_systems(
            Update,
            (hover_bodies, click_bodies).chain().in_set(OrrerySet::Input),
        );
    }
}

/// Ray from the main camera through a window position
fn camera_ray(
    camera_query: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    position: Vec2,
) -> Option<Ray> {
    let (camera, transform) = camera_query.single().ok()?;
    let ray = camera.viewport_to_world(transform, position).ok()?;
    Ray::new(ray.origin, *ray.direction)
}

fn hover_bodies(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut cursor_left: MessageReader<CursorLeft>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    capture: Res<PointerCapture>,
    mut ctx: ResMut<OrreryContext>,
) {
    let left = cursor_left.read().count() > 0;
    let Some(position) = cursor_moved.read().last().map(|moved| moved.position) else {
        if left {
            let last = ctx.pointer().client;
            ctx.pointer_moved(last, None);
        }
        return;
    };

    // Pointer over the overlay counts as over nothing
    let ray = if capture.ui_wants_pointer {
        None
    } else {
        camera_ray(&camera_query, position)
    };
    ctx.pointer_moved(position, ray);
}

fn click_bodies(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    capture: Res<PointerCapture>,
    mut tracker: ResMut<DragTracker>,
    mut ctx: ResMut<OrreryContext>,
) {
    let threshold = ctx.config().navigation.click_drag_threshold;
    let cursor = windows.single().ok().and_then(|window| window.cursor_position());
    let mut click_at: Option<Vec2> = None;

    if mouse_button.just_pressed(MouseButton::Left) && !capture.ui_wants_pointer {
        if let Some(position) = cursor {
            tracker.press(position);
        }
    }
    if let Some(position) = cursor {
        tracker.moved(position, threshold);
    }
    if mouse_button.just_released(MouseButton::Left) {
        click_at = tracker.release();
    }

    // Taps on touch screens
    if !capture.ui_wants_pointer {
        for touch in touch_input.iter_just_pressed() {
            tracker.press(touch.position());
        }
    }
    for touch in touch_input.iter() {
        tracker.moved(touch.position(), threshold);
    }
    for _ in touch_input.iter_just_released() {
        click_at = click_at.or_else(|| tracker.release());
    }

    if let Some(position) = click_at {
        let ray = camera_ray(&camera_query, position);
        if ctx.clicked(position, ray) {
            debug!(?position, "Body clicked");
        }
    }
}

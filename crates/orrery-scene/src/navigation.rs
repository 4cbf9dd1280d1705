//! Navigation requests coming from outside the canvas
//!
//! Page callbacks (nav links, the back button) run outside the Bevy schedule,
//! so they push into a shared queue that is drained once per frame.

use bevy::prelude::*;
use orrery_core::SectionId;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::{OrreryContext, OrrerySet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    Select(SectionId),
    Back,
}

/// Pending requests from page callbacks
#[derive(Resource, Default, Clone)]
pub struct HostRequests(pub Arc<Mutex<VecDeque<HostRequest>>>);

impl HostRequests {
    pub fn push(&self, request: HostRequest) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push_back(request);
        }
    }

    fn drain(&self) -> Vec<HostRequest> {
        self.0
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostRequests>().add_systems(
            Update,
            (apply_host_requests, back_on_escape).in_set(OrrerySet::Input),
        );
    }
}

fn apply_host_requests(requests: Res<HostRequests>, mut ctx: ResMut<OrreryContext>) {
    for request in requests.drain() {
        let accepted = match &request {
            HostRequest::Select(section) => ctx.select(section.clone()),
            HostRequest::Back => ctx.back(),
        };
        debug!(?request, accepted, "Host request");
    }
}

/// Handle Escape key to return to the overview
fn back_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut ctx: ResMut<OrreryContext>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        ctx.back();
    }
}

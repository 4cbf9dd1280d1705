//! Orrery Scene - Bevy rendering and input for the solar-system navigator
//!
//! This crate wires the engine-agnostic [`orrery_core::Orrery`] context into a
//! Bevy app: it spawns the sun, planets, orbit guides and starfield, turns
//! mouse and touch input into picking and camera motion, drives the per-frame
//! tick and hands page commands to whichever host is attached.
//!
//! The app inserts an [`OrreryContext`] before adding [`OrreryScenePlugin`].
//! Native builds add [`overlay::OverlayPlugin`] to draw the page chrome with
//! egui; browser builds attach a DOM-backed [`host::PageHost`] instead.

pub mod bodies;
pub mod bootstrap;
pub mod controls;
pub mod driver;
pub mod host;
pub mod navigation;
pub mod overlay;
pub mod picking;
pub mod starfield;
pub mod sun;

use bevy::prelude::*;
use orrery_core::{ConfigError, Orrery, OrreryConfig};

/// The application context, owned by the app for its whole lifetime
#[derive(Resource)]
pub struct OrreryContext(pub Orrery);

impl OrreryContext {
    pub fn new(config: OrreryConfig) -> Result<Self, ConfigError> {
        Ok(Self(Orrery::new(config)?))
    }
}

impl std::ops::Deref for OrreryContext {
    type Target = Orrery;

    fn deref(&self) -> &Orrery {
        &self.0
    }
}

impl std::ops::DerefMut for OrreryContext {
    fn deref_mut(&mut self) -> &mut Orrery {
        &mut self.0
    }
}

/// Per-frame ordering inside `Update`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrrerySet {
    /// Host requests, pointer and keyboard handling
    Input,
    /// Advance the context by one frame
    Tick,
    /// Copy context state onto entities
    Sync,
    /// Hand page commands to the host
    Host,
}

/// Plugin that sets up the whole solar-system scene
pub struct OrreryScenePlugin;

impl Plugin for OrreryScenePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                OrrerySet::Input,
                OrrerySet::Tick,
                OrrerySet::Sync,
                OrrerySet::Host,
            )
                .chain(),
        )
        .add_plugins(bootstrap::BootstrapPlugin)
        .add_plugins(sun::SunPlugin)
        .add_plugins(bodies::BodiesPlugin)
        .add_plugins(starfield::StarfieldPlugin)
        .add_plugins(navigation::NavigationPlugin)
        .add_plugins(controls::ControlsPlugin)
        .add_plugins(picking::BodyPickingPlugin)
        .add_plugins(driver::DriverPlugin)
        .add_plugins(host::HostPlugin);
    }
}

/// Convert a `0xRRGGBB` integer into a Bevy color
pub fn color_from_hex(hex: u32) -> Color {
    let [r, g, b] = orrery_core::hex_to_rgb(hex);
    Color::srgb(r, g, b)
}

pub use bootstrap::MainCamera;
pub use controls::PointerCapture;
pub use host::PageHost;
pub use navigation::{HostRequest, HostRequests};

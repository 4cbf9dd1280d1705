//! Orrery Core - engine-agnostic model of the solar-system navigator
//!
//! This crate holds everything that is not rendering:
//! - Orbital bodies, their motion and orbit guides
//! - The navigation state machine and its deferred guard interval
//! - Ray picking and hover state
//! - Camera rigs (damped orbit, or an inert stand-in)
//! - Page commands for whichever host renders the surrounding UI
//! - Configuration loading

pub mod body;
pub mod config;
pub mod controls;
pub mod navigation;
pub mod orrery;
pub mod page;
pub mod picking;
pub mod plasma;
pub mod schedule;
pub mod starfield;

pub use body::{default_bodies, BodyDefinition, OrbitalBody, OrbitalBodySet};
pub use config::{hex_to_rgb, ConfigError, OrreryConfig};
pub use controls::{rig_from_config, CameraPose, CameraRig, InertRig, OrbitRig, RigInput, RigLimits};
pub use navigation::{Destination, NavigationState, Navigator, SectionId};
pub use orrery::Orrery;
pub use page::{Cursor, HostPage, PageCommand, PageState, Tooltip};
pub use picking::{HoverOutcome, Ray, Viewport};
pub use plasma::SunSurface;
pub use starfield::Starfield;

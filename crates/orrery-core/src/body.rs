//! Orbital bodies - the planets that stand in for site sections

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::navigation::SectionId;

/// Amplitude of the vertical bob a body makes along its orbit
const BOB_AMPLITUDE: f32 = 0.1;
/// Bobs per revolution
const BOB_FREQUENCY: f32 = 3.0;

/// Static definition of a body, as listed in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDefinition {
    /// Label shown in the hover tooltip
    pub name: String,
    /// Content section this body opens
    pub section: String,
    /// Surface color as `0xRRGGBB`
    pub color: u32,
    pub orbit_radius: f32,
    /// Radians per reference frame
    pub angular_speed: f32,
    pub radius: f32,
    /// Short blurb for hosts that render content themselves
    #[serde(default)]
    pub summary: Option<String>,
}

impl BodyDefinition {
    pub fn new(
        name: &str,
        section: &str,
        color: u32,
        orbit_radius: f32,
        angular_speed: f32,
        radius: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            section: section.to_string(),
            color,
            orbit_radius,
            angular_speed,
            radius,
            summary: None,
        }
    }
}

/// The four sections of the site, innermost first
pub fn default_bodies() -> Vec<BodyDefinition> {
    vec![
        BodyDefinition::new("Home", "home", 0x4A90E2, 5.0, 0.001, 0.6),
        BodyDefinition::new("Projects", "projects", 0xF5A623, 7.0, 0.0008, 0.7),
        BodyDefinition::new("Publications", "publications", 0x7ED321, 9.0, 0.0006, 0.8),
        BodyDefinition::new("Contact", "contact", 0xD0021B, 11.0, 0.0004, 0.5),
    ]
}

/// A body in flight
#[derive(Debug, Clone)]
pub struct OrbitalBody {
    pub name: String,
    pub section: SectionId,
    pub color: u32,
    pub radius: f32,
    pub orbit_radius: f32,
    pub angular_speed: f32,
    pub summary: Option<String>,
    angle: f32,
    base_offset: f32,
    spin: f32,
    highlighted: bool,
}

impl OrbitalBody {
    /// Place the `index`-th body: a quarter turn apart, slightly off the orbital plane
    pub fn from_definition(index: usize, definition: &BodyDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            section: SectionId::new(definition.section.as_str()),
            color: definition.color,
            radius: definition.radius,
            orbit_radius: definition.orbit_radius,
            angular_speed: definition.angular_speed,
            summary: definition.summary.clone(),
            angle: Self::initial_angle(index),
            base_offset: Self::initial_offset(index),
            spin: 0.0,
            highlighted: false,
        }
    }

    pub fn initial_angle(index: usize) -> f32 {
        (index as f32 * FRAC_PI_2).rem_euclid(TAU)
    }

    pub fn initial_offset(index: usize) -> f32 {
        (index as f32 * 0.5).sin() * 0.5
    }

    /// Current angle along the orbit, in `[0, 2π)`
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn base_offset(&self) -> f32 {
        self.base_offset
    }

    /// Accumulated rotation about the body's own vertical axis
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// World position derived from the current angle
    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            cos * self.orbit_radius,
            self.base_offset + (self.angle * BOB_FREQUENCY).sin() * BOB_AMPLITUDE,
            sin * self.orbit_radius,
        )
    }

    /// Advance by `scale` reference frames
    pub fn advance(&mut self, scale: f32, spin_step: f32) {
        self.angle = (self.angle + self.angular_speed * scale).rem_euclid(TAU);
        self.spin = (self.spin + spin_step * scale).rem_euclid(TAU);
    }

    /// Closed polyline tracing the orbit in the `y = 0` plane (`segments + 1` points)
    pub fn orbit_guide(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * TAU;
                Vec3::new(
                    theta.cos() * self.orbit_radius,
                    0.0,
                    theta.sin() * self.orbit_radius,
                )
            })
            .collect()
    }
}

/// The ordered set of bodies, created once at startup
#[derive(Debug, Clone)]
pub struct OrbitalBodySet {
    bodies: Vec<OrbitalBody>,
    spin_step: f32,
}

impl OrbitalBodySet {
    pub fn from_definitions(definitions: &[BodyDefinition], spin_step: f32) -> Self {
        Self {
            bodies: definitions
                .iter()
                .enumerate()
                .map(|(index, definition)| OrbitalBody::from_definition(index, definition))
                .collect(),
            spin_step,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OrbitalBody> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitalBody> {
        self.bodies.iter()
    }

    /// Index of the body that opens `section`
    pub fn find_section(&self, section: &SectionId) -> Option<usize> {
        self.bodies.iter().position(|b| &b.section == section)
    }

    /// Advance every body by `scale` reference frames
    pub fn advance(&mut self, scale: f32) {
        for body in &mut self.bodies {
            body.advance(scale, self.spin_step);
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.bodies.iter().position(|b| b.highlighted)
    }

    /// Highlight exactly `index` (or nothing), clearing every other body
    pub fn set_highlight(&mut self, index: Option<usize>) {
        for (i, body) in self.bodies.iter_mut().enumerate() {
            body.highlighted = Some(i) == index;
        }
    }
}

//! Configuration loading and validation
//!
//! Every section is optional in TOML; anything left out falls back to the
//! values the site shipped with (four planets, 300 ms guard, 10k stars).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::body::{default_bodies, BodyDefinition};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrreryConfig {
    #[serde(default = "default_bodies")]
    pub bodies: Vec<BodyDefinition>,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub sun: SunConfig,
    #[serde(default)]
    pub starfield: StarfieldConfig,
    #[serde(default)]
    pub orbit_guides: OrbitGuideConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub page: PageConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            motion: MotionConfig::default(),
            sun: SunConfig::default(),
            starfield: StarfieldConfig::default(),
            orbit_guides: OrbitGuideConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            navigation: NavigationConfig::default(),
            page: PageConfig::default(),
        }
    }
}

/// Frame pacing for orbital motion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Frame rate at which one tick advances a body by exactly its speed
    pub reference_fps: f32,
    /// Self-rotation per reference frame (radians)
    pub spin_step: f32,
    /// Longest frame delta accepted, in seconds
    pub max_frame_delta: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reference_fps: 60.0,
            spin_step: 0.0002,
            max_frame_delta: 0.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub radius: f32,
    pub glow_radius: f32,
    pub glow_color: u32,
    pub glow_opacity: f32,
    /// Linear RGB base color of the plasma
    pub base_color: [f32; 3],
    /// Shader seconds per wall-clock second
    pub time_scale: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            glow_radius: 1.55,
            glow_color: 0xFFD700,
            glow_opacity: 0.3,
            base_color: [0.9, 0.4, 0.1],
            time_scale: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Side length of the cube the stars are sampled from
    pub spread: f32,
    /// Rotation about +Y added every tick (radians)
    pub rotation_step: f64,
    pub color: u32,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            spread: 2000.0,
            rotation_step: 0.0001,
            color: 0xFFFFFF,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitGuideConfig {
    pub segments: usize,
    pub color: u32,
    pub opacity: f32,
}

impl Default for OrbitGuideConfig {
    fn default() -> Self {
        Self {
            segments: 100,
            color: 0x404040,
            opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Use the interactive orbit controller; false pins the camera
    pub orbit_controls: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle from +Y the camera may reach (π/2 keeps it above the orbital plane)
    pub max_polar_angle: f32,
    pub damping: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Fractional distance change per wheel line
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 15.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            orbit_controls: true,
            min_distance: 8.0,
            max_distance: 25.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: u32,
    pub ambient_brightness: f32,
    pub sun_light_color: u32,
    pub sun_light_intensity: f32,
    pub sun_light_range: f32,
    pub shadows: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x404040,
            ambient_brightness: 80.0,
            sun_light_color: 0xFFD700,
            sun_light_intensity: 2_000_000.0,
            sun_light_range: 100.0,
            shadows: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Must match the host page's panel fade duration
    pub guard_interval_ms: u64,
    pub loading_delay_ms: u64,
    /// Tooltip offset from the pointer, in CSS pixels
    pub tooltip_offset: [f32; 2],
    /// Pointer travel (pixels) beyond which a press is a drag, not a click
    pub click_drag_threshold: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            guard_interval_ms: 300,
            loading_delay_ms: 1500,
            tooltip_offset: [15.0, -30.0],
            click_drag_threshold: 10.0,
        }
    }
}

/// Selectors for the host page elements the navigator drives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub canvas: String,
    pub tooltip_id: String,
    pub back_button_id: String,
    pub loading_id: String,
    pub content_container: String,
    pub section_selector: String,
    pub nav_link_selector: String,
    pub section_attribute: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas: "#orrery-canvas".to_string(),
            tooltip_id: "planet-tooltip".to_string(),
            back_button_id: "back-btn".to_string(),
            loading_id: "loading".to_string(),
            content_container: ".content-container".to_string(),
            section_selector: ".content-section".to_string(),
            nav_link_selector: ".nav-links a".to_string(),
            section_attribute: "data-section".to_string(),
        }
    }
}

/// Split a `0xRRGGBB` color into sRGB components in `0.0..=1.0`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

impl OrreryConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: OrreryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), bodies = config.bodies.len(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from file, or fall back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(
                path = %path.display(),
                "Configuration file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Check the invariants the rest of the system relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::Invalid("at least one body is required".into()));
        }

        let mut sections = HashSet::new();
        for body in &self.bodies {
            if body.name.trim().is_empty() {
                return Err(ConfigError::Invalid("body name must not be empty".into()));
            }
            if body.section.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "body '{}' has an empty section id",
                    body.name
                )));
            }
            if !sections.insert(body.section.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "section '{}' is used by more than one body",
                    body.section
                )));
            }
            if !(body.orbit_radius > 0.0) || !(body.radius > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "body '{}' needs positive orbit_radius and radius",
                    body.name
                )));
            }
            if !body.angular_speed.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "body '{}' has a non-finite angular_speed",
                    body.name
                )));
            }
        }

        if !(self.motion.reference_fps > 0.0) || !(self.motion.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid(
                "motion.reference_fps and motion.max_frame_delta must be positive".into(),
            ));
        }
        if self.orbit_guides.segments < 3 {
            return Err(ConfigError::Invalid("orbit_guides.segments must be at least 3".into()));
        }
        if !(self.starfield.spread > 0.0) {
            return Err(ConfigError::Invalid("starfield.spread must be positive".into()));
        }
        if !(self.starfield.rotation_step > 0.0) || !self.starfield.rotation_step.is_finite() {
            return Err(ConfigError::Invalid(
                "starfield.rotation_step must be positive and finite".into(),
            ));
        }
        if !(self.sun.time_scale >= 0.0) || !self.sun.time_scale.is_finite() {
            return Err(ConfigError::Invalid(
                "sun.time_scale must be non-negative and finite".into(),
            ));
        }
        if !(self.sun.radius > 0.0) || self.sun.glow_radius < self.sun.radius {
            return Err(ConfigError::Invalid(
                "sun.glow_radius must be at least sun.radius, and both positive".into(),
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid("camera.fov_degrees must be in (0, 180)".into()));
        }
        if !(camera.near > 0.0) || !(camera.far > camera.near) {
            return Err(ConfigError::Invalid("camera needs 0 < near < far".into()));
        }

        Ok(())
    }
}

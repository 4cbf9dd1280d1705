//! Camera controllers
//!
//! The orbit rig mirrors a classic "orbit controls" helper: spherical
//! coordinates around a target, damped rotation, clamped zoom and a polar
//! limit that keeps the camera above the orbital plane. When that rig cannot
//! be used the inert rig takes its place behind the same trait.

use glam::{Vec2, Vec3};
use tracing::warn;

use crate::config::CameraConfig;

/// Keeps `look_at` away from the degenerate straight-down pose
const MIN_POLAR: f32 = 1e-3;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigInput {
    /// Drag in pixels (x right, y down)
    pub rotate: Vec2,
    /// Wheel lines, positive to zoom in
    pub zoom: f32,
}

impl RigInput {
    pub fn is_idle(&self) -> bool {
        self.rotate == Vec2::ZERO && self.zoom == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
}

impl RigLimits {
    fn is_usable(&self) -> bool {
        self.min_distance > 0.0
            && self.max_distance >= self.min_distance
            && self.max_distance.is_finite()
            && self.max_polar_angle > MIN_POLAR
            && self.max_polar_angle <= std::f32::consts::PI
    }
}

/// Per-frame camera update contract shared by every controller
pub trait CameraRig: Send + Sync {
    /// Fold in this frame's input and return the pose to render from
    fn update(&mut self, input: &RigInput) -> CameraPose;

    fn pose(&self) -> CameraPose;

    fn limits(&self) -> RigLimits;

    /// Whether input moves the camera at all
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Damped orbit around a fixed target
#[derive(Debug, Clone)]
pub struct OrbitRig {
    target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    limits: RigLimits,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitRig {
    pub fn new(position: Vec3, target: Vec3, limits: RigLimits) -> Self {
        let offset = position - target;
        let distance = offset.length().max(f32::EPSILON);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target,
            azimuth,
            polar: polar.clamp(MIN_POLAR, limits.max_polar_angle),
            distance: distance.clamp(limits.min_distance, limits.max_distance),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            limits,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_speeds(mut self, rotate_speed: f32, zoom_speed: f32) -> Self {
        self.rotate_speed = rotate_speed;
        self.zoom_speed = zoom_speed;
        self
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }
}

impl CameraRig for OrbitRig {
    fn update(&mut self, input: &RigInput) -> CameraPose {
        // Dragging down lifts the camera, dragging right swings it left
        self.pending_azimuth -= input.rotate.x * self.rotate_speed;
        self.pending_polar -= input.rotate.y * self.rotate_speed;

        if input.zoom != 0.0 {
            let factor = (1.0 - input.zoom * self.zoom_speed).clamp(0.5, 1.5);
            self.distance = (self.distance * factor)
                .clamp(self.limits.min_distance, self.limits.max_distance);
        }

        let k = if self.damping > 0.0 && self.damping <= 1.0 {
            self.damping
        } else {
            1.0
        };
        self.azimuth += self.pending_azimuth * k;
        self.polar = (self.polar + self.pending_polar * k)
            .clamp(MIN_POLAR, self.limits.max_polar_angle);
        self.pending_azimuth *= 1.0 - k;
        self.pending_polar *= 1.0 - k;

        self.pose()
    }

    fn pose(&self) -> CameraPose {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let offset = Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * self.distance;
        CameraPose {
            position: self.target + offset,
            target: self.target,
        }
    }

    fn limits(&self) -> RigLimits {
        self.limits
    }
}

/// Stand-in controller: same contract, never moves
#[derive(Debug, Clone)]
pub struct InertRig {
    pose: CameraPose,
    limits: RigLimits,
}

impl InertRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };
        Self {
            pose: CameraPose { position, target },
            limits: RigLimits {
                min_distance: distance,
                max_distance: distance,
                max_polar_angle: polar,
            },
        }
    }
}

impl CameraRig for InertRig {
    fn update(&mut self, _input: &RigInput) -> CameraPose {
        self.pose
    }

    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn limits(&self) -> RigLimits {
        self.limits
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Build the configured rig, falling back to an inert one when orbiting is unavailable
pub fn rig_from_config(camera: &CameraConfig) -> Box<dyn CameraRig> {
    let position = Vec3::from_array(camera.position);
    let target = Vec3::from_array(camera.target);
    let limits = RigLimits {
        min_distance: camera.min_distance,
        max_distance: camera.max_distance,
        max_polar_angle: camera.max_polar_angle,
    };

    if !camera.orbit_controls {
        warn!("Orbit controls disabled, camera is fixed");
        return Box::new(InertRig::new(position, target));
    }
    if !limits.is_usable() {
        warn!(?limits, "Orbit control limits unusable, camera is fixed");
        return Box::new(InertRig::new(position, target));
    }

    Box::new(
        OrbitRig::new(position, target, limits)
            .with_damping(camera.damping)
            .with_speeds(camera.rotate_speed, camera.zoom_speed),
    )
}

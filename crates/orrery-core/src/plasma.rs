//! Procedural sun surface
//!
//! CPU mirror of `sun.wgsl` in the scene crate. The shader is what renders;
//! this copy keeps the math testable and documents the constants in one place.

use glam::{Vec2, Vec3};

use crate::config::SunConfig;

pub const OCTAVES: usize = 6;
/// Texture-space frequency of the base octave
pub const UV_SCALE: f32 = 4.0;
/// Texture-space drift per shader second
pub const DRIFT_RATE: f32 = 0.1;
pub const PLASMA_GAIN: f32 = 2.5;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Pseudo-random value in `[0, 1)` for a lattice point
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(12.9898, 78.233)).sin() * 43_758.547)
}

/// Smoothly interpolated lattice noise in `[0, 1)`
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Fractal sum of [`OCTAVES`] noise layers, halving amplitude and doubling frequency
pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..OCTAVES {
        value += amplitude * value_noise(p);
        p *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Edge brightening; `facing` is the cosine between normal and view direction
pub fn rim(facing: f32) -> f32 {
    (1.0 - facing.clamp(0.0, 1.0)).powi(2)
}

/// Sun surface state: only accumulated shader time survives between frames
#[derive(Debug, Clone)]
pub struct SunSurface {
    elapsed: f32,
    time_scale: f32,
    base_color: Vec3,
}

impl SunSurface {
    pub fn new(config: &SunConfig) -> Self {
        Self {
            elapsed: 0.0,
            time_scale: config.time_scale,
            base_color: Vec3::from_array(config.base_color),
        }
    }

    /// Shader seconds accumulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0) * self.time_scale;
    }

    /// Linear color at texture coordinate `uv`
    pub fn shade(&self, uv: Vec2, facing: f32) -> Vec3 {
        let n = fbm(uv * UV_SCALE + Vec2::splat(self.elapsed * DRIFT_RATE));
        self.base_color * n * PLASMA_GAIN + self.base_color * rim(facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_noise_range() {
        for x in 0..40 {
            for y in 0..40 {
                let p = Vec2::new(x as f32 * 0.37, y as f32 * 0.53);
                let n = value_noise(p);
                assert!((0.0..=1.0).contains(&n), "noise {n} at {p}");
                let f = fbm(p);
                assert!((0.0..1.0).contains(&f), "fbm {f} at {p}");
            }
        }
    }

    #[test]
    fn test_noise_matches_lattice() {
        let p = Vec2::new(3.0, 7.0);
        assert_abs_diff_eq!(value_noise(p), hash(p), epsilon = 1e-6);
    }

    #[test]
    fn test_rim() {
        assert_eq!(rim(1.0), 0.0);
        assert_eq!(rim(0.0), 1.0);
        assert_abs_diff_eq!(rim(0.5), 0.25, epsilon = 1e-6);
        assert_eq!(rim(-0.3), 1.0);
    }

    #[test]
    fn test_edges_brighter_than_center() {
        let sun = SunSurface::new(&SunConfig::default());
        let uv = Vec2::new(0.25, 0.5);
        let edge = sun.shade(uv, 0.0);
        let center = sun.shade(uv, 1.0);
        let diff = edge - center;
        assert_abs_diff_eq!(diff.x, sun.base_color().x, epsilon = 1e-5);
        assert_abs_diff_eq!(diff.y, sun.base_color().y, epsilon = 1e-5);
        assert_abs_diff_eq!(diff.z, sun.base_color().z, epsilon = 1e-5);
    }

    #[test]
    fn test_shade_is_pure_in_elapsed_time() {
        let config = SunConfig::default();
        let mut stepped = SunSurface::new(&config);
        for _ in 0..10 {
            stepped.advance(0.1);
        }
        let mut once = SunSurface::new(&config);
        once.advance(1.0);

        assert_abs_diff_eq!(stepped.elapsed(), 0.5, epsilon = 1e-5);
        let uv = Vec2::new(0.6, 0.1);
        let a = stepped.shade(uv, 0.4);
        let b = once.shade(uv, 0.4);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut sun = SunSurface::new(&SunConfig::default());
        sun.advance(2.0);
        sun.advance(-1.0);
        assert_abs_diff_eq!(sun.elapsed(), 1.0, epsilon = 1e-6);
    }
}

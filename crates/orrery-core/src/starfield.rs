//! Background starfield

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::config::StarfieldConfig;

/// Static point cloud that turns slowly about +Y
#[derive(Debug, Clone)]
pub struct Starfield {
    points: Vec<Vec3>,
    /// Unwrapped so it keeps increasing for the life of the page
    rotation: f64,
    step: f64,
}

/// Uniform sample in `(-spread / 2, spread / 2]`
fn spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    range * (0.5 - rng.gen::<f32>())
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(count: usize, range: f32, step: f64, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| Vec3::new(spread(rng, range), spread(rng, range), spread(rng, range)))
            .collect();
        Self {
            points,
            rotation: 0.0,
            step,
        }
    }

    pub fn from_config(config: &StarfieldConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(config.count, config.spread, config.rotation_step, &mut rng)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total rotation applied so far
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation folded into `[0, 2π)` for rendering
    pub fn rotation_angle(&self) -> f32 {
        self.rotation.rem_euclid(TAU) as f32
    }

    /// One tick of ambient rotation
    pub fn advance(&mut self) {
        self.rotation += self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(count: usize) -> Starfield {
        Starfield::from_config(&StarfieldConfig {
            count,
            seed: Some(42),
            ..StarfieldConfig::default()
        })
    }

    #[test]
    fn test_point_count_and_bounds() {
        let stars = seeded(10_000);
        assert_eq!(stars.points().len(), 10_000);
        for p in stars.points() {
            assert!(p.abs().max_element() <= 1000.0);
        }
    }

    #[test]
    fn test_spread_covers_the_cube() {
        let stars = seeded(2_000);
        let min = stars.points().iter().fold(Vec3::splat(f32::MAX), |acc, p| acc.min(*p));
        let max = stars.points().iter().fold(Vec3::splat(f32::MIN), |acc, p| acc.max(*p));
        assert!(min.max_element() < -900.0);
        assert!(max.min_element() > 900.0);
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(seeded(100).points(), seeded(100).points());
    }

    #[test]
    fn test_rotation_strictly_increases() {
        let mut stars = seeded(10);
        let mut last = stars.rotation();
        for _ in 0..1_000 {
            stars.advance();
            assert!(stars.rotation() > last);
            last = stars.rotation();
        }
        assert!((stars.rotation() - 0.1).abs() < 1e-9);
        assert!(stars.rotation_angle() < std::f32::consts::TAU);
    }
}

//! Pointer picking against moving bodies

use glam::{Vec2, Vec3};

use crate::body::OrbitalBodySet;

/// A ray with a unit-length direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `None` when `direction` cannot be normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction.try_normalize().map(|direction| Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Distance along `ray` to the first point on the sphere, if it is hit in front of the origin
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere
        Some(0.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub distance: f32,
}

/// Nearest body the ray passes through
pub fn pick(ray: &Ray, bodies: &OrbitalBodySet) -> Option<Hit> {
    bodies
        .iter()
        .enumerate()
        .filter_map(|(index, body)| {
            intersect_sphere(ray, body.position(), body.radius).map(|distance| Hit { index, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Screen rectangle of the render surface, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Normalized device coordinates: x right, y up, both in `[-1, 1]` inside the surface
    pub fn to_ndc(&self, client: Vec2) -> Vec2 {
        let size = self.size.max(Vec2::ONE);
        let local = (client - self.origin) / size;
        Vec2::new(local.x * 2.0 - 1.0, -(local.y * 2.0) + 1.0)
    }
}

/// Last pointer position seen by the hover controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub client: Vec2,
    pub ndc: Vec2,
}

/// Result of a hover test
#[derive(Debug, Clone, PartialEq)]
pub enum HoverOutcome {
    Over {
        index: usize,
        name: String,
        tooltip_at: Vec2,
    },
    Clear,
}

/// Maps pointer movement onto the highlighted body
#[derive(Debug, Clone)]
pub struct HoverController {
    pointer: PointerState,
    tooltip_offset: Vec2,
}

impl HoverController {
    pub fn new(tooltip_offset: Vec2) -> Self {
        Self {
            pointer: PointerState::default(),
            tooltip_offset,
        }
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn track(&mut self, client: Vec2, viewport: &Viewport) {
        self.pointer = PointerState {
            client,
            ndc: viewport.to_ndc(client),
        };
    }

    /// Record the pointer, pick along `ray` and move the highlight accordingly
    pub fn hover(
        &mut self,
        client: Vec2,
        ray: Option<&Ray>,
        viewport: &Viewport,
        bodies: &mut OrbitalBodySet,
    ) -> HoverOutcome {
        self.track(client, viewport);

        let hit = ray.and_then(|ray| pick(ray, bodies));
        bodies.set_highlight(hit.map(|h| h.index));

        match hit.and_then(|h| bodies.get(h.index).map(|body| (h.index, body))) {
            Some((index, body)) => HoverOutcome::Over {
                index,
                name: body.name.clone(),
                tooltip_at: client + self.tooltip_offset,
            },
            None => HoverOutcome::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::default_bodies;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_abs_diff_eq!(ray.direction.length(), 1.0, epsilon = 1e-6);
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();

        let t = intersect_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert_abs_diff_eq!(t, 9.0, epsilon = 1e-5);

        assert!(intersect_sphere(&ray, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
        // Behind the origin
        assert!(intersect_sphere(&ray, Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
        // Origin inside
        assert_eq!(intersect_sphere(&ray, Vec3::new(0.0, 0.0, 10.5), 1.0), Some(0.0));
    }

    #[test]
    fn test_pick_nearest_first() {
        let bodies = OrbitalBodySet::from_definitions(&default_bodies(), 0.0);
        let home = bodies.get(0).unwrap().position();

        let publications = bodies.get(2).unwrap().position();
        assert!(publications.x < -8.0);

        // Along -X the ray crosses Home (x = 5) and then Publications (x = -9)
        let ray = Ray::new(Vec3::new(20.0, home.y, 0.0), Vec3::NEG_X).unwrap();
        assert!(intersect_sphere(&ray, publications, 0.8).is_some());

        let hit = pick(&ray, &bodies).unwrap();
        assert_eq!(hit.index, 0);
        assert_abs_diff_eq!(hit.distance, 15.0 - 0.6, epsilon = 1e-3);

        // From the other side Publications comes first
        let ray = Ray::new(Vec3::new(-20.0, home.y, 0.0), Vec3::X).unwrap();
        assert_eq!(pick(&ray, &bodies).map(|h| h.index), Some(2));
    }

    #[test]
    fn test_viewport_ndc() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(viewport.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(viewport.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));

        let offset = Viewport {
            origin: Vec2::new(100.0, 50.0),
            size: Vec2::new(200.0, 100.0),
        };
        assert_eq!(offset.to_ndc(Vec2::new(200.0, 100.0)), Vec2::ZERO);
    }

    #[test]
    fn test_hover_highlights_hit_only() {
        let mut bodies = OrbitalBodySet::from_definitions(&default_bodies(), 0.0);
        let mut hover = HoverController::new(Vec2::new(15.0, -30.0));
        let viewport = Viewport::new(1000.0, 1000.0);

        let target = bodies.get(1).unwrap().position();
        let ray = Ray::new(target + Vec3::Y * 50.0, Vec3::NEG_Y).unwrap();
        let client = Vec2::new(500.0, 250.0);

        let outcome = hover.hover(client, Some(&ray), &viewport, &mut bodies);
        assert_eq!(
            outcome,
            HoverOutcome::Over {
                index: 1,
                name: "Projects".to_string(),
                tooltip_at: Vec2::new(515.0, 220.0),
            }
        );
        assert_eq!(bodies.highlighted(), Some(1));
        assert_eq!(hover.pointer().ndc, Vec2::new(0.0, 0.5));

        let away = Ray::new(Vec3::new(0.0, 50.0, 50.0), Vec3::Y).unwrap();
        assert_eq!(hover.hover(client, Some(&away), &viewport, &mut bodies), HoverOutcome::Clear);
        assert_eq!(bodies.highlighted(), None);
    }

    #[test]
    fn test_hover_without_ray_clears() {
        let mut bodies = OrbitalBodySet::from_definitions(&default_bodies(), 0.0);
        bodies.set_highlight(Some(3));
        let mut hover = HoverController::new(Vec2::ZERO);

        let outcome = hover.hover(Vec2::ZERO, None, &Viewport::default(), &mut bodies);
        assert_eq!(outcome, HoverOutcome::Clear);
        assert_eq!(bodies.highlighted(), None);
    }
}

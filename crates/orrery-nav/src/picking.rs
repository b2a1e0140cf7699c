//! Ray hit-testing against body spheres.

use glam::DVec3;
use orrery_orbit::{CelestialBody, SolarSystem};

/// A ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// `None` if `direction` is zero or not finite.
    pub fn new(origin: DVec3, direction: DVec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere, or
    /// `None` on a miss. A ray starting inside the sphere hits its far side.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = -b - root;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far >= 0.0).then_some(far)
    }
}

/// Nearest body hit by `ray`, with the hit distance.
pub fn pick_body<'a>(system: &'a SolarSystem, ray: &Ray) -> Option<(&'a CelestialBody, f64)> {
    system
        .bodies()
        .iter()
        .filter(|b| b.position.is_finite() && b.radius > 0.0)
        .filter_map(|b| ray.intersect_sphere(b.position, b.radius).map(|t| (b, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

//! Validated copy of a target body's data.

use glam::DVec3;
use orrery_orbit::CelestialBody;

/// Target data copied at selection time.
///
/// Arrival distances and standoffs are computed from this snapshot, so a
/// body whose live state goes bad mid-flight cannot corrupt them.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetSnapshot {
    pub name: String,
    /// Position at selection time, km.
    pub position: DVec3,
    /// Radius, km.
    pub radius: f64,
    /// Mass, kg.
    pub mass: f64,
}

impl TargetSnapshot {
    /// `None` when the body's position, radius, or mass is not finite.
    pub fn capture(body: &CelestialBody) -> Option<Self> {
        if !body.position.is_finite() || !body.radius.is_finite() || !body.mass.is_finite() {
            return None;
        }
        Some(Self {
            name: body.name.clone(),
            position: body.position,
            radius: body.radius.max(0.0),
            mass: body.mass,
        })
    }
}

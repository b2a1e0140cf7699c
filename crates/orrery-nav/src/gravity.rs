//! Gameplay gravity perturbation for free flight.
//!
//! Newtonian pull from every body inside an influence band, summed and then
//! scaled down by an empirical factor. This is a feel-tuning nudge, not a
//! dynamics simulation.

use glam::DVec3;
use orrery_orbit::SolarSystem;
use orrery_orbit::constants::GRAVITATIONAL_CONSTANT_KM;

use crate::NavSettings;

/// Scaled gravitational acceleration at `position`, km/s².
///
/// A body contributes only when `2 × radius < distance < gravity_max_range`.
/// Bodies with a non-finite position are skipped.
pub fn gravity_perturbation(
    system: &SolarSystem,
    position: DVec3,
    settings: &NavSettings,
) -> DVec3 {
    let mut total = DVec3::ZERO;
    for body in system.bodies() {
        if !body.position.is_finite() {
            continue;
        }
        let offset = body.position - position;
        let distance = offset.length();
        if distance <= 2.0 * body.radius || distance >= settings.gravity_max_range {
            continue;
        }
        let magnitude = GRAVITATIONAL_CONSTANT_KM * body.mass / (distance * distance);
        total += offset / distance * magnitude;
    }
    total * settings.gravity_scale
}

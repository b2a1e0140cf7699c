//! Interchangeable strategies for advancing every body by one scaled delta.

use glam::DVec3;
use orrery_orbit::constants::GRAVITATIONAL_CONSTANT_KM;
use orrery_orbit::{SolarSystem, propagate, propagator};
use tracing::{debug, warn};

use crate::SimError;

/// Advances all bodies of a system by `dt_seconds` of simulated time.
pub trait PhysicsModel {
    /// Short name for logs and telemetry.
    fn name(&self) -> &'static str;

    /// Advance every body. Bodies that fail are left untouched; the first
    /// failure is returned after the rest have been stepped.
    fn step(&mut self, system: &mut SolarSystem, dt_seconds: f64) -> Result<(), SimError>;
}

/// Closed-form Kepler propagation of each body independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeplerianModel;

impl PhysicsModel for KeplerianModel {
    fn name(&self) -> &'static str {
        "keplerian"
    }

    fn step(&mut self, system: &mut SolarSystem, dt_seconds: f64) -> Result<(), SimError> {
        let mut first_error = None;
        for body in system.bodies_mut() {
            if let Err(err) = propagate(body, dt_seconds) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// Longest single Verlet substep, in simulated seconds.
pub const MAX_SUBSTEP_SECONDS: f64 = 3600.0;
/// Upper bound on substeps per call; beyond it the substep grows instead.
pub const MAX_SUBSTEPS: u32 = 1000;

/// Mutual gravitation of all bodies, integrated with velocity Verlet.
///
/// The central star is pinned at the origin. Positions and velocities are
/// taken from the bodies as-is, so callers seed velocities from the Kepler
/// derivative before switching to this model. Precession is not modelled.
#[derive(Clone, Debug, Default)]
pub struct NBodyModel {
    accelerations: Vec<DVec3>,
}

impl NBodyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substep count and length for a scaled delta.
    pub fn substeps(dt_seconds: f64) -> (u32, f64) {
        let count = (dt_seconds.abs() / MAX_SUBSTEP_SECONDS)
            .ceil()
            .clamp(1.0, MAX_SUBSTEPS as f64) as u32;
        (count, dt_seconds / count as f64)
    }

    fn compute_accelerations(system: &SolarSystem, out: &mut Vec<DVec3>) {
        let bodies = system.bodies();
        out.clear();
        out.resize(bodies.len(), DVec3::ZERO);
        for (i, body) in bodies.iter().enumerate() {
            if body.is_central() {
                continue;
            }
            let mut accel = DVec3::ZERO;
            for (j, other) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let offset = other.position - body.position;
                let dist_sq = offset.length_squared();
                if dist_sq <= f64::EPSILON {
                    continue;
                }
                accel += offset
                    * (GRAVITATIONAL_CONSTANT_KM * other.mass / (dist_sq * dist_sq.sqrt()));
            }
            out[i] = accel;
        }
    }

    fn verlet_substep(&mut self, system: &mut SolarSystem, dt: f64) {
        let half_dt_sq = 0.5 * dt * dt;

        // x(t+dt) = x(t) + v(t)·dt + ½·a(t)·dt²
        Self::compute_accelerations(system, &mut self.accelerations);
        let previous = std::mem::take(&mut self.accelerations);
        for (body, accel) in system.bodies_mut().iter_mut().zip(&previous) {
            if body.is_central() {
                continue;
            }
            body.position += body.velocity * dt + *accel * half_dt_sq;
        }

        // v(t+dt) = v(t) + ½·(a(t) + a(t+dt))·dt
        Self::compute_accelerations(system, &mut self.accelerations);
        for ((body, a0), a1) in system
            .bodies_mut()
            .iter_mut()
            .zip(&previous)
            .zip(&self.accelerations)
        {
            if body.is_central() {
                continue;
            }
            body.velocity += (*a0 + *a1) * (0.5 * dt);
        }
    }
}

impl PhysicsModel for NBodyModel {
    fn name(&self) -> &'static str {
        "n-body"
    }

    fn step(&mut self, system: &mut SolarSystem, dt_seconds: f64) -> Result<(), SimError> {
        if !dt_seconds.is_finite() {
            return Err(SimError::NonFinite {
                what: "time step",
                value: dt_seconds,
            });
        }
        if dt_seconds == 0.0 {
            return Ok(());
        }

        let snapshot: Vec<(DVec3, DVec3)> = system
            .bodies()
            .iter()
            .map(|b| (b.position, b.velocity))
            .collect();

        let (count, sub_dt) = Self::substeps(dt_seconds);
        if count == MAX_SUBSTEPS {
            debug!(dt_seconds, sub_dt, "N-body substep cap reached");
        }
        for _ in 0..count {
            self.verlet_substep(system, sub_dt);
        }

        if let Some(bad) = system
            .bodies()
            .iter()
            .find(|b| !b.position.is_finite() || !b.velocity.is_finite())
        {
            let name = bad.name.clone();
            warn!(body = %name, "N-body step diverged, rolling back");
            for (body, (position, velocity)) in system.bodies_mut().iter_mut().zip(snapshot) {
                body.position = position;
                body.velocity = velocity;
            }
            return Err(SimError::Diverged(name));
        }

        for body in system.bodies_mut() {
            propagator::advance_rotation(body, dt_seconds);
            body.last_update += dt_seconds;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_orbit::constants::SECONDS_PER_DAY;

    #[test]
    fn test_keplerian_step_moves_planets_not_sun() {
        let mut system = SolarSystem::solar().unwrap();
        let earth_before = system.get("Earth").unwrap().position;
        KeplerianModel.step(&mut system, SECONDS_PER_DAY).unwrap();
        assert_ne!(system.get("Earth").unwrap().position, earth_before);
        assert_eq!(system.get("Sun").unwrap().position, DVec3::ZERO);
    }

    #[test]
    fn test_keplerian_step_reports_bad_body_and_continues() {
        let mut system = SolarSystem::solar().unwrap();
        system.get_mut("Mars").unwrap().elements.eccentricity = 2.0;
        let mars_before = system.get("Mars").unwrap().position;
        let earth_before = system.get("Earth").unwrap().position;

        let result = KeplerianModel.step(&mut system, SECONDS_PER_DAY);

        assert!(matches!(result, Err(SimError::Orbit(_))));
        assert_eq!(system.get("Mars").unwrap().position, mars_before);
        assert_ne!(system.get("Earth").unwrap().position, earth_before);
    }

    #[test]
    fn test_substep_bounds() {
        assert_eq!(NBodyModel::substeps(10.0), (1, 10.0));
        let (count, dt) = NBodyModel::substeps(-7200.0);
        assert_eq!(count, 2);
        assert_eq!(dt, -3600.0);
        let (count, dt) = NBodyModel::substeps(1.0e9);
        assert_eq!(count, MAX_SUBSTEPS);
        assert!(dt > MAX_SUBSTEP_SECONDS);
    }

    #[test]
    fn test_n_body_tracks_kepler_over_a_month() {
        let mut kepler = SolarSystem::solar().unwrap();
        let mut nbody = kepler.clone();
        let mut model = NBodyModel::new();

        for _ in 0..30 {
            KeplerianModel.step(&mut kepler, SECONDS_PER_DAY).unwrap();
            model.step(&mut nbody, SECONDS_PER_DAY).unwrap();
        }

        let k = kepler.get("Earth").unwrap().position;
        let n = nbody.get("Earth").unwrap().position;
        // Within 0.1 % of the orbital radius.
        assert!((k - n).length() < 1.5e5, "drift {} km", (k - n).length());
        assert_eq!(nbody.get("Sun").unwrap().position, DVec3::ZERO);
    }

    #[test]
    fn test_n_body_spins_bodies() {
        let mut system = SolarSystem::solar().unwrap();
        let before = system.get("Earth").unwrap().rotation_angle;
        NBodyModel::new().step(&mut system, 3600.0).unwrap();
        assert_ne!(system.get("Earth").unwrap().rotation_angle, before);
    }

    #[test]
    fn test_n_body_rolls_back_on_divergence() {
        let mut system = SolarSystem::solar().unwrap();
        system.get_mut("Earth").unwrap().velocity = DVec3::new(f64::INFINITY, 0.0, 0.0);
        let mars_before = system.get("Mars").unwrap().position;

        let result = NBodyModel::new().step(&mut system, 60.0);

        assert!(matches!(result, Err(SimError::Diverged(_))));
        assert_eq!(system.get("Mars").unwrap().position, mars_before);
    }

    #[test]
    fn test_n_body_rejects_non_finite_step() {
        let mut system = SolarSystem::solar().unwrap();
        assert!(NBodyModel::new().step(&mut system, f64::NAN).is_err());
    }
}

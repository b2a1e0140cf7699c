//! Ordered registry of the bodies in one simulated system.

use glam::DVec3;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{BodyConfig, CelestialBody, OrbitError, SOLAR_SYSTEM};

/// Bodies in table order plus a case-insensitive name index.
#[derive(Clone, Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    index: FxHashMap<String, usize>,
}

impl SolarSystem {
    /// The built-in Sun, planets, and Pluto at J2000.0.
    pub fn solar() -> Result<Self, OrbitError> {
        Self::from_configs(&SOLAR_SYSTEM)
    }

    /// Build a system from a body table, rejecting invalid elements and
    /// duplicate names.
    pub fn from_configs(configs: &[BodyConfig]) -> Result<Self, OrbitError> {
        let bodies = configs
            .iter()
            .map(CelestialBody::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_bodies(bodies)
    }

    /// Build a system from already-constructed bodies.
    pub fn from_bodies(bodies: Vec<CelestialBody>) -> Result<Self, OrbitError> {
        let mut index = FxHashMap::default();
        for (i, body) in bodies.iter().enumerate() {
            if index.insert(body.name.to_ascii_lowercase(), i).is_some() {
                return Err(OrbitError::DuplicateName(body.name.clone()));
            }
        }
        debug!(count = bodies.len(), "Built solar system");
        Ok(Self { bodies, index })
    }

    /// Look up a body by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    /// Mutable lookup by name, ignoring ASCII case.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CelestialBody> {
        self.index_of(name).map(|i| &mut self.bodies[i])
    }

    /// Position in table order of the named body.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(&name.to_ascii_lowercase()).copied()
    }

    /// All bodies in table order.
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Mutable access to all bodies in table order.
    pub fn bodies_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    /// The central star, if the table has one.
    pub fn central(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.is_central())
    }

    /// Returns the number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` if the system has no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.name.as_str())
    }

    /// Nearest body to `point` by centre distance, with that distance.
    /// Bodies with a non-finite position are skipped.
    pub fn nearest_to(&self, point: DVec3) -> Option<(&CelestialBody, f64)> {
        self.bodies
            .iter()
            .filter(|b| b.position.is_finite())
            .map(|b| (b, b.position.distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

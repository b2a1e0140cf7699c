//! Celestial bodies, the built-in solar system table, and Keplerian orbit propagation.
//!
//! Bodies are plain data records built from a static [`BodyConfig`] table. The
//! [`propagator`] module advances their running mean anomaly, solves Kepler's
//! equation, and rotates the in-plane ellipse into the engine's Y-up frame.

mod body;
mod catalog;
pub mod constants;
mod error;
pub mod kepler;
pub mod propagator;
mod system;

pub use body::{BodyConfig, CelestialBody, OrbitalElements};
pub use catalog::SOLAR_SYSTEM;
pub use error::OrbitError;
pub use kepler::{KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, KeplerSolution, solve_kepler};
pub use propagator::{
    body_orientation, mean_anomaly_at, orbit_path, position_at_mean_anomaly, precession_at,
    propagate, set_epoch_offset,
};
pub use system::SolarSystem;

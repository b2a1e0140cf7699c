//! Session error types.

use orrery_config::ConfigError;
use orrery_orbit::OrbitError;
use orrery_sim::SimError;

/// Errors raised while building or reconfiguring a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

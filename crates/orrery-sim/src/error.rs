//! Simulation error types.

use orrery_orbit::OrbitError;

/// Errors raised by the simulation clock and physics models.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A date string matched none of the accepted formats.
    #[error("cannot parse date '{0}': expected RFC 3339, 'YYYY-MM-DD HH:MM:SS', or 'YYYY-MM-DD'")]
    DateParse(String),

    /// A time value is NaN or infinite.
    #[error("non-finite {what}: {value}")]
    NonFinite {
        /// What the value was meant to be.
        what: &'static str,
        /// Value received.
        value: f64,
    },

    /// The integrator produced a non-finite state; the step was rolled back.
    #[error("N-body integration diverged at body '{0}'")]
    Diverged(String),

    /// A body could not be propagated.
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

//! Orbit error types.

/// Errors raised when a body's elements cannot be propagated.
///
/// These indicate a malformed element table or a corrupted running state;
/// they are returned before any body state is modified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// Eccentricity outside `[0, 1)` (parabolic and hyperbolic orbits are unsupported).
    #[error("body '{body}': eccentricity {value} outside [0, 1)")]
    InvalidEccentricity {
        /// Offending body.
        body: String,
        /// Eccentricity found.
        value: f64,
    },

    /// Semi-major axis not strictly positive.
    #[error("body '{body}': semi-major axis {value} km must be > 0")]
    InvalidSemiMajorAxis {
        /// Offending body.
        body: String,
        /// Semi-major axis found.
        value: f64,
    },

    /// Orbital period not strictly positive.
    #[error("body '{body}': orbital period {value} days must be > 0")]
    InvalidPeriod {
        /// Offending body.
        body: String,
        /// Period found.
        value: f64,
    },

    /// An element or running state value is NaN or infinite.
    #[error("body '{body}': non-finite {field}")]
    NonFinite {
        /// Offending body.
        body: String,
        /// Name of the non-finite field.
        field: &'static str,
    },

    /// Two bodies in one system share a name.
    #[error("duplicate body name '{0}'")]
    DuplicateName(String),
}

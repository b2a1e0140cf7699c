//! Navigation tuning.

/// Speeds, damping, and the fixed constants of each motion rule.
///
/// Distances are kilometres, speeds km/s, angles radians.
#[derive(Clone, Debug, PartialEq)]
pub struct NavSettings {
    /// Free-flight cruise speed at full thrust, and the autopilot's floor.
    pub movement_speed: f64,
    /// Hard cap on free-flight and autopilot speed.
    pub max_speed: f64,
    /// Per-tick velocity multiplier when coasting or braking.
    pub damping_factor: f64,
    /// Speed multiplier while boosting.
    pub boost_multiplier: f64,
    /// Keep drifting after thrust stops. When off the camera halts at once.
    pub inertia: bool,
    /// Yaw, pitch, and roll rate at full stick, rad/s.
    pub look_rate: f64,
    /// Weight of the previous speed in the per-tick low-pass filter.
    pub speed_smoothing: f64,
    /// Coasting velocity below this snaps to zero, km/s.
    pub stop_epsilon: f64,
    /// Empirical scale applied to the summed gravity perturbation.
    pub gravity_scale: f64,
    /// Bodies further than this exert no pull, km.
    pub gravity_max_range: f64,
    /// Autopilot base speed per km of remaining distance, 1/s.
    pub approach_rate: f64,
    /// Autopilot arrival distance as a multiple of target radius.
    pub arrival_radius_multiplier: f64,
    /// Auto-targeting kicks in within this multiple of a body's radius.
    pub proximity_radius_multiplier: f64,
    /// Orbit-mode angular speed about world +Y, rad/s.
    pub orbit_angular_speed: f64,
    /// Follow-mode blend toward the desired offset per tick.
    pub follow_blend: f64,
    /// Follow-mode ambient drift, radians per real millisecond.
    pub follow_drift_rate: f64,
    /// Warp transit duration, ms.
    pub warp_duration_ms: f64,
    /// Minimum warp standoff distance from the target centre, km.
    pub warp_min_standoff: f64,
    /// Warp standoff as a multiple of target radius.
    pub warp_radius_multiplier: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            movement_speed: 10_000.0,
            max_speed: 5_000_000.0,
            damping_factor: 0.95,
            boost_multiplier: 5.0,
            inertia: true,
            look_rate: 1.0,
            speed_smoothing: 0.95,
            stop_epsilon: 1e-3,
            gravity_scale: 0.01,
            gravity_max_range: 1.0e8,
            approach_rate: 1.0,
            arrival_radius_multiplier: 5.0,
            proximity_radius_multiplier: 10.0,
            orbit_angular_speed: 0.2,
            follow_blend: 0.1,
            follow_drift_rate: 0.0001,
            warp_duration_ms: 3000.0,
            warp_min_standoff: 10_000.0,
            warp_radius_multiplier: 5.0,
        }
    }
}

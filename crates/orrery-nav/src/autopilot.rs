//! Distance-adaptive approach to a target body.

use glam::DVec3;

use crate::{CameraMode, NavSettings};

/// Fraction of base speed held through the middle of the approach.
pub const CRUISE_FRACTION: f64 = 0.6;
/// Lowest fraction of base speed the profile returns, so approaches end.
pub const MIN_PROFILE: f64 = 0.1;
const EASE_IN_END: f64 = 0.3;
const EASE_OUT_START: f64 = 0.7;

/// Speed fraction for a given approach progress.
///
/// Quadratic ease-in up to 30 %, cruise at [`CRUISE_FRACTION`] to 70 %,
/// quadratic ease-out after. The curve is continuous and floored at
/// [`MIN_PROFILE`].
pub fn speed_profile(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let fraction = if p < EASE_IN_END {
        CRUISE_FRACTION * (p / EASE_IN_END).powi(2)
    } else if p <= EASE_OUT_START {
        CRUISE_FRACTION
    } else {
        CRUISE_FRACTION * ((1.0 - p) / (1.0 - EASE_OUT_START)).powi(2)
    };
    fraction.max(MIN_PROFILE)
}

/// Autopilot bookkeeping. Inactive by default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Autopilot {
    pub active: bool,
    pub completed: bool,
    /// Distance from the target centre that counts as arrived, km.
    pub arrival_distance: f64,
    /// Distance from the target when the approach started, km.
    pub initial_distance: f64,
    /// Monotone approach progress in `[0, 1]`.
    pub progress: f64,
    /// Mode restored if the approach is cancelled.
    pub resume_mode: CameraMode,
}

/// Result of one autopilot tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutopilotStep {
    pub position: DVec3,
    pub velocity: DVec3,
    pub arrived: bool,
}

impl Autopilot {
    /// Arm the autopilot for a target of `target_radius` at `distance`.
    pub fn engage(
        distance: f64,
        target_radius: f64,
        resume_mode: CameraMode,
        settings: &NavSettings,
    ) -> Self {
        Self {
            active: true,
            completed: false,
            arrival_distance: target_radius * settings.arrival_radius_multiplier,
            initial_distance: distance,
            progress: 0.0,
            resume_mode,
        }
    }

    /// Advance one tick toward the live `target` position.
    ///
    /// The step never crosses the arrival sphere: the last step lands on it.
    pub fn step(
        &mut self,
        position: DVec3,
        target: DVec3,
        dt: f64,
        settings: &NavSettings,
    ) -> AutopilotStep {
        let to_target = target - position;
        let distance = to_target.length();

        if distance <= self.arrival_distance {
            return self.arrive(position);
        }

        if self.initial_distance > 0.0 {
            let raw = (1.0 - distance / self.initial_distance).clamp(0.0, 1.0);
            self.progress = self.progress.max(raw);
        }

        let base = (distance * settings.approach_rate)
            .clamp(settings.movement_speed, settings.max_speed.max(settings.movement_speed));
        let speed = speed_profile(self.progress) * base;

        let direction = to_target / distance;
        let remaining = distance - self.arrival_distance;
        let travel = speed * dt;
        if travel >= remaining {
            let landed = position + direction * remaining;
            return self.arrive(landed);
        }

        AutopilotStep {
            position: position + direction * travel,
            velocity: direction * speed,
            arrived: false,
        }
    }

    fn arrive(&mut self, position: DVec3) -> AutopilotStep {
        self.active = false;
        self.completed = true;
        self.progress = 1.0;
        AutopilotStep {
            position,
            velocity: DVec3::ZERO,
            arrived: true,
        }
    }

    /// Drop back to idle, keeping nothing but the default resume mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

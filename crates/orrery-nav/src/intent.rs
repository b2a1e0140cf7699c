//! Pilot intent for free flight, produced by whatever collects input.

use glam::DVec3;

/// One tick of pilot input. Axes are in `[-1, 1]`.
///
/// Positive `forward` thrusts along the camera's −Z, positive `strafe` along
/// +X, positive `vertical` along +Y. `yaw`, `pitch`, and `roll` are turn
/// rates as a fraction of the configured look rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightIntent {
    pub forward: f64,
    pub strafe: f64,
    pub vertical: f64,
    pub roll: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub boost: bool,
    pub brake: bool,
}

impl FlightIntent {
    /// No input at all.
    pub const IDLE: FlightIntent = FlightIntent {
        forward: 0.0,
        strafe: 0.0,
        vertical: 0.0,
        roll: 0.0,
        yaw: 0.0,
        pitch: 0.0,
        boost: false,
        brake: false,
    };

    /// Forward thrust only.
    pub fn forward(amount: f64) -> Self {
        Self {
            forward: amount,
            ..Self::IDLE
        }
    }

    /// Clamp every axis to `[-1, 1]`; non-finite axes become zero.
    pub fn sanitized(&self) -> Self {
        fn axis(v: f64) -> f64 {
            if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
        }
        Self {
            forward: axis(self.forward),
            strafe: axis(self.strafe),
            vertical: axis(self.vertical),
            roll: axis(self.roll),
            yaw: axis(self.yaw),
            pitch: axis(self.pitch),
            boost: self.boost,
            brake: self.brake,
        }
    }

    /// Thrust vector in camera space (−Z forward).
    pub fn thrust_local(&self) -> DVec3 {
        DVec3::new(self.strafe, self.vertical, -self.forward)
    }

    pub fn has_thrust(&self) -> bool {
        self.thrust_local().length_squared() > 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_and_zeroes_nan() {
        let intent = FlightIntent {
            forward: 3.0,
            strafe: f64::NAN,
            yaw: -2.0,
            ..FlightIntent::IDLE
        }
        .sanitized();
        assert_eq!(intent.forward, 1.0);
        assert_eq!(intent.strafe, 0.0);
        assert_eq!(intent.yaw, -1.0);
    }

    #[test]
    fn test_forward_thrust_points_down_negative_z() {
        assert_eq!(
            FlightIntent::forward(1.0).thrust_local(),
            DVec3::new(0.0, 0.0, -1.0)
        );
        assert!(!FlightIntent::IDLE.has_thrust());
    }
}

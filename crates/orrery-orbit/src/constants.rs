//! Physical and calendar constants shared by the propagator and the simulation clock.
//!
//! Distances are kilometres, masses kilograms, times seconds unless noted.

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Seconds in one Julian century (36,525 days).
pub const SECONDS_PER_CENTURY: f64 = 36_525.0 * SECONDS_PER_DAY;

/// One arcsecond in radians.
pub const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3_600.0);

/// Newtonian gravitational constant in km³/(kg·s²).
pub const GRAVITATIONAL_CONSTANT_KM: f64 = 6.674_30e-20;

/// 1 Astronomical Unit in kilometres (IAU 2012).
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`, which is
/// folded back to zero.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_century_length() {
        assert!((SECONDS_PER_CENTURY - 3_155_760_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_arcsec_conversion() {
        let one_degree = 3_600.0 * ARCSEC_TO_RAD;
        assert!((one_degree - PI / 180.0).abs() < 1e-15);
    }

    #[test]
    fn test_wrap_angle_range() {
        for angle in [-10.0 * TAU, -PI, -1e-18, 0.0, PI, TAU, 7.5 * TAU] {
            let w = wrap_angle(angle);
            assert!((0.0..TAU).contains(&w), "{angle} wrapped to {w}");
        }
    }

    #[test]
    fn test_wrap_angle_preserves_in_range_values() {
        assert_eq!(wrap_angle(1.25), 1.25);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    }
}

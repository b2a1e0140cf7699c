//! Newton–Raphson solver for Kepler's equation `E − e·sin E = M`.

use tracing::debug;

/// Convergence threshold on the Newton step |ΔE|, in radians.
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Hard cap on Newton iterations. Guarantees termination as e → 1.
pub const KEPLER_MAX_ITERATIONS: u32 = 100;

/// Result of [`solve_kepler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians.
    pub eccentric_anomaly: f64,
    /// Newton iterations performed.
    pub iterations: u32,
    /// False when the iteration cap was hit; the estimate is still returned.
    pub converged: bool,
}

/// Solve Kepler's equation for the eccentric anomaly, starting from `E₀ = M`.
///
/// Iterates `E ← E − (E − e·sin E − M) / (1 − e·cos E)` until the step falls
/// below [`KEPLER_TOLERANCE`] or [`KEPLER_MAX_ITERATIONS`] is reached.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    let mut e_anom = mean_anomaly;
    for iteration in 1..=KEPLER_MAX_ITERATIONS {
        let (sin_e, cos_e) = e_anom.sin_cos();
        let delta =
            (e_anom - eccentricity * sin_e - mean_anomaly) / (1.0 - eccentricity * cos_e);
        e_anom -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: e_anom,
                iterations: iteration,
                converged: true,
            };
        }
    }

    debug!(
        mean_anomaly,
        eccentricity, "Kepler solver hit the iteration cap, accepting best estimate"
    );
    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations: KEPLER_MAX_ITERATIONS,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    fn residual(solution: &KeplerSolution, m: f64, e: f64) -> f64 {
        let ea = solution.eccentric_anomaly;
        (ea - e * ea.sin() - m).abs()
    }

    #[test]
    fn test_residual_below_tolerance_across_domain() {
        for ei in 0..95 {
            let e = ei as f64 / 100.0;
            for mi in 0..64 {
                let m = TAU * mi as f64 / 64.0;
                let solution = solve_kepler(m, e);
                assert!(solution.converged, "e={e} M={m}");
                assert!(
                    residual(&solution, m, e) < 1e-6,
                    "e={e} M={m} residual={}",
                    residual(&solution, m, e)
                );
            }
        }
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        for m in [0.0, 0.5, PI, 5.0] {
            let solution = solve_kepler(m, 0.0);
            assert!((solution.eccentric_anomaly - m).abs() < 1e-12);
            assert_eq!(solution.iterations, 1);
        }
    }

    #[test]
    fn test_apsides_are_fixed_points() {
        let at_perihelion = solve_kepler(0.0, 0.6);
        assert!(at_perihelion.eccentric_anomaly.abs() < 1e-12);
        let at_aphelion = solve_kepler(PI, 0.6);
        assert!((at_aphelion.eccentric_anomaly - PI).abs() < 1e-12);
    }

    #[test]
    fn test_iteration_cap_bounds_extreme_eccentricity() {
        let solution = solve_kepler(1e-3, 0.999_999);
        assert!(solution.iterations <= KEPLER_MAX_ITERATIONS);
        assert!(solution.eccentric_anomaly.is_finite());
    }

    #[test]
    fn test_eccentric_anomaly_leads_mean_anomaly_on_outbound_leg() {
        let solution = solve_kepler(1.0, 0.3);
        assert!(solution.eccentric_anomaly > 1.0);
        assert!(solution.eccentric_anomaly < PI);
    }
}

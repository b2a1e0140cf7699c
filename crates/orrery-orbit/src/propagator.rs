//! Keplerian propagation: advances a body's running anomaly and recomputes
//! its heliocentric position and velocity.
//!
//! The in-plane ellipse is rotated by argument of perihelion, inclination, and
//! longitude of the ascending node (`R_z(Ω)·R_x(i)·R_z(ω)`), then mapped from
//! the ecliptic frame (Z toward ecliptic north) into the engine frame (+Y up)
//! as `(x, y, z)_ecl → (x, z, −y)`.

use glam::{DMat3, DQuat, DVec3};

use crate::constants::{ARCSEC_TO_RAD, SECONDS_PER_CENTURY, SECONDS_PER_HOUR, wrap_angle};
use crate::kepler::solve_kepler;
use crate::{CelestialBody, OrbitError};

/// Advance `body` by `elapsed_seconds` of simulated time and return its new
/// position in kilometres.
///
/// Negative elapsed time runs the orbit backwards. The central star stays at
/// the origin and only spins. Invalid elements or a non-finite
/// `elapsed_seconds` return an error before any state is modified.
pub fn propagate(body: &mut CelestialBody, elapsed_seconds: f64) -> Result<DVec3, OrbitError> {
    if !elapsed_seconds.is_finite() {
        return Err(OrbitError::NonFinite {
            body: body.name.clone(),
            field: "elapsed time",
        });
    }
    body.validate()?;

    advance_rotation(body, elapsed_seconds);
    body.last_update += elapsed_seconds;

    if body.is_central() {
        body.position = DVec3::ZERO;
        body.velocity = DVec3::ZERO;
        return Ok(body.position);
    }

    let n = body.elements.mean_motion();
    body.mean_anomaly = wrap_angle(body.mean_anomaly + n * elapsed_seconds);

    if body.relativistic {
        body.cumulative_precession += precession_increment(body.precession_rate, elapsed_seconds);
    }

    let (position, velocity) = state_at_mean_anomaly(body, body.mean_anomaly);
    body.position = position;
    body.velocity = velocity;
    Ok(position)
}

/// Absolute reset: place `body` at `seconds_since_epoch` after J2000.0.
///
/// Mean anomaly, cumulative precession, and spin angle are computed directly
/// from the offset instead of stepping, so repeated resets never drift.
pub fn set_epoch_offset(
    body: &mut CelestialBody,
    seconds_since_epoch: f64,
) -> Result<DVec3, OrbitError> {
    if !seconds_since_epoch.is_finite() {
        return Err(OrbitError::NonFinite {
            body: body.name.clone(),
            field: "epoch offset",
        });
    }
    body.validate()?;

    body.mean_anomaly = if body.is_central() {
        0.0
    } else {
        mean_anomaly_at(body, seconds_since_epoch)
    };
    body.cumulative_precession = if body.relativistic {
        precession_at(body, seconds_since_epoch)
    } else {
        0.0
    };
    body.rotation_angle = wrap_angle(spin_rate(body) * seconds_since_epoch);
    body.last_update = seconds_since_epoch;

    if body.is_central() {
        body.position = DVec3::ZERO;
        body.velocity = DVec3::ZERO;
    } else {
        let (position, velocity) = state_at_mean_anomaly(body, body.mean_anomaly);
        body.position = position;
        body.velocity = velocity;
    }
    Ok(body.position)
}

/// Mean anomaly at `seconds_since_epoch`, wrapped to `[0, 2π)`.
pub fn mean_anomaly_at(body: &CelestialBody, seconds_since_epoch: f64) -> f64 {
    if body.is_central() {
        return 0.0;
    }
    wrap_angle(
        body.elements.mean_anomaly_at_epoch + body.elements.mean_motion() * seconds_since_epoch,
    )
}

/// Accumulated perihelion advance in radians at `seconds_since_epoch`.
pub fn precession_at(body: &CelestialBody, seconds_since_epoch: f64) -> f64 {
    precession_increment(body.precession_rate, seconds_since_epoch)
}

/// Position for an arbitrary mean anomaly, using the body's current
/// precession. Does not touch running state.
pub fn position_at_mean_anomaly(body: &CelestialBody, mean_anomaly: f64) -> DVec3 {
    if body.is_central() {
        return DVec3::ZERO;
    }
    state_at_mean_anomaly(body, mean_anomaly).0
}

/// Closed polyline of the body's current orbit: `samples` points evenly
/// spaced in mean anomaly, plus the first point repeated at the end.
///
/// Returns an empty path for the central star.
pub fn orbit_path(body: &CelestialBody, samples: usize) -> Vec<DVec3> {
    if body.is_central() {
        return Vec::new();
    }
    let samples = samples.max(3);
    let mut path: Vec<DVec3> = (0..samples)
        .map(|i| {
            let m = std::f64::consts::TAU * i as f64 / samples as f64;
            position_at_mean_anomaly(body, m)
        })
        .collect();
    path.push(path[0]);
    path
}

/// Orientation of the body: axial tilt about +Z, then spin about the tilted
/// +Y axis.
pub fn body_orientation(body: &CelestialBody) -> DQuat {
    DQuat::from_rotation_z(-body.axial_tilt) * DQuat::from_rotation_y(body.rotation_angle)
}

/// Advance only the axial spin of `body`.
pub fn advance_rotation(body: &mut CelestialBody, elapsed_seconds: f64) {
    body.rotation_angle = wrap_angle(body.rotation_angle + spin_rate(body) * elapsed_seconds);
}

/// Spin rate in rad/s, negative for retrograde rotation.
fn spin_rate(body: &CelestialBody) -> f64 {
    if body.rotation_period <= 0.0 {
        return 0.0;
    }
    let rate = std::f64::consts::TAU / (body.rotation_period * SECONDS_PER_HOUR);
    if body.retrograde { -rate } else { rate }
}

fn precession_increment(rate_arcsec_per_century: f64, elapsed_seconds: f64) -> f64 {
    rate_arcsec_per_century * ARCSEC_TO_RAD * (elapsed_seconds / SECONDS_PER_CENTURY)
}

/// Ecliptic → orbital-plane rotation for the given angles.
fn orbital_frame(node: f64, inclination: f64, perihelion: f64) -> DMat3 {
    DMat3::from_rotation_z(node)
        * DMat3::from_rotation_x(inclination)
        * DMat3::from_rotation_z(perihelion)
}

fn ecliptic_to_engine(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, -v.y)
}

/// Position (km) and velocity (km/s) at `mean_anomaly`.
fn state_at_mean_anomaly(body: &CelestialBody, mean_anomaly: f64) -> (DVec3, DVec3) {
    let el = &body.elements;
    let e = el.eccentricity;
    let a = el.semi_major_axis;
    let n = el.mean_motion();

    let ea = solve_kepler(mean_anomaly, e).eccentric_anomaly;
    let (sin_e, cos_e) = ea.sin_cos();
    let minor = (1.0 - e * e).sqrt();

    let in_plane = DVec3::new(a * (cos_e - e), a * minor * sin_e, 0.0);
    let e_dot = n / (1.0 - e * cos_e);
    let in_plane_velocity = DVec3::new(-a * sin_e * e_dot, a * minor * cos_e * e_dot, 0.0);

    let perihelion = if body.relativistic {
        el.argument_of_perihelion + body.cumulative_precession
    } else {
        el.argument_of_perihelion
    };
    let frame = orbital_frame(el.longitude_of_ascending_node, el.inclination, perihelion);

    (
        ecliptic_to_engine(frame * in_plane),
        ecliptic_to_engine(frame * in_plane_velocity),
    )
}

//! Celestial body records and the static configuration they are built from.

use glam::DVec3;

use crate::OrbitError;
use crate::propagator;

/// One row of a static body table.
///
/// Angles are in degrees so the table reads like published J2000 element
/// sets; [`CelestialBody::from_config`] converts them to radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig {
    /// Unique body name.
    pub name: &'static str,
    /// Mass in kilograms.
    pub mass: f64,
    /// Mean radius in kilometres.
    pub radius: f64,
    /// Axial tilt (obliquity) in degrees.
    pub axial_tilt_deg: f64,
    /// Sidereal rotation period in hours. Zero disables axial spin.
    pub rotation_period_hours: f64,
    /// Spins clockwise when viewed from above the ecliptic.
    pub retrograde: bool,
    /// Carries ring geometry in the renderer.
    pub has_rings: bool,
    /// Semi-major axis in kilometres. Zero for the central star.
    pub semi_major_axis: f64,
    /// Eccentricity in `[0, 1)`.
    pub eccentricity: f64,
    /// Sidereal orbital period in days. Zero for the central star.
    pub orbital_period_days: f64,
    /// Inclination to the ecliptic in degrees.
    pub inclination_deg: f64,
    /// Longitude of the ascending node in degrees.
    pub longitude_of_ascending_node_deg: f64,
    /// Argument of perihelion in degrees.
    pub argument_of_perihelion_deg: f64,
    /// Mean anomaly at J2000.0 in degrees.
    pub mean_anomaly_deg: f64,
    /// Relativistic perihelion advance in arcseconds per century.
    pub precession_rate: f64,
}

/// Keplerian elements in radians, kilometres, and days.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in kilometres.
    pub semi_major_axis: f64,
    /// Eccentricity [0, 1). 0 = circular orbit.
    pub eccentricity: f64,
    /// Orbital period in days.
    pub orbital_period: f64,
    /// Inclination in radians relative to the ecliptic plane.
    pub inclination: f64,
    /// Longitude of ascending node in radians.
    pub longitude_of_ascending_node: f64,
    /// Argument of perihelion in radians.
    pub argument_of_perihelion: f64,
    /// Mean anomaly at the J2000.0 epoch in radians.
    pub mean_anomaly_at_epoch: f64,
}

impl OrbitalElements {
    /// True when every element is zero, which marks the central star.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Orbital period in seconds.
    pub fn period_seconds(&self) -> f64 {
        self.orbital_period * crate::constants::SECONDS_PER_DAY
    }

    /// Mean motion in radians per second.
    pub fn mean_motion(&self) -> f64 {
        std::f64::consts::TAU / self.period_seconds()
    }
}

/// A star, planet, or dwarf planet with its orbital and physical state.
///
/// The orbital elements are fixed after construction; `mean_anomaly`,
/// `cumulative_precession`, `rotation_angle`, `position`, and `velocity` are
/// the running state rewritten by the propagator every tick.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    /// Unique body name.
    pub name: String,
    /// Mass in kilograms.
    pub mass: f64,
    /// Mean radius in kilometres.
    pub radius: f64,
    /// Axial tilt in radians.
    pub axial_tilt: f64,
    /// Sidereal rotation period in hours. Zero disables spin.
    pub rotation_period: f64,
    /// Spins clockwise when viewed from above the ecliptic.
    pub retrograde: bool,
    /// Carries ring geometry in the renderer.
    pub has_rings: bool,
    /// Fixed Keplerian elements.
    pub elements: OrbitalElements,
    /// Current mean anomaly in radians, `[0, 2π)`.
    pub mean_anomaly: f64,
    /// Perihelion advance rate in arcseconds per century.
    pub precession_rate: f64,
    /// Whether the precession correction is applied.
    pub relativistic: bool,
    /// Accumulated perihelion advance in radians.
    pub cumulative_precession: f64,
    /// Current axial spin angle in radians, `[0, 2π)`.
    pub rotation_angle: f64,
    /// Heliocentric position in kilometres (engine frame, +Y up).
    pub position: DVec3,
    /// Heliocentric velocity in km/s.
    pub velocity: DVec3,
    /// Simulated seconds since J2000.0 at the last propagation.
    pub last_update: f64,
    reference_position: DVec3,
}

impl CelestialBody {
    /// Build a body from a table row, validating its elements and placing it
    /// at its J2000.0 position.
    pub fn from_config(config: &BodyConfig) -> Result<Self, OrbitError> {
        let elements = OrbitalElements {
            semi_major_axis: config.semi_major_axis,
            eccentricity: config.eccentricity,
            orbital_period: config.orbital_period_days,
            inclination: config.inclination_deg.to_radians(),
            longitude_of_ascending_node: config.longitude_of_ascending_node_deg.to_radians(),
            argument_of_perihelion: config.argument_of_perihelion_deg.to_radians(),
            mean_anomaly_at_epoch: crate::constants::wrap_angle(
                config.mean_anomaly_deg.to_radians(),
            ),
        };

        let mut body = Self {
            name: config.name.to_string(),
            mass: config.mass,
            radius: config.radius,
            axial_tilt: config.axial_tilt_deg.to_radians(),
            rotation_period: config.rotation_period_hours,
            retrograde: config.retrograde,
            has_rings: config.has_rings,
            elements,
            mean_anomaly: elements.mean_anomaly_at_epoch,
            precession_rate: config.precession_rate,
            relativistic: false,
            cumulative_precession: 0.0,
            rotation_angle: 0.0,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            last_update: 0.0,
            reference_position: DVec3::ZERO,
        };
        body.validate()?;
        propagator::propagate(&mut body, 0.0)?;
        body.reference_position = body.position;
        Ok(body)
    }

    /// The central star has every orbital element zero.
    pub fn is_central(&self) -> bool {
        self.elements.is_zero()
    }

    /// Axial tilt beyond 90°: the body spins lying on its side or upside down.
    pub fn is_extreme_tilt(&self) -> bool {
        self.axial_tilt > std::f64::consts::FRAC_PI_2
    }

    /// Position at J2000.0, used as a fallback when running state is corrupted.
    pub fn reference_position(&self) -> DVec3 {
        self.reference_position
    }

    /// Current position, or the J2000.0 reference when it is not finite.
    pub fn position_or_reference(&self) -> DVec3 {
        if self.position.is_finite() {
            self.position
        } else {
            self.reference_position
        }
    }

    /// Check elements and running state before propagation.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let finite_fields = [
            ("mass", self.mass),
            ("radius", self.radius),
            ("axial tilt", self.axial_tilt),
            ("rotation period", self.rotation_period),
            ("semi-major axis", self.elements.semi_major_axis),
            ("eccentricity", self.elements.eccentricity),
            ("orbital period", self.elements.orbital_period),
            ("inclination", self.elements.inclination),
            (
                "longitude of ascending node",
                self.elements.longitude_of_ascending_node,
            ),
            ("argument of perihelion", self.elements.argument_of_perihelion),
            ("mean anomaly", self.mean_anomaly),
            ("precession rate", self.precession_rate),
            ("cumulative precession", self.cumulative_precession),
        ];
        if let Some((field, _)) = finite_fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::NonFinite {
                body: self.name.clone(),
                field: *field,
            });
        }

        if self.is_central() {
            return Ok(());
        }

        let e = self.elements.eccentricity;
        if !(0.0..1.0).contains(&e) {
            return Err(OrbitError::InvalidEccentricity {
                body: self.name.clone(),
                value: e,
            });
        }
        if self.elements.semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis {
                body: self.name.clone(),
                value: self.elements.semi_major_axis,
            });
        }
        if self.elements.orbital_period <= 0.0 {
            return Err(OrbitError::InvalidPeriod {
                body: self.name.clone(),
                value: self.elements.orbital_period,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SOLAR_SYSTEM;

    fn test_planet() -> BodyConfig {
        BodyConfig {
            name: "Testworld",
            mass: 5.97e24,
            radius: 6_371.0,
            axial_tilt_deg: 23.44,
            rotation_period_hours: 24.0,
            retrograde: false,
            has_rings: false,
            semi_major_axis: 149_597_890.0,
            eccentricity: 0.0167,
            orbital_period_days: 365.256,
            inclination_deg: 0.0,
            longitude_of_ascending_node_deg: 0.0,
            argument_of_perihelion_deg: 0.0,
            mean_anomaly_deg: 0.0,
            precession_rate: 3.84,
        }
    }

    #[test]
    fn test_from_config_converts_degrees() {
        let mut config = test_planet();
        config.inclination_deg = 90.0;
        let body = CelestialBody::from_config(&config).unwrap();
        assert!((body.elements.inclination - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((body.axial_tilt - 23.44_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_from_config_places_body_at_epoch_position() {
        let body = CelestialBody::from_config(&test_planet()).unwrap();
        assert!(body.position.is_finite());
        assert!(body.position.length() > 1e8);
        assert_eq!(body.reference_position(), body.position);
    }

    #[test]
    fn test_non_finite_position_falls_back_to_reference() {
        let mut body = CelestialBody::from_config(&test_planet()).unwrap();
        let reference = body.reference_position();
        body.position = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(body.position_or_reference(), DVec3::new(1.0, 2.0, 3.0));
        body.position.y = f64::INFINITY;
        assert_eq!(body.position_or_reference(), reference);
    }

    #[test]
    fn test_central_body_detection() {
        let sun = CelestialBody::from_config(&SOLAR_SYSTEM[0]).unwrap();
        assert!(sun.is_central());
        assert_eq!(sun.position, DVec3::ZERO);

        let planet = CelestialBody::from_config(&test_planet()).unwrap();
        assert!(!planet.is_central());
    }

    #[test]
    fn test_rejects_parabolic_orbit() {
        let mut config = test_planet();
        config.eccentricity = 1.0;
        let err = CelestialBody::from_config(&config).unwrap_err();
        assert!(matches!(err, OrbitError::InvalidEccentricity { .. }));
    }

    #[test]
    fn test_rejects_negative_eccentricity() {
        let mut config = test_planet();
        config.eccentricity = -0.1;
        assert!(CelestialBody::from_config(&config).is_err());
    }

    #[test]
    fn test_rejects_non_positive_semi_major_axis() {
        let mut config = test_planet();
        config.semi_major_axis = -5.0;
        let err = CelestialBody::from_config(&config).unwrap_err();
        assert!(matches!(err, OrbitError::InvalidSemiMajorAxis { .. }));
    }

    #[test]
    fn test_rejects_nan_element() {
        let mut config = test_planet();
        config.inclination_deg = f64::NAN;
        let err = CelestialBody::from_config(&config).unwrap_err();
        assert_eq!(
            err,
            OrbitError::NonFinite {
                body: "Testworld".to_string(),
                field: "inclination",
            }
        );
    }

    #[test]
    fn test_extreme_tilt() {
        let mut config = test_planet();
        config.axial_tilt_deg = 97.77;
        let body = CelestialBody::from_config(&config).unwrap();
        assert!(body.is_extreme_tilt());

        let earthlike = CelestialBody::from_config(&test_planet()).unwrap();
        assert!(!earthlike.is_extreme_tilt());
    }

    #[test]
    fn test_mean_motion_of_one_day_period() {
        let elements = OrbitalElements {
            orbital_period: 1.0,
            ..Default::default()
        };
        assert!((elements.mean_motion() - std::f64::consts::TAU / 86_400.0).abs() < 1e-18);
    }
}

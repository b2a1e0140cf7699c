//! Built-in solar system: the Sun, the eight planets, and Pluto.
//!
//! Orbital elements are the J2000.0 mean elements (JPL approximate
//! positions table) with ω = ϖ − Ω and M = L − ϖ. Precession rates are
//! the general-relativistic perihelion advance per planet.

use crate::BodyConfig;

/// Sun, Mercury through Neptune, and Pluto, star first.
pub const SOLAR_SYSTEM: [BodyConfig; 10] = [
    BodyConfig {
        name: "Sun",
        mass: 1.988_47e30,
        radius: 695_700.0,
        axial_tilt_deg: 7.25,
        rotation_period_hours: 609.12,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 0.0,
        eccentricity: 0.0,
        orbital_period_days: 0.0,
        inclination_deg: 0.0,
        longitude_of_ascending_node_deg: 0.0,
        argument_of_perihelion_deg: 0.0,
        mean_anomaly_deg: 0.0,
        precession_rate: 0.0,
    },
    BodyConfig {
        name: "Mercury",
        mass: 3.3011e23,
        radius: 2_439.7,
        axial_tilt_deg: 0.034,
        rotation_period_hours: 1_407.6,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 57_909_227.0,
        eccentricity: 0.205_635_93,
        orbital_period_days: 87.969,
        inclination_deg: 7.004_979,
        longitude_of_ascending_node_deg: 48.330_766,
        argument_of_perihelion_deg: 29.127_030,
        mean_anomaly_deg: 174.792_527,
        precession_rate: 42.98,
    },
    BodyConfig {
        name: "Venus",
        mass: 4.8675e24,
        radius: 6_051.8,
        axial_tilt_deg: 177.36,
        rotation_period_hours: 5_832.5,
        retrograde: true,
        has_rings: false,
        semi_major_axis: 108_209_475.0,
        eccentricity: 0.006_776_72,
        orbital_period_days: 224.701,
        inclination_deg: 3.394_676,
        longitude_of_ascending_node_deg: 76.679_843,
        argument_of_perihelion_deg: 54.922_625,
        mean_anomaly_deg: 50.376_632,
        precession_rate: 8.62,
    },
    BodyConfig {
        name: "Earth",
        mass: 5.972_37e24,
        radius: 6_371.0,
        axial_tilt_deg: 23.44,
        rotation_period_hours: 23.9345,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 149_597_890.0,
        eccentricity: 0.016_711_23,
        orbital_period_days: 365.256,
        inclination_deg: 0.0,
        longitude_of_ascending_node_deg: 0.0,
        argument_of_perihelion_deg: 102.937_682,
        mean_anomaly_deg: 357.526_890,
        precession_rate: 3.84,
    },
    BodyConfig {
        name: "Mars",
        mass: 6.4171e23,
        radius: 3_389.5,
        axial_tilt_deg: 25.19,
        rotation_period_hours: 24.6229,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 227_939_200.0,
        eccentricity: 0.093_394_10,
        orbital_period_days: 686.980,
        inclination_deg: 1.849_691,
        longitude_of_ascending_node_deg: 49.559_539,
        argument_of_perihelion_deg: 286.496_832,
        mean_anomaly_deg: 19.390_198,
        precession_rate: 1.35,
    },
    BodyConfig {
        name: "Jupiter",
        mass: 1.898_2e27,
        radius: 69_911.0,
        axial_tilt_deg: 3.13,
        rotation_period_hours: 9.925,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 778_570_000.0,
        eccentricity: 0.048_386_24,
        orbital_period_days: 4_332.59,
        inclination_deg: 1.304_397,
        longitude_of_ascending_node_deg: 100.473_909,
        argument_of_perihelion_deg: 274.254_571,
        mean_anomaly_deg: 19.667_961,
        precession_rate: 0.0623,
    },
    BodyConfig {
        name: "Saturn",
        mass: 5.683_4e26,
        radius: 58_232.0,
        axial_tilt_deg: 26.73,
        rotation_period_hours: 10.656,
        retrograde: false,
        has_rings: true,
        semi_major_axis: 1_433_530_000.0,
        eccentricity: 0.053_861_79,
        orbital_period_days: 10_759.22,
        inclination_deg: 2.485_992,
        longitude_of_ascending_node_deg: 113.662_424,
        argument_of_perihelion_deg: 338.936_454,
        mean_anomaly_deg: 317.355_366,
        precession_rate: 0.0136,
    },
    BodyConfig {
        name: "Uranus",
        mass: 8.681_0e25,
        radius: 25_362.0,
        axial_tilt_deg: 97.77,
        rotation_period_hours: 17.24,
        retrograde: true,
        has_rings: true,
        semi_major_axis: 2_872_460_000.0,
        eccentricity: 0.047_257_44,
        orbital_period_days: 30_688.5,
        inclination_deg: 0.772_638,
        longitude_of_ascending_node_deg: 74.016_925,
        argument_of_perihelion_deg: 96.937_351,
        mean_anomaly_deg: 142.283_828,
        precession_rate: 0.0024,
    },
    BodyConfig {
        name: "Neptune",
        mass: 1.024_13e26,
        radius: 24_622.0,
        axial_tilt_deg: 28.32,
        rotation_period_hours: 16.11,
        retrograde: false,
        has_rings: false,
        semi_major_axis: 4_495_060_000.0,
        eccentricity: 0.008_590_48,
        orbital_period_days: 60_182.0,
        inclination_deg: 1.770_043,
        longitude_of_ascending_node_deg: 131.784_226,
        argument_of_perihelion_deg: 273.180_537,
        mean_anomaly_deg: 259.915_208,
        precession_rate: 0.0008,
    },
    BodyConfig {
        name: "Pluto",
        mass: 1.303e22,
        radius: 1_188.3,
        axial_tilt_deg: 122.53,
        rotation_period_hours: 153.2928,
        retrograde: true,
        has_rings: false,
        semi_major_axis: 5_906_380_000.0,
        eccentricity: 0.248_827_30,
        orbital_period_days: 90_560.0,
        inclination_deg: 17.140_012,
        longitude_of_ascending_node_deg: 110.303_937,
        argument_of_perihelion_deg: 113.764_979,
        mean_anomaly_deg: 14.860_122,
        precession_rate: 0.0004,
    },
];

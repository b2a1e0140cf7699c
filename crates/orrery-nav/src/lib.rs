//! Camera navigation through the solar system.
//!
//! The [`NavigationController`] is a five-mode state machine (free flight,
//! orbit, follow, autopilot, warp) driven once per tick by a
//! [`FlightIntent`] and the current [`orrery_orbit::SolarSystem`]. Host-facing
//! changes are queued as [`NavEvent`]s.

mod autopilot;
mod controller;
mod easing;
mod events;
mod gravity;
mod intent;
mod mode;
mod picking;
mod settings;
mod target;
mod warp;

pub use autopilot::{Autopilot, AutopilotStep, CRUISE_FRACTION, MIN_PROFILE, speed_profile};
pub use controller::{FALLBACK_DT, MAX_CAMERA_DELTA, NavigationController};
pub use easing::{ease_in_out_quintic, look_at};
pub use events::{NavEvent, NavTelemetry};
pub use gravity::gravity_perturbation;
pub use intent::FlightIntent;
pub use mode::{CameraMode, ParseModeError};
pub use picking::{Ray, pick_body};
pub use settings::NavSettings;
pub use target::TargetSnapshot;
pub use warp::{WarpSample, WarpTransit, arrival_point};

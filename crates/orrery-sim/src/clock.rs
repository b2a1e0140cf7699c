//! Simulation clock: converts real frame time into scaled simulated time and
//! drives the active physics model.

use chrono::{DateTime, Utc};
use orrery_orbit::{SolarSystem, set_epoch_offset};
use tracing::{debug, info, warn};

use crate::date::{
    clamp_date, date_from_j2000_seconds, format_date, j2000, offset_range, parse_date,
    seconds_since_j2000,
};
use crate::{KeplerianModel, NBodyModel, PhysicsModel, SimError};

/// Longest real-time delta, in seconds, fed to physics in one tick.
pub const MAX_PHYSICS_DELTA: f64 = 0.1;

/// Minimum real time between two published date strings.
pub const DATE_PUBLISH_INTERVAL_MS: f64 = 1000.0;

/// Owns simulated time and the physics-model selector.
///
/// The host calls [`advance`](Self::advance) once per frame with a
/// monotonically increasing real timestamp. Simulated time is kept as
/// seconds since J2000.0 and moves by `clamp(real delta) × time_scale`.
pub struct SimulationClock {
    time_scale: f64,
    sim_seconds: f64,
    last_real_ms: Option<f64>,
    last_publish_ms: Option<f64>,
    model: Box<dyn PhysicsModel>,
    use_n_body: bool,
    relativistic: bool,
    show_orbits: bool,
}

impl std::fmt::Debug for SimulationClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationClock")
            .field("time_scale", &self.time_scale)
            .field("date", &self.formatted_date())
            .field("model", &self.model.name())
            .field("relativistic", &self.relativistic)
            .field("show_orbits", &self.show_orbits)
            .finish()
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(j2000())
    }
}

impl SimulationClock {
    /// A real-time clock (scale 1) starting at `start`, clamped to the
    /// displayable range. Bodies are not touched until [`sync`](Self::sync)
    /// or [`set_date`](Self::set_date).
    pub fn new(start: DateTime<Utc>) -> Self {
        let (start, clamped) = clamp_date(start);
        if clamped {
            warn!(date = %format_date(start), "Start date out of range, clamped");
        }
        Self {
            time_scale: 1.0,
            sim_seconds: seconds_since_j2000(start),
            last_real_ms: None,
            last_publish_ms: None,
            model: Box::new(KeplerianModel),
            use_n_body: false,
            relativistic: false,
            show_orbits: false,
        }
    }

    /// Builder-style time scale.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.set_time_scale(scale);
        self
    }

    /// Advance simulated time by the real time elapsed since the previous
    /// call and step every body once.
    ///
    /// The first call only records `now_ms`. Returns the formatted date when
    /// at least [`DATE_PUBLISH_INTERVAL_MS`] have passed since the last
    /// publication.
    pub fn advance(&mut self, now_ms: f64, system: &mut SolarSystem) -> Option<String> {
        if !now_ms.is_finite() {
            warn!(now_ms, "Ignoring non-finite frame timestamp");
            return None;
        }

        if let Some(last) = self.last_real_ms {
            let real_delta = ((now_ms - last) / 1000.0).clamp(0.0, MAX_PHYSICS_DELTA);
            let scaled = self.bounded_delta(real_delta * self.time_scale);
            if scaled != 0.0 {
                if let Err(err) = self.model.step(system, scaled) {
                    warn!(error = %err, model = self.model.name(), "Physics step failed");
                }
                self.sim_seconds += scaled;
            }
        }
        self.last_real_ms = Some(now_ms);

        let due = self
            .last_publish_ms
            .is_none_or(|last| now_ms - last >= DATE_PUBLISH_INTERVAL_MS);
        if due {
            self.last_publish_ms = Some(now_ms);
            Some(self.formatted_date())
        } else {
            None
        }
    }

    /// Shrink `delta` so the simulated date stays inside the displayable range.
    fn bounded_delta(&self, delta: f64) -> f64 {
        let (lo, hi) = offset_range();
        let target = (self.sim_seconds + delta).clamp(lo, hi);
        if target != self.sim_seconds + delta {
            debug!("Simulated date reached the edge of the supported range");
        }
        target - self.sim_seconds
    }

    /// Simulated seconds per real second. Zero pauses, negative rewinds.
    /// Non-finite values are ignored.
    pub fn set_time_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            warn!(scale, "Ignoring non-finite time scale");
            return;
        }
        debug!(scale, "Time scale set");
        self.time_scale = scale;
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Absolute reset of every body to `date`.
    ///
    /// Mean anomaly, precession, and spin are recomputed from the J2000
    /// offset, so the result does not depend on any earlier call. Dates
    /// outside the supported range are clamped.
    pub fn set_date(
        &mut self,
        date: DateTime<Utc>,
        system: &mut SolarSystem,
    ) -> Result<(), SimError> {
        let (date, clamped) = clamp_date(date);
        if clamped {
            warn!(date = %format_date(date), "Requested date out of range, clamped");
        }
        self.sim_seconds = seconds_since_j2000(date);
        self.last_publish_ms = None;
        info!(date = %self.formatted_date(), "Simulation date set");
        self.sync(system)
    }

    /// Parse `input` and [`set_date`](Self::set_date).
    pub fn set_date_str(
        &mut self,
        input: &str,
        system: &mut SolarSystem,
    ) -> Result<(), SimError> {
        let date = parse_date(input)?;
        self.set_date(date, system)
    }

    /// Re-derive every body's state from the current simulated date.
    pub fn sync(&self, system: &mut SolarSystem) -> Result<(), SimError> {
        let mut first_error = None;
        for body in system.bodies_mut() {
            if let Err(err) = set_epoch_offset(body, self.sim_seconds) {
                warn!(body = %body.name, error = %err, "Cannot reset body to date");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        date_from_j2000_seconds(self.sim_seconds)
    }

    /// Simulated seconds since J2000.0.
    pub fn seconds_since_epoch(&self) -> f64 {
        self.sim_seconds
    }

    /// `YYYY-MM-DD HH:MM:SS UTC`.
    pub fn formatted_date(&self) -> String {
        format_date(self.date())
    }

    /// Select the N-body integrator (`true`) or Keplerian propagation.
    ///
    /// Either way bodies are first reset to the Keplerian state at the
    /// current date: that seeds N-body velocities from the orbit derivative,
    /// and discards integrator drift when switching back.
    pub fn set_physics_model(
        &mut self,
        use_n_body: bool,
        system: &mut SolarSystem,
    ) -> Result<(), SimError> {
        if use_n_body == self.use_n_body {
            return Ok(());
        }
        self.use_n_body = use_n_body;
        self.model = if use_n_body {
            Box::new(NBodyModel::new())
        } else {
            Box::new(KeplerianModel)
        };
        info!(model = self.model.name(), "Physics model switched");
        self.sync(system)
    }

    pub fn uses_n_body(&self) -> bool {
        self.use_n_body
    }

    pub fn physics_model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Toggle perihelion precession on every body with a non-zero rate.
    ///
    /// Under Keplerian propagation the bodies are re-derived from the
    /// current date so the accumulated precession appears (or vanishes)
    /// immediately.
    pub fn set_relativistic_effects(
        &mut self,
        enabled: bool,
        system: &mut SolarSystem,
    ) -> Result<(), SimError> {
        self.relativistic = enabled;
        for body in system.bodies_mut() {
            if body.precession_rate != 0.0 {
                body.relativistic = enabled;
            }
        }
        info!(enabled, "Relativistic precession toggled");
        if self.use_n_body {
            Ok(())
        } else {
            self.sync(system)
        }
    }

    pub fn relativistic_effects(&self) -> bool {
        self.relativistic
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        self.show_orbits = show;
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_orbit::constants::SECONDS_PER_DAY;

    fn setup() -> (SimulationClock, SolarSystem) {
        let mut system = SolarSystem::solar().unwrap();
        let clock = SimulationClock::default();
        clock.sync(&mut system).unwrap();
        (clock, system)
    }

    fn positions(system: &SolarSystem) -> Vec<glam::DVec3> {
        system.bodies().iter().map(|b| b.position).collect()
    }

    #[test]
    fn test_first_advance_only_records_timestamp() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(SECONDS_PER_DAY);
        let before = positions(&system);
        let published = clock.advance(5_000.0, &mut system);
        assert_eq!(published.as_deref(), Some("2000-01-01 12:00:00 UTC"));
        assert_eq!(positions(&system), before);
        assert_eq!(clock.seconds_since_epoch(), 0.0);
    }

    #[test]
    fn test_advance_scales_and_clamps_delta() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(1000.0);
        clock.advance(0.0, &mut system);
        clock.advance(50.0, &mut system);
        assert!((clock.seconds_since_epoch() - 50.0).abs() < 1e-9);

        // A two-second stall counts as MAX_PHYSICS_DELTA.
        clock.advance(2_050.0, &mut system);
        assert!((clock.seconds_since_epoch() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_scale_pauses() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(0.0);
        assert!(clock.is_paused());
        let before = positions(&system);
        clock.advance(0.0, &mut system);
        clock.advance(16.0, &mut system);
        assert_eq!(positions(&system), before);
    }

    #[test]
    fn test_negative_scale_runs_backwards() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(-SECONDS_PER_DAY);
        clock.advance(0.0, &mut system);
        clock.advance(100.0, &mut system);
        assert!(clock.seconds_since_epoch() < 0.0);
        assert!(clock.formatted_date().starts_with("1999-12-31"));
    }

    #[test]
    fn test_backwards_real_time_is_ignored() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(1000.0);
        clock.advance(1_000.0, &mut system);
        clock.advance(500.0, &mut system);
        assert_eq!(clock.seconds_since_epoch(), 0.0);
    }

    #[test]
    fn test_non_finite_time_scale_ignored() {
        let (mut clock, _) = setup();
        clock.set_time_scale(42.0);
        clock.set_time_scale(f64::NAN);
        assert_eq!(clock.time_scale(), 42.0);
    }

    #[test]
    fn test_date_published_at_most_once_per_second() {
        let (mut clock, mut system) = setup();
        let mut published = 0;
        for frame in 0..=200 {
            let now = frame as f64 * 16.0;
            if clock.advance(now, &mut system).is_some() {
                published += 1;
            }
        }
        // t = 0, 1008, 2016, 3024 ms.
        assert_eq!(published, 4);
    }

    #[test]
    fn test_set_date_republishes_immediately() {
        let (mut clock, mut system) = setup();
        clock.advance(0.0, &mut system);
        assert!(clock.advance(10.0, &mut system).is_none());
        clock
            .set_date(parse_date("2024-06-01").unwrap(), &mut system)
            .unwrap();
        assert_eq!(
            clock.advance(20.0, &mut system).as_deref(),
            Some("2024-06-01 00:00:00 UTC")
        );
    }

    #[test]
    fn test_set_date_is_absolute() {
        let (mut clock, mut system) = setup();
        let d1 = parse_date("2031-05-17T08:00:00Z").unwrap();
        let d2 = parse_date("1700-01-01").unwrap();

        clock.set_date(d1, &mut system).unwrap();
        let direct = positions(&system);

        clock.set_date(d2, &mut system).unwrap();
        clock.set_time_scale(SECONDS_PER_DAY);
        clock.advance(0.0, &mut system);
        clock.advance(100.0, &mut system);
        clock.set_date(d1, &mut system).unwrap();

        assert_eq!(positions(&system), direct);
    }

    #[test]
    fn test_set_date_clamps_out_of_range() {
        let (mut clock, mut system) = setup();
        clock
            .set_date(parse_date("3500-01-01").unwrap(), &mut system)
            .unwrap();
        assert!(clock.formatted_date().starts_with("2600-12-31"));
    }

    #[test]
    fn test_set_date_str_rejects_garbage() {
        let (mut clock, mut system) = setup();
        assert!(matches!(
            clock.set_date_str("soon", &mut system),
            Err(SimError::DateParse(_))
        ));
        assert_eq!(clock.seconds_since_epoch(), 0.0);
    }

    #[test]
    fn test_advance_stops_at_range_edge() {
        let (mut clock, mut system) = setup();
        clock
            .set_date(parse_date("2600-12-31T23:59:00Z").unwrap(), &mut system)
            .unwrap();
        clock.set_time_scale(SECONDS_PER_DAY);
        clock.advance(0.0, &mut system);
        clock.advance(100.0, &mut system);
        assert_eq!(clock.formatted_date(), "2600-12-31 23:59:59 UTC");
    }

    #[test]
    fn test_physics_switch_round_trip_restores_keplerian_state() {
        let (mut clock, mut system) = setup();
        clock.set_time_scale(SECONDS_PER_DAY);
        clock.set_physics_model(true, &mut system).unwrap();
        assert!(clock.uses_n_body());
        assert_eq!(clock.physics_model_name(), "n-body");

        clock.advance(0.0, &mut system);
        for frame in 1..=10 {
            clock.advance(frame as f64 * 100.0, &mut system);
        }
        clock.set_physics_model(false, &mut system).unwrap();

        let mut reference = SolarSystem::solar().unwrap();
        SimulationClock::default()
            .with_time_scale(1.0)
            .set_date(clock.date(), &mut reference)
            .unwrap();
        assert_eq!(positions(&system), positions(&reference));
    }

    #[test]
    fn test_n_body_velocity_seeded_from_orbit() {
        let (mut clock, mut system) = setup();
        clock.set_physics_model(true, &mut system).unwrap();
        let speed = system.get("Earth").unwrap().velocity.length();
        assert!((speed - 29.8).abs() < 1.0);
    }

    #[test]
    fn test_relativistic_toggle_applies_to_bodies_with_rate() {
        let (mut clock, mut system) = setup();
        clock
            .set_date(parse_date("2100-01-01").unwrap(), &mut system)
            .unwrap();
        clock.set_relativistic_effects(true, &mut system).unwrap();

        let mercury = system.get("Mercury").unwrap();
        assert!(mercury.relativistic);
        assert!(mercury.cumulative_precession > 0.0);
        assert!(!system.get("Sun").unwrap().relativistic);

        clock.set_relativistic_effects(false, &mut system).unwrap();
        assert_eq!(system.get("Mercury").unwrap().cumulative_precession, 0.0);
    }

    #[test]
    fn test_show_orbits_flag() {
        let (mut clock, _) = setup();
        assert!(!clock.show_orbits());
        clock.set_show_orbits(true);
        assert!(clock.show_orbits());
    }
}

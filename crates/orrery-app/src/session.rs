//! The orrery session: one solar system, one clock, one camera.

use glam::DVec3;
use orrery_config::{CameraConfig, Config};
use orrery_nav::{CameraMode, FALLBACK_DT, FlightIntent, NavSettings, NavigationController, Ray};
use orrery_orbit::{SolarSystem, body_orientation, orbit_path};
use orrery_sim::{SimulationClock, parse_date};
use tracing::{debug, info, warn};

use crate::scene::{BodyVisual, HeadlessScene, SceneAdapter};
use crate::telemetry::{FrameTelemetry, NearestBody};
use crate::SessionError;

/// Points per orbit path polyline.
pub const ORBIT_PATH_SAMPLES: usize = 256;

/// Camera tuning taken from the config file, the rest left at defaults.
pub fn nav_settings_from(camera: &CameraConfig) -> NavSettings {
    NavSettings {
        movement_speed: camera.movement_speed,
        max_speed: camera.max_speed,
        damping_factor: camera.damping_factor,
        boost_multiplier: camera.boost_multiplier,
        inertia: camera.inertia,
        ..NavSettings::default()
    }
}

/// Owns the whole simulation and exposes the host/UI operations.
///
/// Drive it with [`tick`](Self::tick) once per frame.
pub struct Orrery<S: SceneAdapter = HeadlessScene> {
    system: SolarSystem,
    clock: SimulationClock,
    nav: NavigationController,
    scene: S,
    tick: u64,
    last_now_ms: Option<f64>,
    orbit_paths_dirty: bool,
}

impl Orrery<HeadlessScene> {
    /// A headless session with default settings.
    pub fn headless() -> Result<Self, SessionError> {
        Self::from_config(&Config::default(), HeadlessScene::new())
    }
}

impl<S: SceneAdapter> Orrery<S> {
    /// Build a session from `config`, registering every body with `scene`.
    pub fn from_config(config: &Config, mut scene: S) -> Result<Self, SessionError> {
        config.validate()?;
        let sim = &config.simulation;

        let mut system = SolarSystem::solar()?;
        let start = parse_date(&sim.start_date)?;
        let mut clock = SimulationClock::new(start).with_time_scale(sim.time_scale);
        clock.sync(&mut system)?;
        clock.set_physics_model(sim.use_n_body, &mut system)?;
        if sim.relativistic_effects {
            clock.set_relativistic_effects(true, &mut system)?;
        }
        clock.set_show_orbits(sim.show_orbits);

        for body in system.bodies() {
            let visual = BodyVisual {
                name: body.name.clone(),
                radius: body.radius,
                has_rings: body.has_rings,
                extreme_tilt: body.is_extreme_tilt(),
            };
            if let Err(err) = scene.register_body(&visual) {
                warn!(body = %body.name, error = %err, "Scene could not register body");
            }
        }

        let nav = NavigationController::new(nav_settings_from(&config.camera))
            .with_position(DVec3::from_array(config.camera.start_position));

        info!(
            date = %clock.formatted_date(),
            model = clock.physics_model_name(),
            bodies = system.len(),
            "Session started"
        );

        Ok(Self {
            system,
            clock,
            nav,
            scene,
            tick: 0,
            last_now_ms: None,
            orbit_paths_dirty: true,
        })
    }

    // -- accessors -------------------------------------------------------

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Real time of the last tick, ms. Zero before the first tick.
    pub fn now_ms(&self) -> f64 {
        self.last_now_ms.unwrap_or(0.0)
    }

    // -- simulation controls ---------------------------------------------

    pub fn set_time_scale(&mut self, scale: f64) {
        self.clock.set_time_scale(scale);
    }

    /// Jump to a date. Accepts the formats of [`orrery_sim::parse_date`].
    pub fn set_date(&mut self, date: &str) -> Result<(), SessionError> {
        self.clock.set_date_str(date, &mut self.system)?;
        self.orbit_paths_dirty = true;
        Ok(())
    }

    pub fn set_physics_model(&mut self, use_n_body: bool) -> Result<(), SessionError> {
        self.clock.set_physics_model(use_n_body, &mut self.system)?;
        self.orbit_paths_dirty = true;
        Ok(())
    }

    pub fn set_relativistic_effects(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.clock
            .set_relativistic_effects(enabled, &mut self.system)?;
        self.orbit_paths_dirty = true;
        Ok(())
    }

    pub fn set_show_orbits(&mut self, show: bool) {
        if self.clock.show_orbits() != show {
            self.clock.set_show_orbits(show);
            self.orbit_paths_dirty = true;
        }
    }

    // -- navigation --------------------------------------------------------

    pub fn set_target(&mut self, name: &str) -> bool {
        self.nav.set_target(&self.system, name)
    }

    pub fn clear_target(&mut self) -> bool {
        self.nav.clear_target()
    }

    /// Target whatever `ray` hits first.
    pub fn pick(&mut self, ray: &Ray) -> Option<String> {
        self.nav.pick_target(&self.system, ray)
    }

    /// Select `name` and warp to it. The transit clock starts on the next tick.
    pub fn warp_to_planet(&mut self, name: &str) -> bool {
        self.nav.warp_to(&self.system, name)
    }

    pub fn follow_planet(&mut self, name: &str) -> bool {
        self.nav.follow(&self.system, name)
    }

    pub fn start_autopilot(&mut self) -> bool {
        self.nav.start_autopilot(&self.system)
    }

    pub fn cancel_autopilot(&mut self) -> bool {
        self.nav.cancel_autopilot()
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) -> bool {
        self.nav.set_camera_mode(&self.system, mode)
    }

    pub fn cancel_all_automated_movement(&mut self) -> bool {
        self.nav.cancel_all_automated_movement()
    }

    /// Drop everything and return to free flight.
    pub fn escape(&mut self) {
        self.nav.escape();
    }

    // -- tick --------------------------------------------------------------

    /// Advance one frame: clock and bodies first, then the camera, then the
    /// scene mirror.
    pub fn tick(&mut self, now_ms: f64, intent: &FlightIntent) -> FrameTelemetry {
        let dt = match self.last_now_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => FALLBACK_DT,
        };
        if now_ms.is_finite() {
            self.last_now_ms = Some(now_ms);
        }

        let date = self.clock.advance(now_ms, &mut self.system);
        if date.is_some() && self.clock.relativistic_effects() {
            // Precessing orbits drift; refresh their paths with the date.
            self.orbit_paths_dirty = true;
        }

        self.nav.update(&self.system, intent, dt, now_ms);
        self.sync_scene();

        let events = self.nav.drain_events();
        for event in &events {
            debug!(?event, "Navigation event");
        }

        let camera_position = self.nav.position();
        let nearest_body = self
            .system
            .nearest_to(camera_position)
            .map(|(body, distance)| NearestBody {
                name: body.name.clone(),
                altitude_km: (distance - body.radius).max(0.0),
            });

        self.tick += 1;
        FrameTelemetry {
            tick: self.tick,
            date,
            time_scale: self.clock.time_scale(),
            physics_model: self.clock.physics_model_name().to_string(),
            camera: self.nav.telemetry(),
            nearest_body,
            events,
        }
    }

    fn sync_scene(&mut self) {
        for body in self.system.bodies() {
            if !body.position.is_finite() {
                warn!(body = %body.name, "Non-finite body position, showing reference");
            }
            let position = body.position_or_reference();
            if let Err(err) = self
                .scene
                .sync_body(&body.name, position, body_orientation(body))
            {
                warn!(body = %body.name, error = %err, "Scene body sync failed");
            }
        }

        if let Err(err) = self
            .scene
            .sync_camera(self.nav.position(), self.nav.orientation())
        {
            warn!(error = %err, "Scene camera sync failed");
        }

        if self.orbit_paths_dirty {
            let visible = self.clock.show_orbits();
            let paths: Vec<(String, Vec<DVec3>)> = if visible {
                self.system
                    .bodies()
                    .iter()
                    .filter(|b| !b.is_central())
                    .map(|b| (b.name.clone(), orbit_path(b, ORBIT_PATH_SAMPLES)))
                    .collect()
            } else {
                Vec::new()
            };
            match self.scene.sync_orbit_paths(&paths, visible) {
                Ok(()) => self.orbit_paths_dirty = false,
                Err(err) => warn!(error = %err, "Scene orbit path sync failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_settings_from_config() {
        let camera = CameraConfig {
            movement_speed: 123.0,
            inertia: false,
            ..CameraConfig::default()
        };
        let settings = nav_settings_from(&camera);
        assert_eq!(settings.movement_speed, 123.0);
        assert!(!settings.inertia);
        assert_eq!(settings.warp_duration_ms, NavSettings::default().warp_duration_ms);
    }

    #[test]
    fn test_registers_every_body_with_scene() {
        let session = Orrery::headless().unwrap();
        let saturn = session.scene().visual("Saturn").unwrap();
        assert!(saturn.has_rings);
        let uranus = session.scene().visual("Uranus").unwrap();
        assert!(uranus.extreme_tilt);
        assert!(session.scene().visual("Earth").is_some());
    }

    #[test]
    fn test_first_tick_publishes_date_and_orbits() {
        let mut session = Orrery::headless().unwrap();
        let frame = session.tick(0.0, &FlightIntent::IDLE);
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.date.as_deref(), Some("2000-01-01 12:00:00 UTC"));
        assert!(session.scene().orbits_visible());
        assert_eq!(
            session.scene().orbit_path("Earth").unwrap().len(),
            ORBIT_PATH_SAMPLES + 1
        );
        assert!(session.scene().orbit_path("Sun").is_none());
    }

    #[test]
    fn test_corrupted_body_syncs_reference_position() {
        let mut session = Orrery::headless().unwrap();
        session.tick(0.0, &FlightIntent::IDLE);
        let mars = session.system.get_mut("Mars").unwrap();
        mars.position = DVec3::new(f64::NAN, 0.0, 0.0);
        let reference = mars.reference_position();

        session.sync_scene();
        let (shown, _) = session.scene().body_transform("Mars").unwrap();
        assert_eq!(shown, reference);
    }

    #[test]
    fn test_invalid_start_date_rejected() {
        let mut config = Config::default();
        config.simulation.start_date = "yesterday".to_string();
        let result = Orrery::from_config(&config, HeadlessScene::new());
        assert!(matches!(result, Err(SessionError::Sim(_))));
    }
}

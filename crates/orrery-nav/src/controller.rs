//! The camera navigation state machine.
//!
//! One [`NavigationController`] owns the camera's position, velocity, and
//! orientation and moves them once per tick according to the active
//! [`CameraMode`]. The target is held by name and looked up in the
//! [`SolarSystem`] every tick; a [`TargetSnapshot`] taken at selection time
//! supplies radius and mass for arrival math.

use glam::{DQuat, DVec3};
use orrery_orbit::SolarSystem;
use tracing::{debug, info, warn};

use crate::autopilot::Autopilot;
use crate::easing::look_at;
use crate::gravity::gravity_perturbation;
use crate::picking::{Ray, pick_body};
use crate::warp::WarpTransit;
use crate::{CameraMode, FlightIntent, NavEvent, NavSettings, NavTelemetry, TargetSnapshot};

/// Camera delta used when the host passes a zero, negative, non-finite, or
/// oversized `dt`.
pub const FALLBACK_DT: f64 = 1.0 / 60.0;
/// Largest camera delta accepted as-is, seconds.
pub const MAX_CAMERA_DELTA: f64 = 0.1;

/// Behind-and-above follow offset in units of target radius.
const FOLLOW_OFFSET: DVec3 = DVec3::new(0.0, 1.5, 6.0);

fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 && dt <= MAX_CAMERA_DELTA {
        dt
    } else {
        FALLBACK_DT
    }
}

/// Five-mode camera navigation.
#[derive(Clone, Debug)]
pub struct NavigationController {
    settings: NavSettings,
    position: DVec3,
    velocity: DVec3,
    orientation: DQuat,
    speed: f64,
    mode: CameraMode,
    target: Option<TargetSnapshot>,
    autopilot: Autopilot,
    warp: Option<WarpTransit>,
    events: Vec<NavEvent>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavSettings::default())
    }
}

impl NavigationController {
    /// A free-flying camera at the origin facing −Z.
    pub fn new(settings: NavSettings) -> Self {
        Self {
            settings,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            speed: 0.0,
            mode: CameraMode::FreeFlight,
            target: None,
            autopilot: Autopilot::default(),
            warp: None,
            events: Vec::new(),
        }
    }

    /// Builder-style starting position.
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.set_position(position);
        self
    }

    // -- accessors ----------------------------------------------------------

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    /// Reported speed, km/s. Zero while orbiting.
    pub fn speed(&self) -> f64 {
        if self.mode == CameraMode::Orbit {
            0.0
        } else {
            self.velocity.length()
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn target(&self) -> Option<&TargetSnapshot> {
        self.target.as_ref()
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.name.as_str())
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn autopilot(&self) -> &Autopilot {
        &self.autopilot
    }

    pub fn warp(&self) -> Option<&WarpTransit> {
        self.warp.as_ref()
    }

    /// Zero unless autopilot is active.
    pub fn autopilot_progress(&self) -> f64 {
        if self.autopilot.active {
            self.autopilot.progress
        } else {
            0.0
        }
    }

    /// Zero unless a warp is running.
    pub fn warp_progress(&self) -> f64 {
        self.warp.as_ref().map_or(0.0, WarpTransit::progress)
    }

    pub fn telemetry(&self) -> NavTelemetry {
        NavTelemetry {
            position: self.position.to_array(),
            speed: self.speed(),
            mode: self.mode,
            autopilot_progress: self.autopilot_progress(),
            warp_progress: self.warp_progress(),
            target: self.target_name().map(str::to_string),
        }
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    // -- host commands -------------------------------------------------------

    /// Teleport the camera. Non-finite positions are rejected.
    pub fn set_position(&mut self, position: DVec3) -> bool {
        if !position.is_finite() {
            warn!(?position, "Rejecting non-finite camera position");
            return false;
        }
        self.position = position;
        true
    }

    pub fn set_settings(&mut self, settings: NavSettings) {
        self.settings = settings;
    }

    /// Select the named body as target.
    ///
    /// Unknown names, bodies with a non-finite position, and retargeting
    /// during autopilot or warp are refused with a warning; the current
    /// target is kept and no event is queued.
    pub fn set_target(&mut self, system: &SolarSystem, name: &str) -> bool {
        if self.automation_active() {
            warn!(body = name, mode = %self.mode, "Cannot change target during automated movement");
            return false;
        }
        let Some(body) = system.get(name) else {
            warn!(body = name, "Unknown target body");
            return false;
        };
        let Some(snapshot) = TargetSnapshot::capture(body) else {
            warn!(body = %body.name, "Target has non-finite state, ignoring selection");
            return false;
        };
        if self.target_name() == Some(snapshot.name.as_str()) {
            self.target = Some(snapshot);
            return true;
        }
        info!(body = %snapshot.name, "Target selected");
        self.events.push(NavEvent::TargetChanged {
            target: Some(snapshot.name.clone()),
        });
        self.target = Some(snapshot);
        true
    }

    /// Drop the current target. Orbit and follow fall back to free flight.
    pub fn clear_target(&mut self) -> bool {
        if self.automation_active() {
            warn!(mode = %self.mode, "Cannot clear target during automated movement");
            return false;
        }
        if self.target.take().is_none() {
            return false;
        }
        info!("Target cleared");
        self.events.push(NavEvent::TargetChanged { target: None });
        if self.mode.needs_target() {
            self.change_mode(CameraMode::FreeFlight);
        }
        true
    }

    /// Target the nearest body hit by `ray`. Returns the picked name.
    pub fn pick_target(&mut self, system: &SolarSystem, ray: &Ray) -> Option<String> {
        let (body, distance) = pick_body(system, ray)?;
        debug!(body = %body.name, distance, "Ray picked body");
        let name = body.name.clone();
        self.set_target(system, &name).then_some(name)
    }

    /// Circle the current target.
    pub fn start_orbit(&mut self, system: &SolarSystem) -> bool {
        self.enter_tracking_mode(system, CameraMode::Orbit)
    }

    /// Trail the current target.
    pub fn start_follow(&mut self, system: &SolarSystem) -> bool {
        self.enter_tracking_mode(system, CameraMode::Follow)
    }

    fn enter_tracking_mode(&mut self, system: &SolarSystem, mode: CameraMode) -> bool {
        if self.automation_active() {
            warn!(requested = %mode, current = %self.mode, "Mode change refused during automated movement");
            return false;
        }
        if self.live_target_position(system).is_none() {
            warn!(requested = %mode, "Mode needs a target");
            return false;
        }
        self.velocity = DVec3::ZERO;
        self.speed = 0.0;
        self.change_mode(mode);
        true
    }

    /// Begin an autopilot approach to the current target.
    pub fn start_autopilot(&mut self, system: &SolarSystem) -> bool {
        if self.autopilot.active {
            debug!("Autopilot already engaged");
            return false;
        }
        if self.warp.is_some() {
            warn!("Cannot engage autopilot during warp");
            return false;
        }
        let (Some(target_position), Some(radius)) = (
            self.live_target_position(system),
            self.target.as_ref().map(|t| t.radius),
        ) else {
            warn!("Autopilot needs a target");
            return false;
        };
        let distance = self.position.distance(target_position);
        self.autopilot = Autopilot::engage(distance, radius, self.mode, &self.settings);
        info!(
            body = self.target_name().unwrap_or_default(),
            distance, "Autopilot engaged"
        );
        self.change_mode(CameraMode::Autopilot);
        true
    }

    /// Begin a timed warp to the current target.
    pub fn start_warp(&mut self, system: &SolarSystem) -> bool {
        if self.warp.is_some() {
            debug!("Warp already in progress");
            return false;
        }
        if self.autopilot.active {
            warn!("Cannot warp while autopilot is engaged");
            return false;
        }
        let (Some(target_position), Some(target)) =
            (self.live_target_position(system), self.target.as_ref())
        else {
            warn!("Warp needs a target");
            return false;
        };
        let warp = WarpTransit::begin(
            &target.name,
            target_position,
            target.radius,
            self.position,
            self.mode,
            &self.settings,
        );
        info!(body = warp.target(), arrival = ?warp.arrival(), "Warp started");
        self.warp = Some(warp);
        self.velocity = DVec3::ZERO;
        self.change_mode(CameraMode::Warping);
        true
    }

    /// Select `name` and warp to it.
    pub fn warp_to(&mut self, system: &SolarSystem, name: &str) -> bool {
        if self.autopilot.active {
            warn!(body = name, "Cannot warp while autopilot is engaged");
            return false;
        }
        self.set_target(system, name) && self.start_warp(system)
    }

    /// Select `name` and follow it.
    pub fn follow(&mut self, system: &SolarSystem, name: &str) -> bool {
        if self.automation_active() {
            warn!(body = name, "Cannot follow during automated movement");
            return false;
        }
        self.set_target(system, name) && self.start_follow(system)
    }

    /// Dispatch a mode request to the matching transition.
    pub fn set_camera_mode(&mut self, system: &SolarSystem, mode: CameraMode) -> bool {
        match mode {
            CameraMode::FreeFlight => {
                self.escape();
                true
            }
            CameraMode::Orbit => self.start_orbit(system),
            CameraMode::Follow => self.start_follow(system),
            CameraMode::Autopilot => self.start_autopilot(system),
            CameraMode::Warping => self.start_warp(system),
        }
    }

    /// Stop the autopilot and restore the mode it started from. No-op when
    /// inactive.
    pub fn cancel_autopilot(&mut self) -> bool {
        if !self.autopilot.active {
            return false;
        }
        let resume = self.autopilot.resume_mode;
        self.autopilot.reset();
        self.velocity = DVec3::ZERO;
        self.speed = 0.0;
        info!(resume = %resume, "Autopilot cancelled");
        self.change_mode(resume);
        true
    }

    /// Abort the warp where it is and restore the mode it started from.
    /// No-op when no warp is running.
    pub fn cancel_warp(&mut self) -> bool {
        let Some(warp) = self.warp.take() else {
            return false;
        };
        let resume = warp.resume_mode();
        self.velocity = DVec3::ZERO;
        self.speed = 0.0;
        info!(resume = %resume, progress = warp.progress(), "Warp cancelled");
        self.change_mode(resume);
        true
    }

    /// Cancel autopilot and warp, whichever is running.
    pub fn cancel_all_automated_movement(&mut self) -> bool {
        let autopilot = self.cancel_autopilot();
        let warp = self.cancel_warp();
        autopilot || warp
    }

    /// Cancel any automation and drop into free flight from any mode.
    pub fn escape(&mut self) {
        self.cancel_all_automated_movement();
        if self.mode != CameraMode::FreeFlight {
            self.velocity = DVec3::ZERO;
            self.speed = 0.0;
            self.change_mode(CameraMode::FreeFlight);
        }
    }

    // -- tick ----------------------------------------------------------------

    /// Advance the camera by one tick.
    ///
    /// `dt` is the camera delta in seconds; `now_ms` is real time and drives
    /// the warp clock and the follow drift.
    pub fn update(&mut self, system: &SolarSystem, intent: &FlightIntent, dt: f64, now_ms: f64) {
        let dt = sanitize_dt(dt);
        let previous = self.position;

        if self.target.is_none() {
            self.acquire_nearby_target(system);
        }

        match self.mode {
            CameraMode::FreeFlight => self.update_free_flight(system, intent, dt),
            CameraMode::Autopilot => self.update_autopilot(system, dt),
            CameraMode::Orbit => self.update_orbit(system, dt),
            CameraMode::Follow => self.update_follow(system, dt, now_ms),
            CameraMode::Warping => self.update_warp(system, now_ms),
        }

        if !self.position.is_finite() || !self.velocity.is_finite() {
            warn!(mode = %self.mode, "Camera state went non-finite, restoring last position");
            self.position = previous;
            self.velocity = DVec3::ZERO;
            self.speed = 0.0;
        }
    }

    fn update_free_flight(&mut self, system: &SolarSystem, intent: &FlightIntent, dt: f64) {
        let intent = intent.sanitized();
        let s = &self.settings;

        // Local-axis turns: yaw about up, pitch about right, roll about forward.
        let turn = s.look_rate * dt;
        let yaw = DQuat::from_axis_angle(self.orientation * DVec3::Y, -intent.yaw * turn);
        let pitch = DQuat::from_axis_angle(self.orientation * DVec3::X, intent.pitch * turn);
        let roll = DQuat::from_axis_angle(self.orientation * DVec3::NEG_Z, intent.roll * turn);
        self.orientation = (roll * pitch * yaw * self.orientation).normalize();

        let thrust = intent.thrust_local();
        let magnitude = thrust.length().min(1.0);
        let target_speed = if intent.brake {
            0.0
        } else {
            let boost = if intent.boost { s.boost_multiplier } else { 1.0 };
            (s.movement_speed * boost * magnitude).min(s.max_speed)
        };
        self.speed = s.speed_smoothing * self.speed + (1.0 - s.speed_smoothing) * target_speed;

        if intent.has_thrust() && !intent.brake {
            self.velocity = self.orientation * thrust.normalize() * self.speed;
        } else if intent.brake || s.inertia {
            self.velocity *= s.damping_factor;
            if self.velocity.length() < s.stop_epsilon {
                self.velocity = DVec3::ZERO;
            }
        } else {
            self.velocity = DVec3::ZERO;
        }

        self.velocity += gravity_perturbation(system, self.position, s) * dt;
        self.position += self.velocity * dt;
    }

    fn update_autopilot(&mut self, system: &SolarSystem, dt: f64) {
        let Some(target_position) = self.live_target_position(system) else {
            warn!("Autopilot lost its target");
            self.cancel_autopilot();
            return;
        };
        let step = self
            .autopilot
            .step(self.position, target_position, dt, &self.settings);
        self.position = step.position;
        self.velocity = step.velocity;
        self.speed = step.velocity.length();
        self.face(target_position);

        if step.arrived {
            let target = self.target_name().unwrap_or_default().to_string();
            info!(body = %target, "Autopilot arrived");
            self.events.push(NavEvent::AutopilotArrived { target });
            self.velocity = DVec3::ZERO;
            self.speed = 0.0;
            self.change_mode(CameraMode::Orbit);
        }
    }

    fn update_orbit(&mut self, system: &SolarSystem, dt: f64) {
        let Some(target_position) = self.live_target_position(system) else {
            self.change_mode(CameraMode::FreeFlight);
            return;
        };
        let offset = self.position - target_position;
        let turn = DQuat::from_rotation_y(self.settings.orbit_angular_speed * dt);
        self.position = target_position + turn * offset;
        self.velocity = DVec3::ZERO;
        self.face(target_position);
    }

    fn update_follow(&mut self, system: &SolarSystem, dt: f64, now_ms: f64) {
        let (Some(target_position), Some(radius)) = (
            self.live_target_position(system),
            self.target.as_ref().map(|t| t.radius),
        ) else {
            self.change_mode(CameraMode::FreeFlight);
            return;
        };
        let drift = if now_ms.is_finite() {
            now_ms * self.settings.follow_drift_rate
        } else {
            0.0
        };
        let offset = DQuat::from_rotation_y(drift) * (FOLLOW_OFFSET * radius.max(1.0));
        let desired = target_position + offset;
        let next = self.position.lerp(desired, self.settings.follow_blend);
        self.velocity = (next - self.position) / dt;
        self.position = next;
        self.face(target_position);
    }

    fn update_warp(&mut self, system: &SolarSystem, now_ms: f64) {
        let Some(warp) = self.warp.as_mut() else {
            self.change_mode(CameraMode::FreeFlight);
            return;
        };
        let sample = warp.sample(now_ms);
        let target_name = warp.target().to_string();
        self.position = sample.position;
        self.velocity = DVec3::ZERO;
        if let Some(target_position) = self.live_target_position(system) {
            self.face(target_position);
        }

        if sample.complete {
            self.warp = None;
            info!(body = %target_name, "Warp completed");
            self.events.push(NavEvent::WarpCompleted {
                target: target_name,
            });
            self.change_mode(CameraMode::Orbit);
        }
    }

    // -- helpers ---------------------------------------------------------------

    fn automation_active(&self) -> bool {
        self.autopilot.active || self.warp.is_some()
    }

    /// Live position of the target. A body with non-finite state reports its
    /// reference position; a body that is gone falls back to the selection
    /// snapshot.
    fn live_target_position(&self, system: &SolarSystem) -> Option<DVec3> {
        let target = self.target.as_ref()?;
        match system.get(&target.name) {
            Some(body) => {
                if !body.position.is_finite() {
                    debug!(body = %target.name, "Using reference position for target");
                }
                Some(body.position_or_reference())
            }
            None => {
                debug!(body = %target.name, "Using snapshot position for target");
                Some(target.position)
            }
        }
    }

    /// With no target, adopt the nearest body whose proximity sphere
    /// contains the camera. The mode is left alone.
    fn acquire_nearby_target(&mut self, system: &SolarSystem) {
        let multiplier = self.settings.proximity_radius_multiplier;
        let nearest = system
            .bodies()
            .iter()
            .filter(|b| b.position.is_finite())
            .map(|b| (b, b.position.distance(self.position)))
            .filter(|(b, d)| *d < b.radius * multiplier)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(b, _)| b.name.clone());
        if let Some(name) = nearest {
            debug!(body = %name, "Auto-targeting nearby body");
            self.set_target(system, &name);
        }
    }

    fn face(&mut self, point: DVec3) {
        if let Some(rotation) = look_at(self.position, point) {
            self.orientation = rotation;
        }
    }

    fn change_mode(&mut self, to: CameraMode) {
        if self.mode == to {
            return;
        }
        let from = self.mode;
        self.mode = to;
        info!(%from, %to, "Camera mode changed");
        self.events.push(NavEvent::ModeChanged { from, to });
    }
}

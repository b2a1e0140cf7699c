//! Per-tick report handed back to the host.

use orrery_nav::{NavEvent, NavTelemetry};
use serde::{Deserialize, Serialize};

/// The body closest to the camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestBody {
    pub name: String,
    /// Distance from the camera to the body's surface, km.
    pub altitude_km: f64,
}

/// Everything a UI needs after one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameTelemetry {
    pub tick: u64,
    /// Formatted simulation date, present only when it was republished.
    pub date: Option<String>,
    pub time_scale: f64,
    pub physics_model: String,
    pub camera: NavTelemetry,
    pub nearest_body: Option<NearestBody>,
    pub events: Vec<NavEvent>,
}

impl FrameTelemetry {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        let target = self.camera.target.as_deref().unwrap_or("-");
        let mut line = format!(
            "#{:<6} mode={:<11} target={:<8} speed={:>12.1} km/s",
            self.tick,
            self.camera.mode.label(),
            target,
            self.camera.speed,
        );
        if self.camera.autopilot_progress > 0.0 {
            line.push_str(&format!(
                " autopilot={:.0}%",
                self.camera.autopilot_progress * 100.0
            ));
        }
        if self.camera.warp_progress > 0.0 {
            line.push_str(&format!(" warp={:.0}%", self.camera.warp_progress * 100.0));
        }
        if let Some(nearest) = &self.nearest_body {
            line.push_str(&format!(
                " nearest={} ({:.0} km)",
                nearest.name, nearest.altitude_km
            ));
        }
        line
    }
}

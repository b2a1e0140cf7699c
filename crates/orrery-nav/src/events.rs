//! Navigation events and per-tick telemetry.

use serde::{Deserialize, Serialize};

use crate::CameraMode;

/// Something the host may want to react to, queued by the controller and
/// drained once per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// A target was selected or cleared.
    TargetChanged { target: Option<String> },
    /// The camera mode changed.
    ModeChanged { from: CameraMode, to: CameraMode },
    /// Autopilot reached the arrival distance.
    AutopilotArrived { target: String },
    /// Warp transit finished at its arrival point.
    WarpCompleted { target: String },
}

/// Camera state reported to the host every tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavTelemetry {
    /// Camera position, km.
    pub position: [f64; 3],
    /// Camera speed, km/s.
    pub speed: f64,
    pub mode: CameraMode,
    /// `[0, 1]`, zero when autopilot is inactive.
    pub autopilot_progress: f64,
    /// `[0, 1]`, zero when no warp is running.
    pub warp_progress: f64,
    pub target: Option<String>,
}

//! The five camera navigation modes.

use serde::{Deserialize, Serialize};

/// Which motion rule drives the camera this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Pilot-controlled flight from [`FlightIntent`](crate::FlightIntent).
    #[default]
    FreeFlight,
    /// Circles the target about world +Y.
    Orbit,
    /// Trails the target from behind and above.
    Follow,
    /// Distance-adaptive approach to the target.
    Autopilot,
    /// Timed eased transit to a standoff point near the target.
    Warping,
}

impl CameraMode {
    pub const ALL: [CameraMode; 5] = [
        CameraMode::FreeFlight,
        CameraMode::Orbit,
        CameraMode::Follow,
        CameraMode::Autopilot,
        CameraMode::Warping,
    ];

    /// Autopilot and warp move the camera without pilot input.
    pub fn is_automated(self) -> bool {
        matches!(self, CameraMode::Autopilot | CameraMode::Warping)
    }

    /// Orbit, follow, and the automated modes all need a target.
    pub fn needs_target(self) -> bool {
        self != CameraMode::FreeFlight
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::FreeFlight => "free_flight",
            CameraMode::Orbit => "orbit",
            CameraMode::Follow => "follow",
            CameraMode::Autopilot => "autopilot",
            CameraMode::Warping => "warping",
        }
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognised camera mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown camera mode '{0}' (expected free_flight, orbit, follow, autopilot, or warping)")]
pub struct ParseModeError(pub String);

impl std::str::FromStr for CameraMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "freeflight" | "free" | "fly" => Ok(CameraMode::FreeFlight),
            "orbit" => Ok(CameraMode::Orbit),
            "follow" => Ok(CameraMode::Follow),
            "autopilot" | "auto" => Ok(CameraMode::Autopilot),
            "warping" | "warp" => Ok(CameraMode::Warping),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

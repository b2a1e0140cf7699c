//! Timed eased transit to a standoff point beside the target.
//!
//! The transit is an explicit state polled once per tick with the current
//! real time. Its clock starts at the first poll, so a command issued after
//! an idle gap still gets the full transit.

use glam::DVec3;

use crate::{CameraMode, NavSettings, ease_in_out_quintic};

/// Departure and target closer than this use the fallback axis.
const DEGENERATE_DISTANCE: f64 = 1e-6;

/// Arrival point `target + unit(departure − target) × standoff`, where the
/// standoff is `max(warp_min_standoff, warp_radius_multiplier × radius)`.
///
/// If departure and target coincide the camera arrives on the target's +Z
/// side.
pub fn arrival_point(
    departure: DVec3,
    target: DVec3,
    target_radius: f64,
    settings: &NavSettings,
) -> DVec3 {
    let standoff = settings
        .warp_min_standoff
        .max(settings.warp_radius_multiplier * target_radius);
    let away = departure - target;
    let axis = if away.length() < DEGENERATE_DISTANCE {
        DVec3::Z
    } else {
        away.normalize()
    };
    target + axis * standoff
}

/// Where the camera should be this tick, and whether the transit is over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpSample {
    pub position: DVec3,
    /// Linear time progress in `[0, 1]`.
    pub progress: f64,
    pub complete: bool,
}

/// A warp in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct WarpTransit {
    target: String,
    departure: DVec3,
    arrival: DVec3,
    started_at_ms: Option<f64>,
    duration_ms: f64,
    progress: f64,
    resume_mode: CameraMode,
}

impl WarpTransit {
    /// Start a transit from `departure` toward the target at `target_position`.
    pub fn begin(
        target: &str,
        target_position: DVec3,
        target_radius: f64,
        departure: DVec3,
        resume_mode: CameraMode,
        settings: &NavSettings,
    ) -> Self {
        Self {
            target: target.to_string(),
            departure,
            arrival: arrival_point(departure, target_position, target_radius, settings),
            started_at_ms: None,
            duration_ms: settings.warp_duration_ms.max(1.0),
            progress: 0.0,
            resume_mode,
        }
    }

    /// Recompute progress from `now_ms` and interpolate. Call once per tick.
    ///
    /// The first finite `now_ms` seen becomes the start time.
    pub fn sample(&mut self, now_ms: f64) -> WarpSample {
        if self.started_at_ms.is_none() && now_ms.is_finite() {
            self.started_at_ms = Some(now_ms);
        }
        let linear = match self.started_at_ms {
            Some(start) if now_ms.is_finite() => {
                ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
            }
            _ => self.progress,
        };
        self.progress = self.progress.max(linear);

        if self.progress >= 1.0 {
            return WarpSample {
                position: self.arrival,
                progress: 1.0,
                complete: true,
            };
        }
        let t = ease_in_out_quintic(self.progress);
        WarpSample {
            position: self.departure.lerp(self.arrival, t),
            progress: self.progress,
            complete: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn departure(&self) -> DVec3 {
        self.departure
    }

    /// The precomputed arrival point.
    pub fn arrival(&self) -> DVec3 {
        self.arrival
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn resume_mode(&self) -> CameraMode {
        self.resume_mode
    }
}

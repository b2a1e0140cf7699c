//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Session ticks run at a fixed 60 Hz regardless of how long frames take.
//! The caller supplies each frame time, which keeps headless runs
//! reproducible.

use tracing::warn;

/// Fixed tick length: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time accepted before clamping, seconds.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep loop state.
#[derive(Debug)]
pub struct GameLoop {
    accumulator: f64,
    total_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            total_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Run one frame of `frame_time` seconds.
    ///
    /// - `update_fn(FIXED_DT, loop_time)` runs zero or more times, where
    ///   `loop_time` is the loop time at the end of that step.
    /// - `render_fn(alpha)` runs exactly once with the interpolation alpha in
    ///   `[0.0, 1.0)`.
    pub fn tick_with(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let mut frame_time = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            self.total_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
            update_fn(FIXED_DT, self.total_time);
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Current interpolation alpha without running a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Returns the total number of frames rendered.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of fixed updates run.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Loop time covered by completed updates, seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

//! Host for the orrery: the session that owns the solar system, the clock,
//! and the camera, a fixed-timestep loop to drive it, and the scene adapter
//! it mirrors transforms into.

mod error;
pub mod game_loop;
mod scene;
mod session;
mod telemetry;

pub use error::SessionError;
pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use scene::{BodyVisual, HeadlessScene, SceneAdapter, SceneError};
pub use session::{ORBIT_PATH_SAMPLES, Orrery, nav_settings_from};
pub use telemetry::{FrameTelemetry, NearestBody};

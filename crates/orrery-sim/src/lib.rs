//! Simulated time for the orrery: the clock that scales real frame time,
//! the calendar it displays, and the physics models it drives.

mod clock;
pub mod date;
mod error;
mod model;

pub use clock::{DATE_PUBLISH_INTERVAL_MS, MAX_PHYSICS_DELTA, SimulationClock};
pub use date::{format_date, j2000, parse_date};
pub use error::SimError;
pub use model::{KeplerianModel, MAX_SUBSTEP_SECONDS, MAX_SUBSTEPS, NBodyModel, PhysicsModel};

//! Configuration for the orrery.
//!
//! Settings persist to disk as `config.ron` and may be overridden from the
//! command line. Missing sections and fields fall back to defaults, so older
//! files keep loading as settings are added.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, SimulationConfig, default_config_dir};
pub use error::ConfigError;

//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// Simulation and debug values override settings loaded from `config.ron`.
/// The navigation flags script a headless run.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Fly a camera through a simulated solar system")]
pub struct CliArgs {
    /// Simulated seconds per real second.
    #[arg(long, allow_negative_numbers = true)]
    pub time_scale: Option<f64>,

    /// Start date (RFC 3339, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD").
    #[arg(long)]
    pub date: Option<String>,

    /// Use the N-body integrator.
    #[arg(long)]
    pub n_body: bool,

    /// Apply relativistic perihelion precession.
    #[arg(long)]
    pub relativistic: bool,

    /// Select a target body at startup.
    #[arg(long)]
    pub target: Option<String>,

    /// Warp to a body at startup.
    #[arg(long, conflicts_with_all = ["autopilot", "follow"])]
    pub warp: Option<String>,

    /// Fly to a body on autopilot.
    #[arg(long, conflicts_with = "follow")]
    pub autopilot: Option<String>,

    /// Follow a body.
    #[arg(long)]
    pub follow: Option<String>,

    /// Real seconds to run the headless session for.
    #[arg(long, default_value_t = 10.0, value_parser = parse_seconds)]
    pub seconds: f64,

    /// Print telemetry as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// A finite, non-negative run length.
fn parse_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a finite number of seconds >= 0, got {value}"))
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
        if let Some(ref date) = args.date {
            self.simulation.start_date = date.clone();
        }
        if args.n_body {
            self.simulation.use_n_body = true;
        }
        if args.relativistic {
            self.simulation.relativistic_effects = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

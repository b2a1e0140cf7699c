//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated time and physics.
    pub simulation: SimulationConfig,
    /// Camera flight tuning.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per real second. Zero starts paused.
    pub time_scale: f64,
    /// Start date, RFC 3339.
    pub start_date: String,
    /// Integrate mutual gravity instead of following Kepler orbits.
    pub use_n_body: bool,
    /// Apply perihelion precession.
    pub relativistic_effects: bool,
    /// Draw orbit paths.
    pub show_orbits: bool,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Cruise speed in km/s.
    pub movement_speed: f64,
    /// Hard speed cap in km/s.
    pub max_speed: f64,
    /// Per-tick velocity retention while coasting.
    pub damping_factor: f64,
    pub boost_multiplier: f64,
    /// Keep drifting after thrust is released.
    pub inertia: bool,
    /// Starting camera position in km.
    pub start_position: [f64; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Ticks between telemetry lines in headless runs. Zero disables them.
    pub telemetry_interval_ticks: u32,
}

// --- Default implementations ---

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            start_date: "2000-01-01T12:00:00Z".to_string(),
            use_n_body: false,
            relativistic_effects: false,
            show_orbits: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: 10_000.0,
            max_speed: 5_000_000.0,
            damping_factor: 0.95,
            boost_multiplier: 5.0,
            inertia: true,
            // Above the ecliptic, outside Earth's orbit.
            start_position: [0.0, 5.0e7, 2.0e8],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            telemetry_interval_ticks: 60,
        }
    }
}

/// Per-user config directory, `<config dir>/orrery`, falling back to the
/// working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("orrery"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !sim.time_scale.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "simulation.time_scale",
                reason: format!("{} is not finite", sim.time_scale),
            });
        }

        let cam = &self.camera;
        let positive = [
            ("camera.movement_speed", cam.movement_speed),
            ("camera.max_speed", cam.max_speed),
            ("camera.boost_multiplier", cam.boost_multiplier),
        ];
        if let Some((field, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            return Err(ConfigError::InvalidValue {
                field: *field,
                reason: format!("{value} must be a positive number"),
            });
        }
        if !(0.0..1.0).contains(&cam.damping_factor) {
            return Err(ConfigError::InvalidValue {
                field: "camera.damping_factor",
                reason: format!("{} must be in [0, 1)", cam.damping_factor),
            });
        }
        if cam.start_position.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "camera.start_position",
                reason: "components must be finite".to_string(),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("time_scale: 1.0"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(simulation: (time_scale: 3600.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.simulation.time_scale, 3600.0);
        assert!(config.simulation.show_orbits);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.simulation.use_n_body = true;
        config.simulation.start_date = "2024-03-20T03:06:00Z".to_string();
        config.camera.start_position = [1.0, -2.0, 3.5];

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("orrery");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.simulation.relativistic_effects = true;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.unwrap().simulation.relativistic_effects);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_out_of_range_value_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "(camera: (damping_factor: 1.5))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "camera.damping_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let mut config = Config::default();
        config.camera.max_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "camera.max_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// orrery settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}

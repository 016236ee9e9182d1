use crate::error::{IrrigatorError, Result};
use crate::logic::calculations::ADC_MAX;
use crate::models::Reading;
use dialoguer::{Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Milliseconds between control cycles
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Stop after this many cycles; run until interrupted when unset
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

fn default_interval_ms() -> u64 {
    3000
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_cycles: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorMode {
    /// Cycle through the six demonstration scenarios
    #[default]
    Demo,
    /// Repeat `sensors.fixed` every cycle
    Fixed,
    /// pH and moisture from the analog channels, nutrients from `sensors.fixed`
    Analog,
}

impl SensorMode {
    pub const ALL: [SensorMode; 3] = [SensorMode::Demo, SensorMode::Fixed, SensorMode::Analog];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorMode::Demo => "demo",
            SensorMode::Fixed => "fixed",
            SensorMode::Analog => "analog",
        }
    }
}

impl std::fmt::Display for SensorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SensorConfig {
    #[serde(default)]
    pub mode: SensorMode,
    #[serde(default)]
    pub fixed: FixedReadingConfig,
    #[serde(default)]
    pub analog: AnalogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FixedReadingConfig {
    pub phosphorus_present: bool,
    pub potassium_present: bool,
    pub ph: f64,
    pub moisture_percent: f64,
}

impl FixedReadingConfig {
    pub fn to_reading(&self) -> Reading {
        Reading::new(
            self.phosphorus_present,
            self.potassium_present,
            self.ph,
            self.moisture_percent,
        )
    }
}

impl Default for FixedReadingConfig {
    fn default() -> Self {
        Self {
            phosphorus_present: true,
            potassium_present: true,
            ph: 7.0,
            moisture_percent: 55.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalogConfig {
    /// Raw 12-bit count on the pH channel
    pub ph_raw: u16,
    /// Raw 12-bit count on the moisture channel
    pub moisture_raw: u16,
    /// Backup air humidity; omitted or `.nan` means the sensor did not answer
    #[serde(default)]
    pub backup_humidity: Option<f64>,
}

impl Default for AnalogConfig {
    fn default() -> Self {
        Self {
            ph_raw: 2048,
            moisture_raw: 1843,
            backup_humidity: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RelayConfig {
    pub pin: u8,
    #[serde(default)]
    pub indicator_pin: Option<u8>,
    #[serde(default)]
    pub active_low: bool,
    #[serde(default)]
    pub indicator_active_low: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            pin: 2,
            indicator_pin: Some(2),
            active_low: false,
            indicator_active_low: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the standard locations are searched
    /// and the built-in defaults are used when nothing is found.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(IrrigatorError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using built-in defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::info!("Loading config from {}", config_path.display());

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| IrrigatorError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| IrrigatorError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.controller.interval_ms == 0 {
            return Err(IrrigatorError::Config(
                "controller.interval_ms must be greater than zero".into(),
            ));
        }

        if self.controller.max_cycles == Some(0) {
            return Err(IrrigatorError::Config(
                "controller.max_cycles must be at least 1 when set".into(),
            ));
        }

        let fixed = &self.sensors.fixed;
        if !fixed.ph.is_finite() || !fixed.moisture_percent.is_finite() {
            return Err(IrrigatorError::Config(
                "sensors.fixed ph and moisture_percent must be finite numbers".into(),
            ));
        }

        let analog = &self.sensors.analog;
        for (field, raw) in [("ph_raw", analog.ph_raw), ("moisture_raw", analog.moisture_raw)] {
            if i64::from(raw) > ADC_MAX {
                return Err(IrrigatorError::Config(format!(
                    "sensors.analog.{} must be within 0-{}, got {}",
                    field, ADC_MAX, raw
                )));
            }
        }

        Ok(())
    }

    /// Search `config/config.yaml`, then `<XDG config>/irrigator/config.yaml`.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("irrigator").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/irrigator/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IrrigatorError::Config("Cannot determine config directory".into()))?
            .join("irrigator");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Irrigation controller setup");
        println!();

        let defaults = Self::default();

        // --- Controller ---
        println!("Controller");
        let interval_ms: u64 = Input::new()
            .with_prompt("  Cycle interval (ms)")
            .default(defaults.controller.interval_ms)
            .interact_text()
            .map_err(|e| IrrigatorError::Config(format!("Input error: {}", e)))?;

        let modes: Vec<&str> = SensorMode::ALL.iter().map(|m| m.as_str()).collect();
        let mode_index = Select::new()
            .with_prompt("  Reading source")
            .items(&modes)
            .default(0)
            .interact()
            .map_err(|e| IrrigatorError::Config(format!("Input error: {}", e)))?;
        let mode = SensorMode::ALL[mode_index];

        println!();

        // --- Relay ---
        println!("Pump relay");
        let pin: u8 = Input::new()
            .with_prompt("  Relay pin")
            .default(defaults.relay.pin)
            .interact_text()
            .map_err(|e| IrrigatorError::Config(format!("Input error: {}", e)))?;

        let active_low = Confirm::new()
            .with_prompt("  Relay is active-low?")
            .default(false)
            .interact()
            .map_err(|e| IrrigatorError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            controller: ControllerConfig {
                interval_ms,
                max_cycles: None,
            },
            sensors: SensorConfig {
                mode,
                ..defaults.sensors
            },
            relay: RelayConfig {
                pin,
                indicator_pin: Some(pin),
                active_low,
                indicator_active_low: active_low,
            },
        };
        config.validate()?;

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| IrrigatorError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Irrigation controller configuration\n# Generated by `irrigator init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_firmware() {
        let config = Config::default();
        assert_eq!(config.controller.interval_ms, 3000);
        assert_eq!(config.controller.max_cycles, None);
        assert_eq!(config.sensors.mode, SensorMode::Demo);
        assert_eq!(config.relay.pin, 2);
        assert_eq!(config.relay.indicator_pin, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let yaml = "\
controller:
  max_cycles: 6
sensors:
  mode: fixed
  fixed:
    phosphorus_present: true
    potassium_present: false
    ph: 6.5
    moisture_percent: 20.0
relay:
  pin: 33
  active_low: true
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.controller.interval_ms, 3000);
        assert_eq!(config.controller.max_cycles, Some(6));
        assert_eq!(config.sensors.mode, SensorMode::Fixed);
        assert_eq!(
            config.sensors.fixed.to_reading(),
            Reading::new(true, false, 6.5, 20.0)
        );
        assert_eq!(config.sensors.analog, AnalogConfig::default());
        assert_eq!(config.relay.pin, 33);
        assert_eq!(config.relay.indicator_pin, None);
        assert!(config.relay.active_low);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Config::from_yaml("controller:\n  interval_ms: 0\n").is_err());
        assert!(Config::from_yaml("controller:\n  max_cycles: 0\n").is_err());
        assert!(Config::from_yaml("sensors:\n  mode: sideways\n").is_err());
    }

    #[test]
    fn rejects_analog_counts_above_adc_range() {
        let err = Config::from_yaml("sensors:\n  mode: demo\n  analog:\n    ph_raw: 5000\n")
            .unwrap_err();
        assert!(matches!(err, IrrigatorError::Config(ref msg) if msg.contains("ph_raw")));

        let err = Config::from_yaml("sensors:\n  analog:\n    moisture_raw: 4096\n").unwrap_err();
        assert!(matches!(err, IrrigatorError::Config(ref msg) if msg.contains("moisture_raw")));

        let config = Config::from_yaml("sensors:\n  analog:\n    ph_raw: 4095\n").unwrap();
        assert_eq!(config.sensors.analog.ph_raw, 4095);
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("IRRIGATOR_TEST_INTERVAL", "1500");
        let config =
            Config::from_yaml("controller:\n  interval_ms: ${IRRIGATOR_TEST_INTERVAL}\n").unwrap();
        assert_eq!(config.controller.interval_ms, 1500);
    }

    #[test]
    fn unknown_variables_left_in_place() {
        let out = Config::substitute_env_vars("pin: ${IRRIGATOR_TEST_UNSET_VARIABLE}");
        assert_eq!(out, "pin: ${IRRIGATOR_TEST_UNSET_VARIABLE}");
    }

    #[test]
    fn missing_explicit_path_is_error() {
        let result = Config::load(Some(PathBuf::from("/nonexistent/irrigator.yaml")));
        assert!(matches!(result, Err(IrrigatorError::Config(_))));
    }

    #[test]
    fn example_config_parses_to_defaults() {
        let config = Config::from_yaml(include_str!("../config/config.yaml.example")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn sensor_mode_names() {
        let names: Vec<_> = SensorMode::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["demo", "fixed", "analog"]);
    }
}

//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_pulse::load_config;
///
/// let config = load_config("pulse.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Polarity;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.z]
name = "Z Axis"
pulses_per_unit = 800.0

[motors.r]
name = "R Axis"
pulses_per_unit = 71.1
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motors.z.name.as_str(), "Z Axis");
        // Omitted [dda] table falls back to defaults
        assert_eq!(config.dda.frequency_hz, 50_000);
        assert_eq!(config.motors.r.polarity, Polarity::Normal);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[dda]
frequency_hz = 100000
substeps = 8
accumulator_reset_factor = 4
min_segment_us = 1.0
step_pulse_ns = 2000

[motors.z]
name = "Z Axis"
pulses_per_unit = 800.0
polarity = "reversed"

[motors.r]
name = "R Axis"
pulses_per_unit = 71.1
inhibited = true
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.dda.frequency_hz, 100_000);
        assert_eq!(config.dda.substeps, 8);
        assert_eq!(config.motors.z.polarity, Polarity::Reversed);
        assert!(config.motors.r.inhibited);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let toml = r#"
[dda]
frequency_hz = 0

[motors.z]
name = "Z Axis"
pulses_per_unit = 800.0

[motors.r]
name = "R Axis"
pulses_per_unit = 71.1
"#;

        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_missing_motor_rejected() {
        let toml = r#"
[motors.z]
name = "Z Axis"
pulses_per_unit = 800.0
"#;

        assert!(parse_config(toml).is_err());
    }
}

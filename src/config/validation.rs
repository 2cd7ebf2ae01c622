//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - DDA frequency, substep factor, and reset factor are in range
/// - Minimum segment duration is positive
/// - Each motor's pulses-per-unit scale is positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.dda.frequency_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidFrequency(
            config.dda.frequency_hz,
        )));
    }

    if config.dda.substeps == 0 {
        return Err(Error::Config(ConfigError::InvalidSubsteps(
            config.dda.substeps,
        )));
    }

    if config.dda.accumulator_reset_factor == 0 {
        return Err(Error::Config(ConfigError::InvalidResetFactor(
            config.dda.accumulator_reset_factor,
        )));
    }

    if !config.dda.min_segment_us.is_finite() || config.dda.min_segment_us <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMinSegment(
            config.dda.min_segment_us,
        )));
    }

    for (_, motor) in config.motors() {
        validate_motor(motor)?;
    }

    Ok(())
}

fn validate_motor(config: &MotorConfig) -> Result<()> {
    // The raw scale must be positive even for inhibited axes: inhibiting is a
    // runtime mode, not an excuse for a nonsense configuration.
    if !config.pulses_per_unit.is_finite() || config.pulses_per_unit <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidPulsesPerUnit {
            motor: config.name.clone(),
            value: config.pulses_per_unit,
        }));
    }

    Ok(())
}

//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::axis::Polarity;

/// Per-motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Length-unit-to-step scale for the axis this motor drives.
    pub pulses_per_unit: f32,

    /// Wiring polarity, XORed with the commanded direction during prep.
    #[serde(default)]
    pub polarity: Polarity,

    /// Inhibited axes contribute zero joint displacement in the kinematics
    /// mapper; the motor still participates in the pipeline.
    #[serde(default)]
    pub inhibited: bool,
}

impl MotorConfig {
    /// Steps produced by one length unit of travel on this motor's axis,
    /// zero when the axis is inhibited.
    #[inline]
    pub fn effective_pulses_per_unit(&self) -> f32 {
        if self.inhibited {
            0.0
        } else {
            self.pulses_per_unit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inhibited_scale() {
        let config = MotorConfig {
            name: String::try_from("z").unwrap(),
            pulses_per_unit: 800.0,
            polarity: Polarity::Normal,
            inhibited: true,
        };
        assert!((config.effective_pulses_per_unit()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_active_scale() {
        let config = MotorConfig {
            name: String::try_from("r").unwrap(),
            pulses_per_unit: 71.1,
            polarity: Polarity::Reversed,
            inhibited: false,
        };
        assert!((config.effective_pulses_per_unit() - 71.1).abs() < f32::EPSILON);
    }
}

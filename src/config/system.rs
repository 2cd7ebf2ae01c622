//! System configuration - root configuration structure.

use serde::Deserialize;

use crate::axis::Axis;

use super::motor::MotorConfig;
use super::timing::DdaConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemConfig {
    /// DDA timing parameters.
    #[serde(default)]
    pub dda: DdaConfig,

    /// The two motor configurations.
    pub motors: MotorsConfig,
}

/// The fixed pair of motors on this machine.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorsConfig {
    /// Z (vertical) motor.
    pub z: MotorConfig,

    /// R (rotary) motor.
    pub r: MotorConfig,
}

impl SystemConfig {
    /// Get the motor configuration for an axis.
    #[inline]
    pub fn motor(&self, axis: Axis) -> &MotorConfig {
        match axis {
            Axis::Z => &self.motors.z,
            Axis::R => &self.motors.r,
        }
    }

    /// Iterate motor configurations in axis order.
    pub fn motors(&self) -> impl Iterator<Item = (Axis, &MotorConfig)> {
        Axis::ALL.iter().map(move |&axis| (axis, self.motor(axis)))
    }
}

//! Kinematics mapper: joint travel in length units to signed motor steps.
//!
//! This machine is Cartesian, so the axis-to-joint transform is the identity
//! and the mapper reduces to per-motor scaling. Step counts are returned as
//! floats on purpose: the DDA works with fractional steps for smoothness, and
//! conversion to integer phase increments happens only inside the preparer.

use crate::axis::{Axis, AXIS_COUNT, MOTOR_COUNT};
use crate::config::SystemConfig;

/// Pure travel-to-steps transform for the two-motor machine.
///
/// Holds only configuration-derived scale factors; mapping retains no state
/// between calls. The segment duration is not consumed here; it travels to
/// the preparer beside the step counts.
#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    /// Per-motor length-unit-to-step scale (zero for inhibited axes).
    pulses_per_unit: [f32; MOTOR_COUNT],
}

impl Kinematics {
    /// Build the mapper from a system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        let mut pulses_per_unit = [0.0; MOTOR_COUNT];
        for (axis, motor) in config.motors() {
            pulses_per_unit[axis.index()] = motor.effective_pulses_per_unit();
        }
        Self { pulses_per_unit }
    }

    /// Build the mapper from raw per-motor scales.
    #[inline]
    pub const fn new(pulses_per_unit: [f32; MOTOR_COUNT]) -> Self {
        Self { pulses_per_unit }
    }

    /// Map joint travel to signed fractional step counts per motor.
    ///
    /// Axes map one-to-one onto motors; an inhibited axis produces zero
    /// steps regardless of travel.
    #[inline]
    pub fn travel_to_steps(&self, travel: [f32; AXIS_COUNT]) -> [f32; MOTOR_COUNT] {
        let mut steps = [0.0; MOTOR_COUNT];
        for axis in Axis::ALL {
            let i = axis.index();
            steps[i] = travel[i] * self.pulses_per_unit[i];
        }
        steps
    }

    /// The scale factor applied on one motor.
    #[inline]
    pub fn pulses_per_unit(&self, axis: Axis) -> f32 {
        self.pulses_per_unit[axis.index()]
    }
}

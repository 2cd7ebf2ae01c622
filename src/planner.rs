//! Planner interface: the upstream source of motion segments.
//!
//! The planner owns velocity profiling and junction handling; by the time a
//! move reaches this crate it is a short constant-velocity segment. The exec
//! interrupt pulls one move at a time and runs the preparer on it, so the
//! planner never needs a handle back into the core.

use crate::axis::{Direction, MOTOR_COUNT};
use crate::config::units::Microseconds;

/// One constant-velocity line segment from the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineCommand {
    /// Unsigned fractional step counts per motor.
    pub steps: [f32; MOTOR_COUNT],

    /// Commanded direction per motor (before polarity).
    pub directions: [Direction; MOTOR_COUNT],

    /// Segment duration.
    pub microseconds: Microseconds,
}

impl LineCommand {
    /// Build a command from signed step counts, splitting out directions.
    pub fn from_signed_steps(steps: [f32; MOTOR_COUNT], microseconds: Microseconds) -> Self {
        let mut magnitudes = [0.0; MOTOR_COUNT];
        let mut directions = [Direction::Forward; MOTOR_COUNT];
        for (i, &s) in steps.iter().enumerate() {
            magnitudes[i] = libm::fabsf(s);
            directions[i] = Direction::from_steps(s);
        }
        Self {
            steps: magnitudes,
            directions,
            microseconds,
        }
    }
}

/// A move pulled from the planner by the exec interrupt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlannedMove {
    /// An ordinary stepping segment.
    Line(LineCommand),

    /// A no-op placeholder (M-codes, dwells) that keeps the pipeline cadence.
    Null,
}

/// Upstream segment source polled from the exec interrupt.
///
/// Returning `None` means the planner has nothing ready; the pipeline then
/// drains and reports motion complete once the running segment finishes.
pub trait MoveSource {
    /// Pull the next move, if one is ready.
    fn next_move(&mut self) -> Option<PlannedMove>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_steps() {
        let cmd = LineCommand::from_signed_steps([300.0, -200.5], Microseconds(5_000.0));
        assert!((cmd.steps[0] - 300.0).abs() < f32::EPSILON);
        assert!((cmd.steps[1] - 200.5).abs() < f32::EPSILON);
        assert_eq!(cmd.directions[0], Direction::Forward);
        assert_eq!(cmd.directions[1], Direction::Reverse);
    }
}

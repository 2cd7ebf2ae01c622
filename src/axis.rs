//! Axis, direction, and polarity types for the two-motor machine.
//!
//! The machine has a Z (vertical) and an R (rotary) motor, mapped one-to-one
//! onto the Z and R axes. The hot tick path is unrolled over these two, so
//! the motor count is a fixed constant rather than a generic parameter.

/// Number of controlled axes.
pub const AXIS_COUNT: usize = 2;

/// Number of motors. Axes map one-to-one onto motors on this machine.
pub const MOTOR_COUNT: usize = 2;

/// Motor/axis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Vertical axis.
    Z = 0,
    /// Rotary axis.
    R = 1,
}

impl Axis {
    /// Both axes, in motor order.
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Z, Axis::R];

    /// Index into per-motor arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Commanded travel direction for one motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Forward travel (direction pin low).
    #[default]
    Forward,
    /// Reverse travel (direction pin high).
    Reverse,
}

impl Direction {
    /// Get direction from a signed step count.
    #[inline]
    pub fn from_steps(steps: f32) -> Self {
        if steps >= 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Motor wiring polarity.
///
/// A reversed motor swaps the meaning of the direction pin; the preparer
/// folds this into the commanded direction so the loader and tick handler
/// never see polarity at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Direction pin matches the commanded direction.
    #[default]
    Normal,
    /// Direction pin is inverted relative to the commanded direction.
    Reversed,
}

impl Polarity {
    /// Apply this polarity to a commanded direction.
    #[inline]
    pub const fn apply(self, direction: Direction) -> Direction {
        match self {
            Polarity::Normal => direction,
            Polarity::Reversed => direction.reversed(),
        }
    }
}

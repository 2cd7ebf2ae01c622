//! Unit types for time quantities.
//!
//! Provides type-safe representations of segment durations and DDA tick
//! counts to prevent unit confusion at compile time. Step counts stay plain
//! `f32` values: they are fractional on purpose, and truncation to integer
//! phase increments happens only inside the preparer.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Segment duration in microseconds.
///
/// Used for the preparer's public API and configuration. Converted to
/// [`Ticks`] during segment preparation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Microseconds(pub f32);

impl Microseconds {
    /// Create a new Microseconds value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whether the duration is a finite number.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Convert to seconds.
    #[inline]
    pub fn to_seconds(self) -> f32 {
        self.0 / 1_000_000.0
    }
}

impl Add for Microseconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Microseconds {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<f32> for Microseconds {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// A count of DDA timer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticks(pub u32);

impl Ticks {
    /// Create a new Ticks value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Convert a segment duration to DDA ticks, rounded to nearest.
    #[inline]
    pub fn from_duration(duration: Microseconds, frequency_hz: f32) -> Self {
        Self(libm::roundf(duration.to_seconds() * frequency_hz) as u32)
    }

    /// Convert back to a duration at the given tick frequency.
    #[inline]
    pub fn to_duration(self, frequency_hz: f32) -> Microseconds {
        Microseconds(self.0 as f32 / frequency_hz * 1_000_000.0)
    }
}

//! Error types for the stepper-pulse library.
//!
//! Provides unified error handling across configuration, segment preparation,
//! and memory-integrity checks.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-pulse operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Segment preparation error
    Prep(PrepError),
    /// Memory integrity fault
    Fault(FaultError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required builder field was not supplied
    MissingField(heapless::String<32>),
    /// Invalid DDA tick frequency (must be > 0)
    InvalidFrequency(u32),
    /// Invalid substep scaling factor (must be >= 1)
    InvalidSubsteps(u32),
    /// Invalid accumulator reset factor (must be >= 1)
    InvalidResetFactor(u32),
    /// Invalid minimum segment duration (must be > 0)
    InvalidMinSegment(f32),
    /// Invalid pulses-per-unit scale (must be > 0)
    InvalidPulsesPerUnit {
        /// Motor the scale was configured for
        motor: heapless::String<32>,
        /// The rejected value
        value: f32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Segment preparation errors.
///
/// All of these are recoverable: the planner may retry with the next segment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrepError {
    /// The prep buffer is owned by the loader; preparing now would tear the
    /// segment being loaded. Indicates an upstream scheduling bug.
    BufferNotReady,
    /// Segment duration is not a finite number
    SegmentNotFinite,
    /// Segment duration is below the configured minimum
    SegmentTooShort {
        /// Requested duration in microseconds
        microseconds: f32,
        /// Minimum accepted duration in microseconds
        minimum: f32,
    },
}

/// Memory integrity faults detected by sentinel verification.
///
/// Recovery from any of these is a full re-init of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultError {
    /// The runtime struct's sentinel word was overwritten
    RuntimeCorrupted {
        /// The sentinel value observed
        observed: u16,
    },
    /// The prep buffer's sentinel word was overwritten
    PrepCorrupted {
        /// The sentinel value observed
        observed: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Prep(e) => write!(f, "Prep error: {}", e),
            Error::Fault(e) => write!(f, "Integrity fault: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            ConfigError::InvalidFrequency(v) => {
                write!(f, "Invalid DDA frequency: {} Hz. Must be > 0", v)
            }
            ConfigError::InvalidSubsteps(v) => {
                write!(f, "Invalid substep factor: {}. Must be >= 1", v)
            }
            ConfigError::InvalidResetFactor(v) => {
                write!(f, "Invalid accumulator reset factor: {}. Must be >= 1", v)
            }
            ConfigError::InvalidMinSegment(v) => {
                write!(f, "Invalid minimum segment duration: {} us. Must be > 0", v)
            }
            ConfigError::InvalidPulsesPerUnit { motor, value } => {
                write!(f, "Motor '{}': invalid pulses per unit: {}. Must be > 0", motor, value)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepError::BufferNotReady => write!(f, "Prep buffer is owned by the loader"),
            PrepError::SegmentNotFinite => write!(f, "Segment duration is not finite"),
            PrepError::SegmentTooShort { microseconds, minimum } => {
                write!(f, "Segment of {} us below minimum {} us", microseconds, minimum)
            }
        }
    }
}

impl fmt::Display for FaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultError::RuntimeCorrupted { observed } => {
                write!(f, "Runtime sentinel overwritten (read {:#06x})", observed)
            }
            FaultError::PrepCorrupted { observed } => {
                write!(f, "Prep sentinel overwritten (read {:#06x})", observed)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PrepError> for Error {
    fn from(e: PrepError) -> Self {
        Error::Prep(e)
    }
}

impl From<FaultError> for Error {
    fn from(e: FaultError) -> Self {
        Error::Fault(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PrepError {}

#[cfg(feature = "std")]
impl std::error::Error for FaultError {}

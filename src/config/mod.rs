//! Configuration module for stepper-pulse.
//!
//! Provides types for loading and validating DDA timing and motor
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod system;
mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::{MotorsConfig, SystemConfig};
pub use timing::{DdaConfig, DdaTiming};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microseconds, Ticks};

//! # stepper-pulse
//!
//! Two-axis DDA step-pulse generation core with embedded-hal 1.0 support.
//!
//! This crate implements the hard real-time tail of a motion pipeline for a
//! Z/R two-axis machine: it accepts prepared motion segments (signed
//! fractional step counts plus a duration in microseconds) and emits hardware
//! step pulses with a digital differential analyzer, driven from three
//! interrupt priorities:
//!
//! - a high-priority DDA tick that toggles the step pins,
//! - a medium-priority load interrupt that transfers a prepared segment into
//!   the running state and arms the DDA timer,
//! - a medium-priority exec interrupt that pulls the next segment from the
//!   upstream planner and prepares it.
//!
//! The prep buffer is handed between the exec and load sides through a
//! single-producer/single-consumer ownership flag, so no segment is ever
//! torn, lost, or loaded twice.
//!
//! ## Features
//!
//! - **Configuration-driven**: DDA timing and motor parameters in TOML files
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR, `DelayNs` for the
//!   step-pulse width hold
//! - **no_std compatible**: Core library works without the standard library
//! - **Interrupt-safe hand-off**: release/acquire ownership flag between the
//!   preparer and the loader
//! - **Seamless chaining**: DDA accumulators carry across segment boundaries
//!   so step totals stay exact over a whole move
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_pulse::{CoreBuilder, MotorChannel, Timers};
//!
//! // Load configuration from TOML
//! let config = stepper_pulse::load_config("pulse.toml")?;
//!
//! // Create the core with embedded-hal pins and board timers
//! let mut core = CoreBuilder::new()
//!     .z_channel(MotorChannel::new(z_step, z_dir, z_polarity))
//!     .r_channel(MotorChannel::new(r_step, r_dir, r_polarity))
//!     .timers(Timers::new(dda_timer, load_timer, exec_timer))
//!     .delay(delay)
//!     .from_config(&config)
//!     .build()?;
//!
//! // Wire the three interrupt handlers to the core, then kick the pipeline:
//! core.request_exec_move();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod hw;
pub mod kinematics;
pub mod pipeline;
pub mod planner;

// Re-exports for ergonomic API
pub use axis::{Axis, Direction, Polarity, AXIS_COUNT, MOTOR_COUNT};
pub use config::{validate_config, DdaConfig, DdaTiming, MotorConfig, SystemConfig};
pub use error::{ConfigError, Error, FaultError, PrepError, Result};
pub use hw::{IntervalTimer, MotorChannel, Timers};
pub use kinematics::Kinematics;
pub use pipeline::{CoreBuilder, PrepOwner, StepperCore};
pub use planner::{LineCommand, MoveSource, PlannedMove};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Microseconds, Ticks};

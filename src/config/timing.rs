//! DDA timing configuration from TOML and the derived runtime view.

use serde::Deserialize;

/// DDA timing configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DdaConfig {
    /// DDA tick frequency in Hz.
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,

    /// Fractional-step scaling factor applied during preparation. Raises the
    /// accumulator resolution without changing the physical step rate.
    #[serde(default = "default_substeps")]
    pub substeps: u32,

    /// Anti-stall threshold: if the new segment's tick count times this
    /// factor is still below the previous segment's tick count, the loader
    /// reinitializes the phase accumulators.
    #[serde(default = "default_reset_factor")]
    pub accumulator_reset_factor: u32,

    /// Minimum accepted segment duration in microseconds.
    #[serde(default = "default_min_segment_us")]
    pub min_segment_us: f32,

    /// Step pulse width hold in nanoseconds. Drivers typically need ~1 us;
    /// on fast cores the tick handler body alone is not wide enough.
    #[serde(default = "default_step_pulse_ns")]
    pub step_pulse_ns: u32,
}

fn default_frequency_hz() -> u32 {
    50_000
}

fn default_substeps() -> u32 {
    1
}

fn default_reset_factor() -> u32 {
    2
}

fn default_min_segment_us() -> f32 {
    0.01
}

fn default_step_pulse_ns() -> u32 {
    1_000
}

impl Default for DdaConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency_hz(),
            substeps: default_substeps(),
            accumulator_reset_factor: default_reset_factor(),
            min_segment_us: default_min_segment_us(),
            step_pulse_ns: default_step_pulse_ns(),
        }
    }
}

/// Derived timing parameters used by the preparer and tick handler.
///
/// Precomputed from [`DdaConfig`] once so the segment-preparation path does
/// no integer-to-float conversions of its own.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DdaTiming {
    /// DDA tick frequency as a float, for tick conversion.
    pub frequency_hz: f32,

    /// Substep factor as a float, for phase-increment scaling.
    pub substeps: f32,

    /// Substep factor as an integer, for tick scaling.
    pub substeps_int: u32,

    /// Anti-stall reset threshold ratio.
    pub accumulator_reset_factor: u32,

    /// Minimum accepted segment duration in microseconds.
    pub min_segment_us: f32,

    /// Step pulse width hold in nanoseconds.
    pub step_pulse_ns: u32,
}

impl DdaTiming {
    /// Derive runtime timing from a configuration.
    pub fn from_config(config: &DdaConfig) -> Self {
        Self {
            frequency_hz: config.frequency_hz as f32,
            substeps: config.substeps as f32,
            substeps_int: config.substeps,
            accumulator_reset_factor: config.accumulator_reset_factor,
            min_segment_us: config.min_segment_us,
            step_pulse_ns: config.step_pulse_ns,
        }
    }
}

impl Default for DdaTiming {
    fn default() -> Self {
        Self::from_config(&DdaConfig::default())
    }
}

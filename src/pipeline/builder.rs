//! Builder pattern for StepperCore.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Axis, Polarity};
use crate::config::{DdaTiming, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::hw::{IntervalTimer, MotorChannel, Timers};

use super::StepperCore;

/// Builder for creating [`StepperCore`] instances.
pub struct CoreBuilder<ZS, ZD, RS, RD, TD, TL, TE, DELAY>
where
    ZS: OutputPin,
    ZD: OutputPin,
    RS: OutputPin,
    RD: OutputPin,
    TD: IntervalTimer,
    TL: IntervalTimer,
    TE: IntervalTimer,
    DELAY: DelayNs,
{
    z: Option<MotorChannel<ZS, ZD>>,
    r: Option<MotorChannel<RS, RD>>,
    timers: Option<Timers<TD, TL, TE>>,
    delay: Option<DELAY>,
    timing: DdaTiming,
    polarity_override: Option<[Polarity; 2]>,
}

impl<ZS, ZD, RS, RD, TD, TL, TE, DELAY> Default for CoreBuilder<ZS, ZD, RS, RD, TD, TL, TE, DELAY>
where
    ZS: OutputPin,
    ZD: OutputPin,
    RS: OutputPin,
    RD: OutputPin,
    TD: IntervalTimer,
    TL: IntervalTimer,
    TE: IntervalTimer,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<ZS, ZD, RS, RD, TD, TL, TE, DELAY> CoreBuilder<ZS, ZD, RS, RD, TD, TL, TE, DELAY>
where
    ZS: OutputPin,
    ZD: OutputPin,
    RS: OutputPin,
    RD: OutputPin,
    TD: IntervalTimer,
    TL: IntervalTimer,
    TE: IntervalTimer,
    DELAY: DelayNs,
{
    /// Create a new builder with default DDA timing.
    pub fn new() -> Self {
        Self {
            z: None,
            r: None,
            timers: None,
            delay: None,
            timing: DdaTiming::default(),
            polarity_override: None,
        }
    }

    /// Set the Z motor channel.
    pub fn z_channel(mut self, channel: MotorChannel<ZS, ZD>) -> Self {
        self.z = Some(channel);
        self
    }

    /// Set the R motor channel.
    pub fn r_channel(mut self, channel: MotorChannel<RS, RD>) -> Self {
        self.r = Some(channel);
        self
    }

    /// Set the pipeline timers.
    pub fn timers(mut self, timers: Timers<TD, TL, TE>) -> Self {
        self.timers = Some(timers);
        self
    }

    /// Set the delay provider used for the step-pulse width hold.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the DDA timing parameters directly.
    pub fn timing(mut self, timing: DdaTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Configure timing and motor polarities from a system configuration.
    ///
    /// Polarities from the configuration replace whatever the channels were
    /// constructed with.
    pub fn from_config(mut self, config: &SystemConfig) -> Self {
        self.timing = DdaTiming::from_config(&config.dda);
        self.polarity_override = Some([
            config.motor(Axis::Z).polarity,
            config.motor(Axis::R).polarity,
        ]);
        self
    }

    /// Build the StepperCore.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StepperCore<ZS, ZD, RS, RD, TD, TL, TE, DELAY>> {
        let mut z = self.z.ok_or_else(|| missing("z_channel"))?;
        let mut r = self.r.ok_or_else(|| missing("r_channel"))?;
        let timers = self.timers.ok_or_else(|| missing("timers"))?;
        let delay = self.delay.ok_or_else(|| missing("delay"))?;

        if let Some([z_polarity, r_polarity]) = self.polarity_override {
            z.polarity = z_polarity;
            r.polarity = r_polarity;
        }

        Ok(StepperCore::new(z, r, timers, delay, self.timing))
    }
}

fn missing(field: &str) -> Error {
    Error::Config(ConfigError::MissingField(
        heapless::String::try_from(field).unwrap_or_default(),
    ))
}

//! Hardware abstractions: interval timers and motor pin channels.
//!
//! Pins are plain embedded-hal 1.0 `OutputPin`s. Timers are abstracted just
//! far enough for the pipeline: the DDA timer is a periodic compare-match
//! timer, and the load/exec timers are one-shot software-interrupt sources
//! that the core enables to request work at medium priority.

use embedded_hal::digital::OutputPin;

use crate::axis::Polarity;

/// An interval timer with a compare-match interrupt.
///
/// Implementations map these onto the target's timer registers. `rearm`
/// must clear both the counter and any pending compare flag; some timers
/// will not restart cleanly otherwise.
pub trait IntervalTimer {
    /// Start the timer (enable its clock source / interrupt).
    fn enable(&mut self);

    /// Stop the timer.
    fn disable(&mut self);

    /// Clear the counter and any pending compare-match flag.
    fn rearm(&mut self);
}

/// The three timers the pipeline runs on.
#[derive(Debug)]
pub struct Timers<DDA, LOAD, EXEC>
where
    DDA: IntervalTimer,
    LOAD: IntervalTimer,
    EXEC: IntervalTimer,
{
    /// High-priority periodic DDA tick timer.
    pub dda: DDA,

    /// Medium-priority load software-interrupt timer.
    pub load: LOAD,

    /// Medium-priority exec software-interrupt timer.
    pub exec: EXEC,
}

impl<DDA, LOAD, EXEC> Timers<DDA, LOAD, EXEC>
where
    DDA: IntervalTimer,
    LOAD: IntervalTimer,
    EXEC: IntervalTimer,
{
    /// Bundle the three timers.
    pub fn new(dda: DDA, load: LOAD, exec: EXEC) -> Self {
        Self { dda, load, exec }
    }
}

/// STEP/DIR pin pair for one motor, with its configured wiring polarity.
#[derive(Debug)]
pub struct MotorChannel<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (rising edge triggers the driver).
    pub(crate) step: STEP,

    /// DIR pin (low = forward, high = reverse, after polarity).
    pub(crate) dir: DIR,

    /// Wiring polarity folded into the commanded direction during prep.
    pub(crate) polarity: Polarity,
}

impl<STEP, DIR> MotorChannel<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a channel from its pins and polarity.
    pub fn new(step: STEP, dir: DIR, polarity: Polarity) -> Self {
        Self { step, dir, polarity }
    }

    /// The configured polarity.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Release the pins.
    pub fn free(self) -> (STEP, DIR) {
        (self.step, self.dir)
    }
}

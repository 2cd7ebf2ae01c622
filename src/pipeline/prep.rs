//! Segment preparation: the staging buffer and the prep operations.
//!
//! The prep buffer has exactly one owner at a time. The preparer fills it
//! while it is exec-owned, then publishes it to the loader with a release
//! store; the loader consumes it under an acquire load and hands it back.
//! The ownership flag is the only field read across priority levels, so the
//! release/acquire pair is all the synchronization the hand-off needs.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Direction, MOTOR_COUNT};
use crate::config::units::{Microseconds, Ticks};
use crate::error::{Error, PrepError, Result};
use crate::hw::IntervalTimer;

use super::{StepperCore, MAGIC_WORD};

/// Which side currently owns the prep buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrepOwner {
    /// The preparer may write; the loader must stay out.
    Exec,
    /// A prepared segment is ready; the loader may consume it.
    Loader,
}

/// Single-producer/single-consumer ownership flag.
///
/// A relaxed flag with release/acquire ordering is sufficient on a
/// uniprocessor target; the orderings also publish the non-atomic buffer
/// fields written before the hand-off.
#[derive(Debug)]
pub(crate) struct BufferOwner(AtomicU8);

impl BufferOwner {
    const EXEC: u8 = 0;
    const LOADER: u8 = 1;

    pub fn new() -> Self {
        Self(AtomicU8::new(Self::EXEC))
    }

    #[inline]
    pub fn get(&self) -> PrepOwner {
        if self.0.load(Ordering::Acquire) == Self::EXEC {
            PrepOwner::Exec
        } else {
            PrepOwner::Loader
        }
    }

    #[inline]
    pub fn is_exec(&self) -> bool {
        self.get() == PrepOwner::Exec
    }

    #[inline]
    pub fn is_loader(&self) -> bool {
        self.get() == PrepOwner::Loader
    }

    #[inline]
    pub fn hand_to_loader(&self) {
        self.0.store(Self::LOADER, Ordering::Release);
    }

    #[inline]
    pub fn hand_to_exec(&self) {
        self.0.store(Self::EXEC, Ordering::Release);
    }
}

/// Per-motor prepared parameters.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PrepMotor {
    /// `round(|steps| x substeps)`.
    pub phase_increment: u32,

    /// Direction after folding in the wiring polarity.
    pub dir: Direction,
}

/// A fully prepared stepping segment, ready for the loader.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrepSegment {
    /// Segment length in DDA ticks.
    pub dda_ticks: u32,

    /// `dda_ticks x substeps`, the per-step accumulator subtraction.
    pub dda_ticks_x_substeps: u32,

    /// True when the previous segment ran much faster than this one and the
    /// accumulators must be reinitialized instead of carrying residuals.
    pub reset_accumulators: bool,

    /// Per-motor parameters.
    pub motors: [PrepMotor; MOTOR_COUNT],
}

/// What the preparer has staged for the loader.
///
/// `Empty` means nothing was prepared (fresh buffer, or a rejected segment
/// was dropped); the loader treats it like `Null` and just keeps the
/// pipeline cadence going.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum PrepMove {
    /// Nothing staged.
    #[default]
    Empty,
    /// An ordinary stepping segment.
    Line(PrepSegment),
    /// A deliberate no-op (M-codes, dwell placeholders).
    Null,
}

/// The staging buffer shared between the exec and load sides.
#[derive(Debug)]
pub(crate) struct PrepBuffer {
    /// Memory-integrity sentinel.
    pub magic: u16,

    /// Hand-off flag; the arbiter of who may touch the rest of the struct.
    pub owner: BufferOwner,

    /// Tick count of the previous segment, for the anti-stall heuristic.
    /// Never cleared, so the first segment compares against zero and the
    /// heuristic cannot fire on it.
    pub prev_ticks: u32,

    /// The staged move.
    pub pending: PrepMove,
}

impl PrepBuffer {
    pub fn new() -> Self {
        Self {
            magic: MAGIC_WORD,
            owner: BufferOwner::new(),
            prev_ticks: 0,
            pending: PrepMove::Empty,
        }
    }
}

impl<ZS, ZD, RS, RD, TD, TL, TE, DELAY> StepperCore<ZS, ZD, RS, RD, TD, TL, TE, DELAY>
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
    /// Prepare the next stepping segment for the loader.
    ///
    /// Does the DDA math on one planner segment so the load itself can be as
    /// fast as possible. Works in joint space (motors) and in steps, not
    /// length units. `steps` are signed fractional step counts; the sign is
    /// ignored here; `directions` carries the commanded direction, which is
    /// XORed with each motor's wiring polarity.
    ///
    /// On success the buffer is published to the loader; follow up with
    /// [`request_load_move`](Self::request_load_move) (the exec interrupt
    /// does this itself).
    ///
    /// # Errors
    ///
    /// - [`PrepError::BufferNotReady`] if the loader still owns the buffer
    /// - [`PrepError::SegmentNotFinite`] for a NaN/infinite duration
    /// - [`PrepError::SegmentTooShort`] for a duration below the minimum
    ///
    /// All are recoverable; the buffer is untouched on error.
    pub fn prep_line(
        &mut self,
        steps: [f32; MOTOR_COUNT],
        directions: [Direction; MOTOR_COUNT],
        microseconds: Microseconds,
    ) -> Result<()> {
        // Trap conditions that would prevent staging the segment, before
        // touching any buffer state.
        if !self.prep.owner.is_exec() {
            return Err(Error::Prep(PrepError::BufferNotReady));
        }
        if !microseconds.is_finite() {
            return Err(Error::Prep(PrepError::SegmentNotFinite));
        }
        if microseconds.value() < self.timing.min_segment_us {
            return Err(Error::Prep(PrepError::SegmentTooShort {
                microseconds: microseconds.value(),
                minimum: self.timing.min_segment_us,
            }));
        }

        let dda_ticks = Ticks::from_duration(microseconds, self.timing.frequency_hz).value();
        let dda_ticks_x_substeps = dda_ticks.saturating_mul(self.timing.substeps_int);

        let polarity = [self.z.polarity, self.r.polarity];
        let mut motors = [PrepMotor::default(); MOTOR_COUNT];
        for (i, motor) in motors.iter_mut().enumerate() {
            let phase_increment =
                libm::roundf(libm::fabsf(steps[i]) * self.timing.substeps) as u32;
            // At most one step per tick per motor; segments that violate this
            // are a planner bug, not something the DDA can honor.
            debug_assert!(phase_increment <= dda_ticks_x_substeps);
            *motor = PrepMotor {
                phase_increment,
                dir: polarity[i].apply(directions[i]),
            };
        }

        // Anti-stall measure in case the velocity drop between segments is
        // too great: a stale accumulator would burst-fire the first pulses
        // of the slower segment.
        let reset_accumulators = dda_ticks
            .saturating_mul(self.timing.accumulator_reset_factor)
            < self.prep.prev_ticks;

        self.prep.prev_ticks = dda_ticks;
        self.prep.pending = PrepMove::Line(PrepSegment {
            dda_ticks,
            dda_ticks_x_substeps,
            reset_accumulators,
            motors,
        });
        self.prep.owner.hand_to_loader();
        Ok(())
    }

    /// Stage a no-op move. Keeps the loader fed across M-codes and other
    /// non-motion commands so the pipeline cadence stays intact.
    pub fn prep_null(&mut self) {
        self.prep.pending = PrepMove::Null;
        self.prep.owner.hand_to_loader();
    }
}

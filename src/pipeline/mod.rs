//! The triple-interrupt step-pulse pipeline.
//!
//! Four pieces of state cooperate here, each touched only from the priority
//! level that owns it:
//!
//! | state | owned by | runs at |
//! |---|---|---|
//! | planner queue | upstream planner | background / exec interrupt |
//! | prep buffer | preparer or loader, per the ownership flag | medium |
//! | runtime DDA state | loader (only while idle) and tick handler | high |
//! | step counters, motion flag | tick handler / loader write, host reads | all |
//!
//! Data flows planner → preparer → loader → tick handler → step pins.
//! Control flows backwards as demand: when a segment ends the tick handler
//! chains the loader; when the loader consumes the prep buffer it requests
//! an exec; the exec pulls the next planner move and prepares it.
//!
//! The host wires three interrupt handlers to [`StepperCore::on_dda_tick`],
//! [`StepperCore::on_load_interrupt`], and [`StepperCore::on_exec_interrupt`],
//! with the DDA tick at the highest priority and the two software interrupts
//! below it at a shared medium priority.

mod builder;
mod dda;
mod exec;
mod load;
mod prep;
mod runtime;

pub use builder::CoreBuilder;
pub use prep::PrepOwner;

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Axis, MOTOR_COUNT};
use crate::config::DdaTiming;
use crate::error::{Error, FaultError, Result};
use crate::hw::{IntervalTimer, MotorChannel, Timers};

use prep::PrepBuffer;
use runtime::RunState;

/// Sentinel word written into both shared structs at init; any reader
/// observing a different value reports memory corruption.
const MAGIC_WORD: u16 = 0x5AC3;

/// The two-axis step-pulse generation core.
///
/// Owns the motor pin channels, the three pipeline timers, and both the
/// staging and runtime DDA state. All interrupt entry points are methods;
/// the host is responsible for calling each from the matching interrupt and
/// for giving the DDA tick strictly higher priority than the other two.
pub struct StepperCore<ZS, ZD, RS, RD, TD, TL, TE, DELAY>
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
    /// Z motor pins.
    pub(crate) z: MotorChannel<ZS, ZD>,

    /// R motor pins.
    pub(crate) r: MotorChannel<RS, RD>,

    /// DDA, load, and exec timers.
    pub(crate) timers: Timers<TD, TL, TE>,

    /// Delay provider for the step-pulse width hold.
    pub(crate) delay: DELAY,

    /// Derived DDA timing parameters.
    pub(crate) timing: DdaTiming,

    /// Runtime DDA state (tick handler's).
    pub(crate) run: RunState,

    /// Staging buffer (preparer's or loader's, per its ownership flag).
    pub(crate) prep: PrepBuffer,

    /// Lifetime step pulses emitted per motor; written from the tick
    /// handler, read by foreground diagnostics.
    pub(crate) step_counts: [AtomicU32; MOTOR_COUNT],

    /// Set by the loader when the runtime is idle and no prepared segment is
    /// available; the host's only signal that the queue has drained.
    pub(crate) motion_complete: AtomicBool,
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
    /// Create a core in the idle state.
    ///
    /// Sentinels are written, the prep buffer starts exec-owned so the
    /// preparer may fill it immediately, and all accumulators start at zero.
    /// Interrupts must not be live until construction returns.
    pub fn new(
        z: MotorChannel<ZS, ZD>,
        r: MotorChannel<RS, RD>,
        timers: Timers<TD, TL, TE>,
        delay: DELAY,
        timing: DdaTiming,
    ) -> Self {
        Self {
            z,
            r,
            timers,
            delay,
            timing,
            run: RunState::new(),
            prep: PrepBuffer::new(),
            step_counts: [AtomicU32::new(0), AtomicU32::new(0)],
            motion_complete: AtomicBool::new(false),
        }
    }

    /// True while a segment is running (the tick down-counter is nonzero).
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.run.dda_ticks_downcount != 0
    }

    /// Which side currently owns the prep buffer.
    #[inline]
    pub fn prep_owner(&self) -> PrepOwner {
        self.prep.owner.get()
    }

    /// Lifetime step pulses emitted on one motor.
    #[inline]
    pub fn step_count(&self, axis: Axis) -> u32 {
        self.step_counts[axis.index()].load(Ordering::Relaxed)
    }

    /// Whether the pipeline has drained (idle runtime, nothing prepared).
    #[inline]
    pub fn motion_complete(&self) -> bool {
        self.motion_complete.load(Ordering::Acquire)
    }

    /// Read and clear the motion-complete flag.
    #[inline]
    pub fn take_motion_complete(&self) -> bool {
        self.motion_complete.swap(false, Ordering::AcqRel)
    }

    /// Current phase accumulator for one motor. Diagnostic only; the value
    /// is stale the moment the next tick runs.
    #[inline]
    pub fn dda_accumulator(&self, axis: Axis) -> i32 {
        self.run.motors[axis.index()].phase_accumulator
    }

    /// Stop motion immediately and discard any prepared segment.
    ///
    /// Disables the DDA timer, zeroes the tick down-counter so the loader
    /// gate and `is_busy` agree the machine is idle, and restores the prep
    /// buffer to the preparer. Accumulators keep their residuals, as at any
    /// segment boundary.
    pub fn halt(&mut self) {
        self.timers.dda.disable();
        self.run.dda_ticks_downcount = 0;
        self.prep.pending = prep::PrepMove::Empty;
        self.prep.owner.hand_to_exec();
    }

    /// Verify the sentinel words of both shared structs.
    ///
    /// Meant to be called periodically from the foreground; a mismatch means
    /// something scribbled over pipeline state and the only recovery is a
    /// full re-init.
    pub fn check_integrity(&self) -> Result<()> {
        if self.run.magic != MAGIC_WORD {
            return Err(Error::Fault(FaultError::RuntimeCorrupted {
                observed: self.run.magic,
            }));
        }
        if self.prep.magic != MAGIC_WORD {
            return Err(Error::Fault(FaultError::PrepCorrupted {
                observed: self.prep.magic,
            }));
        }
        Ok(())
    }

    /// Tear the core down and release the hardware.
    pub fn free(self) -> (MotorChannel<ZS, ZD>, MotorChannel<RS, RD>, Timers<TD, TL, TE>, DELAY) {
        (self.z, self.r, self.timers, self.delay)
    }
}

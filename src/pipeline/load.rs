//! Load side: transferring a prepared segment into the runtime state.

use core::sync::atomic::Ordering;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::{Axis, Direction};
use crate::hw::IntervalTimer;

use super::prep::{PrepMotor, PrepMove};
use super::runtime::RunMotor;
use super::StepperCore;

/// Program one motor's runtime state and direction pin from its prepared
/// parameters. Motors with zero steps skip the direction write entirely.
fn load_motor<DIR: OutputPin>(
    run: &mut RunMotor,
    prep: &PrepMotor,
    dir_pin: &mut DIR,
    downcount: i32,
    reset_accumulators: bool,
) {
    run.phase_increment = prep.phase_increment as i32;
    if reset_accumulators {
        // Compensate for out-of-range pulse phasing after a large
        // deceleration: restart the accumulator a full segment below zero.
        run.phase_accumulator = -downcount;
    }
    if run.phase_increment != 0 {
        // One pin write, settled before the first step pulse of the segment.
        // Pin errors cannot be surfaced from interrupt level.
        let _ = match prep.dir {
            Direction::Forward => dir_pin.set_low(),
            Direction::Reverse => dir_pin.set_high(),
        };
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
    /// Request that the loader run soon, via the load software interrupt.
    ///
    /// Idempotent; a no-op while a segment is still running, because the
    /// loader would find the runtime busy and refuse anyway. The tick
    /// handler chains it at segment end instead.
    pub fn request_load_move(&mut self) {
        if self.run.dda_ticks_downcount == 0 {
            self.timers.load.enable();
        }
    }

    /// Load software-interrupt entry point (medium priority).
    pub fn on_load_interrupt(&mut self) {
        self.timers.load.disable();
        self.load_move();
    }

    /// Dequeue the prepared segment and load it into the runtime state.
    ///
    /// Must only run from the load interrupt or from the tick handler at
    /// segment end, never while the DDA timer can fire. Both entry gates
    /// are silent no-op returns, as interrupt-level code reports nothing.
    pub(super) fn load_move(&mut self) {
        if self.run.dda_ticks_downcount != 0 {
            return; // still busy; retried when the running segment ends
        }
        if !self.prep.owner.is_loader() {
            // Nothing prepared: the queue has drained.
            self.motion_complete.store(true, Ordering::Release);
            return;
        }

        // Consuming the move leaves the buffer empty for the next prep.
        // A segment whose duration rounded to zero ticks has nothing to run
        // and falls through like a null; arming the timer for it would leave
        // a zero down-counter that never reaches end-of-segment.
        let seg = match core::mem::replace(&mut self.prep.pending, PrepMove::Empty) {
            PrepMove::Line(seg) if seg.dda_ticks > 0 => Some(seg),
            _ => None,
        };
        if let Some(seg) = seg {
            self.run.dda_ticks_downcount = seg.dda_ticks as i32;
            self.run.dda_ticks_x_substeps = seg.dda_ticks_x_substeps as i32;
            let downcount = self.run.dda_ticks_downcount;

            load_motor(
                &mut self.run.motors[Axis::Z.index()],
                &seg.motors[Axis::Z.index()],
                &mut self.z.dir,
                downcount,
                seg.reset_accumulators,
            );
            load_motor(
                &mut self.run.motors[Axis::R.index()],
                &seg.motors[Axis::R.index()],
                &mut self.r.dir,
                downcount,
                seg.reset_accumulators,
            );

            // The timer will not restart cleanly unless the counter and any
            // pending compare flag are cleared first; enable comes last so
            // the direction pins are settled before the first tick.
            self.timers.dda.rearm();
            self.timers.dda.enable();
        }
        // Null and empty moves drop straight through to the hand-back.

        self.prep.owner.hand_to_exec();
        self.request_exec_move();
    }
}

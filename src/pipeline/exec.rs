//! Exec side: pulling the next move from the planner.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::hw::IntervalTimer;
use crate::planner::{MoveSource, PlannedMove};

use super::StepperCore;

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
    /// Request that the preparer run soon, via the exec software interrupt.
    ///
    /// Idempotent; a no-op unless the prep buffer is exec-owned, because
    /// interrupting just to find the buffer busy would be wasted work.
    pub fn request_exec_move(&mut self) {
        if self.prep.owner.is_exec() {
            self.timers.exec.enable();
        }
    }

    /// Exec software-interrupt entry point (medium priority).
    ///
    /// Pulls one move from the planner and prepares it. A segment the
    /// preparer rejects is dropped and the empty buffer is handed over
    /// anyway: the loader's passthrough flips it straight back and requests
    /// the next exec, so one bad segment cannot stall the pipeline.
    pub fn on_exec_interrupt<P: MoveSource>(&mut self, planner: &mut P) {
        self.timers.exec.disable();
        if !self.prep.owner.is_exec() {
            return;
        }

        match planner.next_move() {
            None => {} // planner has nothing ready; the pipeline drains
            Some(PlannedMove::Line(cmd)) => {
                if let Err(_error) =
                    self.prep_line(cmd.steps, cmd.directions, cmd.microseconds)
                {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("dropping rejected segment: {}", _error);
                    self.prep.owner.hand_to_loader();
                }
                self.request_load_move();
            }
            Some(PlannedMove::Null) => {
                self.prep_null();
                self.request_load_move();
            }
        }
    }
}

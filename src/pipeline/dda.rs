//! The DDA tick: the innermost loop of the whole machine.

use core::sync::atomic::Ordering;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::axis::Axis;
use crate::hw::IntervalTimer;

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
    /// DDA timer compare-match entry point (highest priority).
    ///
    /// Integrates each motor's phase accumulator and emits at most one step
    /// pulse per motor. The `> 0` test together with accumulators that carry
    /// across segment boundaries keeps step totals exact over a whole move;
    /// worst-case placement jitter is one tick. When the down-counter
    /// reaches zero the segment is over: the timer is stopped and the loader
    /// runs directly, which is safe at this interrupt level.
    ///
    /// Pin errors cannot be surfaced from here and are discarded. The pulse
    /// width hold comes from the delay provider; cores slow enough that the
    /// handler body already spans the driver's minimum width can configure
    /// `step_pulse_ns = 0`.
    pub fn on_dda_tick(&mut self) {
        if self.run.dda_ticks_downcount == 0 {
            return; // spurious tick after the timer was stopped
        }

        let dda_ticks_x_substeps = self.run.dda_ticks_x_substeps;
        let pulse_ns = self.timing.step_pulse_ns;

        let zm = &mut self.run.motors[Axis::Z.index()];
        zm.phase_accumulator += zm.phase_increment;
        if zm.phase_accumulator > 0 {
            let _ = self.z.step.set_high();
            zm.phase_accumulator -= dda_ticks_x_substeps;
            if pulse_ns > 0 {
                self.delay.delay_ns(pulse_ns);
            }
            let _ = self.z.step.set_low();
            self.step_counts[Axis::Z.index()].fetch_add(1, Ordering::Relaxed);
        }

        let rm = &mut self.run.motors[Axis::R.index()];
        rm.phase_accumulator += rm.phase_increment;
        if rm.phase_accumulator > 0 {
            let _ = self.r.step.set_high();
            rm.phase_accumulator -= dda_ticks_x_substeps;
            if pulse_ns > 0 {
                self.delay.delay_ns(pulse_ns);
            }
            let _ = self.r.step.set_low();
            self.step_counts[Axis::R.index()].fetch_add(1, Ordering::Relaxed);
        }

        self.run.dda_ticks_downcount -= 1;
        if self.run.dda_ticks_downcount == 0 {
            self.timers.dda.disable();
            self.load_move();
        }
    }
}

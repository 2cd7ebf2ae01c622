//! Shared test doubles: recording pins, fake timers, a scripted planner,
//! and a priority-faithful pump loop for driving the pipeline.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use stepper_pulse::{
    CoreBuilder, DdaTiming, IntervalTimer, MotorChannel, MoveSource, PlannedMove, Polarity,
    StepperCore, Timers,
};

// =============================================================================
// Recording pin
// =============================================================================

#[derive(Default)]
struct PinState {
    level: Cell<bool>,
    rises: Cell<u32>,
}

/// An `OutputPin` that records its level and counts rising edges.
pub struct RecordingPin {
    state: Rc<PinState>,
}

/// Read-side handle onto a [`RecordingPin`].
pub struct PinProbe {
    state: Rc<PinState>,
}

/// Create a linked pin/probe pair.
pub fn recording_pin() -> (RecordingPin, PinProbe) {
    let state = Rc::new(PinState::default());
    (
        RecordingPin { state: state.clone() },
        PinProbe { state },
    )
}

impl ErrorType for RecordingPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.state.level.get() {
            self.state.rises.set(self.state.rises.get() + 1);
        }
        self.state.level.set(true);
        Ok(())
    }
}

impl PinProbe {
    /// Number of rising edges seen so far.
    pub fn rises(&self) -> u32 {
        self.state.rises.get()
    }

    /// Current pin level.
    pub fn is_high(&self) -> bool {
        self.state.level.get()
    }
}

// =============================================================================
// Fake interval timer
// =============================================================================

#[derive(Default)]
struct TimerState {
    enabled: Cell<bool>,
    enables: Cell<u32>,
    rearms: Cell<u32>,
}

/// An `IntervalTimer` backed by a shared flag the pump loop can observe.
pub struct FakeTimer {
    state: Rc<TimerState>,
}

/// Read-side handle onto a [`FakeTimer`].
pub struct TimerProbe {
    state: Rc<TimerState>,
}

/// Create a linked timer/probe pair.
pub fn fake_timer() -> (FakeTimer, TimerProbe) {
    let state = Rc::new(TimerState::default());
    (
        FakeTimer { state: state.clone() },
        TimerProbe { state },
    )
}

impl IntervalTimer for FakeTimer {
    fn enable(&mut self) {
        self.state.enabled.set(true);
        self.state.enables.set(self.state.enables.get() + 1);
    }

    fn disable(&mut self) {
        self.state.enabled.set(false);
    }

    fn rearm(&mut self) {
        self.state.rearms.set(self.state.rearms.get() + 1);
    }
}

impl TimerProbe {
    pub fn is_enabled(&self) -> bool {
        self.state.enabled.get()
    }

    pub fn enable_count(&self) -> u32 {
        self.state.enables.get()
    }

    pub fn rearm_count(&self) -> u32 {
        self.state.rearms.get()
    }
}

// =============================================================================
// Scripted planner
// =============================================================================

/// A `MoveSource` that replays a fixed script of moves.
pub struct ScriptedPlanner {
    moves: VecDeque<PlannedMove>,
    /// How many times the pipeline polled this planner.
    pub polls: u32,
}

impl ScriptedPlanner {
    pub fn new(moves: Vec<PlannedMove>) -> Self {
        Self {
            moves: moves.into(),
            polls: 0,
        }
    }
}

impl MoveSource for ScriptedPlanner {
    fn next_move(&mut self) -> Option<PlannedMove> {
        self.polls += 1;
        self.moves.pop_front()
    }
}

// =============================================================================
// Test rig
// =============================================================================

/// Concrete core type used throughout the integration tests.
pub type TestCore = StepperCore<
    RecordingPin,
    RecordingPin,
    RecordingPin,
    RecordingPin,
    FakeTimer,
    FakeTimer,
    FakeTimer,
    NoopDelay,
>;

/// A core plus probes onto every pin and timer it owns.
pub struct Rig {
    pub core: TestCore,
    pub z_step: PinProbe,
    pub z_dir: PinProbe,
    pub r_step: PinProbe,
    pub r_dir: PinProbe,
    pub dda: TimerProbe,
    pub load: TimerProbe,
    pub exec: TimerProbe,
}

/// Default test timing: 50 kHz DDA, no substep scaling, no pulse hold.
pub fn test_timing() -> DdaTiming {
    DdaTiming {
        frequency_hz: 50_000.0,
        substeps: 1.0,
        substeps_int: 1,
        accumulator_reset_factor: 2,
        min_segment_us: 0.01,
        step_pulse_ns: 0,
    }
}

/// Build a rig with explicit timing and polarities.
pub fn rig_with(timing: DdaTiming, z_polarity: Polarity, r_polarity: Polarity) -> Rig {
    let (z_step_pin, z_step) = recording_pin();
    let (z_dir_pin, z_dir) = recording_pin();
    let (r_step_pin, r_step) = recording_pin();
    let (r_dir_pin, r_dir) = recording_pin();
    let (dda_timer, dda) = fake_timer();
    let (load_timer, load) = fake_timer();
    let (exec_timer, exec) = fake_timer();

    let core = CoreBuilder::new()
        .z_channel(MotorChannel::new(z_step_pin, z_dir_pin, z_polarity))
        .r_channel(MotorChannel::new(r_step_pin, r_dir_pin, r_polarity))
        .timers(Timers::new(dda_timer, load_timer, exec_timer))
        .delay(NoopDelay)
        .timing(timing)
        .build()
        .expect("rig construction");

    Rig {
        core,
        z_step,
        z_dir,
        r_step,
        r_dir,
        dda,
        load,
        exec,
    }
}

/// Build a rig with default timing and normal polarity on both motors.
pub fn rig() -> Rig {
    rig_with(test_timing(), Polarity::Normal, Polarity::Normal)
}

// =============================================================================
// Pump loop
// =============================================================================

/// Drain the medium-priority software interrupts until neither is pending.
pub fn drain_soft_interrupts(rig: &mut Rig, planner: &mut ScriptedPlanner) {
    loop {
        let mut progressed = false;
        if rig.exec.is_enabled() {
            rig.core.on_exec_interrupt(planner);
            progressed = true;
        }
        if rig.load.is_enabled() {
            rig.core.on_load_interrupt();
            progressed = true;
        }
        if !progressed {
            return;
        }
    }
}

/// Run the pipeline to drain, modeling the three priority levels: software
/// interrupts fire between DDA ticks (they run below the tick, and the tick
/// handler chains the loader itself at segment end). Returns the number of
/// DDA ticks executed.
pub fn pump(rig: &mut Rig, planner: &mut ScriptedPlanner, max_ticks: u64) -> u64 {
    let mut ticks = 0;
    loop {
        drain_soft_interrupts(rig, planner);
        if rig.dda.is_enabled() {
            rig.core.on_dda_tick();
            ticks += 1;
            assert!(
                ticks <= max_ticks,
                "pipeline did not drain within {} ticks",
                max_ticks
            );
        } else {
            return ticks;
        }
    }
}

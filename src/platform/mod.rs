//! Platform abstraction layer
//!
//! Handles the parts of the host the game loop depends on:
//! - Time (monotonic clock and frame pacing)
//! - Input events, reduced to per-tick intents

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::sim::TickInput;

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;

    /// Block until `now()` reaches `deadline`. Returns at once if it already has.
    fn wait_until(&mut self, deadline: f64);
}

/// Wall clock measured from construction
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn wait_until(&mut self, deadline: f64) {
        let remaining = deadline - self.now();
        if remaining > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(remaining));
        }
    }
}

/// Clock that only moves when waited on or told to.
///
/// Clones share the same reading, so a test can keep a handle while the
/// session owns the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    /// Jumps straight to the deadline
    fn wait_until(&mut self, deadline: f64) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

/// Source of per-tick input intents
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// No keys held, ever. Used when the demo driver plays alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> TickInput {
        TickInput::default()
    }
}

/// Plays back a fixed list of inputs, one per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            quit_when_done: false,
        }
    }

    /// Request quit once the script runs out instead of idling
    pub fn then_quit(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    /// Append `input` held for `ticks` polls
    pub fn hold(mut self, input: TickInput, ticks: usize) -> Self {
        self.script.extend(std::iter::repeat_n(input, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        match self.script.pop_front() {
            Some(input) => input,
            None => TickInput {
                quit: self.quit_when_done,
                ..Default::default()
            },
        }
    }
}

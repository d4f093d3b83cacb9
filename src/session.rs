//! Frame loop
//!
//! A `Session` owns the game state and every collaborator: clock, input,
//! renderer and audio. `run` consumes it, so teardown happens exactly once.

use serde::Serialize;

use crate::audio::AudioManager;
use crate::platform::{Clock, InputSource};
use crate::render::{RenderFrame, Renderer};
use crate::settings::Settings;
use crate::sim::{DemoDriver, GamePhase, GameState, TickInput, Track, tick};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    /// Ticks spent racing, out of `ticks`
    pub racing_ticks: u64,
    pub level: u32,
    /// Seconds banked on completed levels at exit
    pub total_time: f64,
    pub phase: GamePhase,
}

pub struct Session {
    state: GameState,
    track: Track,
    frame_duration: f64,
    clock: Box<dyn Clock>,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    audio: AudioManager,
    demo: Option<DemoDriver>,
    max_ticks: Option<u64>,
}

impl Session {
    pub fn new(
        track: Track,
        settings: &Settings,
        clock: Box<dyn Clock>,
        input: Box<dyn InputSource>,
        renderer: Box<dyn Renderer>,
        audio: AudioManager,
    ) -> Self {
        Self {
            state: GameState::new(settings.rules, &track),
            track,
            frame_duration: settings.frame_duration(),
            clock,
            input,
            renderer,
            audio,
            demo: None,
            max_ticks: None,
        }
    }

    /// Let the demo AI drive the player. Quit from the real input still works.
    pub fn with_demo_driver(mut self, seed: u64) -> Self {
        log::info!("Demo driver enabled (seed {})", seed);
        self.demo = Some(DemoDriver::new(seed));
        self
    }

    /// Stop after `ticks` ticks even without a quit
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Run until quit or the tick limit, then tear everything down
    pub fn run(mut self) -> SessionSummary {
        log::info!(
            "Session starting on '{}' ({} levels)",
            self.track.name,
            self.state.info.levels
        );

        let mut deadline = self.clock.now();
        let mut ticks = 0u64;

        loop {
            if self.max_ticks.is_some_and(|limit| ticks >= limit) {
                log::info!("Tick limit reached");
                break;
            }

            let input = self.next_input();
            let now = self.clock.now();
            let events = tick(&mut self.state, &self.track, &input, now);
            ticks += 1;
            self.audio.handle_events(&events);

            if self.state.phase == GamePhase::Quit {
                break;
            }

            let frame = RenderFrame::build(&self.state, &self.track, now);
            self.renderer.present(&frame);

            deadline += self.frame_duration;
            self.clock.wait_until(deadline);
        }

        self.renderer.shutdown();

        let summary = SessionSummary {
            ticks,
            racing_ticks: self.state.time_ticks,
            level: self.state.info.level,
            total_time: self.state.info.total_time,
            phase: self.state.phase,
        };
        log::info!(
            "Session over after {} ticks ({} racing) at level {} ({:.1}s banked)",
            summary.ticks,
            summary.racing_ticks,
            summary.level,
            summary.total_time
        );
        summary
    }

    fn next_input(&mut self) -> TickInput {
        let polled = self.input.poll();
        match self.demo.as_mut() {
            Some(demo) => TickInput {
                quit: polled.quit,
                ..demo.drive(&self.state, &self.track)
            },
            None => polled,
        }
    }
}

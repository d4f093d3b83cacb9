//! Fixed timestep simulation tick
//!
//! Advances the session one frame: phase input handling, car movement,
//! collisions and level transitions, in that order.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Crossing, collide};
use super::state::{GameEvent, GamePhase, GameState};
use super::track::Track;
use super::vehicle::{Turn, Vehicle};

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub reverse: bool,
    /// Some key went down this tick
    pub any_key: bool,
    /// Window closed or quit requested
    pub quit: bool,
}

/// Advance the session by one tick. `now` is the clock reading in seconds.
pub fn tick(state: &mut GameState, track: &Track, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit && state.phase != GamePhase::Quit {
        log::info!("Quit requested at level {}", state.info.level);
        state.phase = GamePhase::Quit;
        events.push(GameEvent::Quit);
        return events;
    }

    match state.phase {
        GamePhase::Quit => {}

        GamePhase::WaitingToStart => {
            if input.any_key {
                state.info.start_level(now);
                state.phase = GamePhase::Racing;
                log::info!("Level {} started", state.info.level);
                events.push(GameEvent::LevelStarted {
                    level: state.info.level,
                });
            }
        }

        GamePhase::ComputerWon { resume_at } => {
            if now >= resume_at {
                state.reset_session();
                log::info!("Session reset after computer win");
                events.push(GameEvent::SessionReset);
            }
        }

        GamePhase::Finished { .. } => {
            if input.any_key {
                state.reset_session();
                log::info!("Starting over from level 1");
                events.push(GameEvent::SessionReset);
            }
        }

        GamePhase::Racing => {
            state.time_ticks += 1;
            drive_player(state, input);
            state.computer.drive();
            resolve_collisions(state, track, now, &mut events);
        }
    }

    events
}

/// Apply turn and throttle intents; coast when neither pedal is down
fn drive_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    if input.left {
        player.rotate(Turn::Left);
    }
    if input.right {
        player.rotate(Turn::Right);
    }

    let mut moved = false;
    if input.forward {
        moved = true;
        player.car.accelerate_forward();
    }
    if input.reverse {
        moved = true;
        player.car.accelerate_backward();
    }
    if !moved {
        player.decelerate_passive();
    }
}

fn resolve_collisions(state: &mut GameState, track: &Track, now: f64, events: &mut Vec<GameEvent>) {
    if collide(&state.player.car, &track.border, IVec2::ZERO).is_some() {
        bounce(state, now, false, events);
        // Extra step to get clear of the wall
        state.player.drive();
    }

    if track.finish.touch(&state.computer.car).is_some() {
        let level = state.info.level;
        log::info!("Computer won level {}", level);
        state.phase = GamePhase::ComputerWon {
            resume_at: now + state.rules.computer_win_pause,
        };
        events.push(GameEvent::ComputerWon { level });
        return;
    }

    match track.finish.crossing(&state.player.car) {
        Some(Crossing::Wrong) => bounce(state, now, true, events),
        Some(Crossing::Valid) => complete_level(state, now, events),
        None => {}
    }
}

fn bounce(state: &mut GameState, now: f64, wrong_way: bool, events: &mut Vec<GameEvent>) {
    let rules = state.rules;
    let sound = state
        .player
        .bounce(rules.bounce_damping, now, rules.crash_cooldown);
    log::debug!(
        "Bounce (wrong way: {}) velocity now {:.2}",
        wrong_way,
        state.player.car.velocity
    );
    events.push(GameEvent::Bounce { wrong_way });
    if sound {
        events.push(GameEvent::CrashSound);
    }
}

fn complete_level(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let level_time = state.info.level_time(now);
    if !state.info.next_level(now) {
        return;
    }

    state.player.reset();
    state
        .computer
        .next_level(state.info.level, state.rules.level_speed_step);

    if state.info.game_finished() {
        let final_time = state.info.total_time + state.info.level_time(now);
        log::info!("All {} levels cleared in {:.1}s", state.info.levels, final_time);
        state.phase = GamePhase::Finished { final_time };
        events.push(GameEvent::GameWon {
            total_time: final_time,
        });
    } else {
        log::info!(
            "Level {} complete in {:.1}s",
            state.info.level - 1,
            level_time
        );
        state.phase = GamePhase::WaitingToStart;
        events.push(GameEvent::LevelComplete {
            level: state.info.level,
            level_time,
        });
    }
}

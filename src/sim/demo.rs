//! Demo driver: an AI that plays the player car
//!
//! Steers along the track's waypoint path with the same bearing math as the
//! computer car, but works the throttle like a person would: it lifts off for
//! sharp turns, hesitates now and then, and takes a moment to press a key
//! between levels.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::autopilot::{desired_heading, rect_contains};
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use super::track::Track;
use crate::wrap_degrees;

/// Heading error (degrees) below which the driver stops steering
const STEER_DEADBAND: f32 = 2.0;
/// Heading error above which the driver lifts off the throttle
const COAST_ANGLE: f32 = 35.0;
/// Cruising speed the driver holds below the car's top speed
const CRUISE_VELOCITY: f32 = 3.0;
/// Chance per tick of skipping the throttle
const HESITATION: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct DemoDriver {
    rng: Pcg32,
    /// Index into the track path of the waypoint being chased
    waypoint: usize,
    /// Ticks left before pressing a key in a waiting phase
    key_delay: Option<u32>,
    racing: bool,
}

impl DemoDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            waypoint: 0,
            key_delay: None,
            racing: false,
        }
    }

    /// Index of the waypoint currently steered for
    pub fn waypoint(&self) -> usize {
        self.waypoint
    }

    /// Decide this tick's input from the current state
    pub fn drive(&mut self, state: &GameState, track: &Track) -> TickInput {
        match state.phase {
            GamePhase::Racing => {
                if !self.racing {
                    self.racing = true;
                    self.waypoint = 0;
                }
                self.race(state, track)
            }
            GamePhase::WaitingToStart | GamePhase::Finished { .. } => {
                self.racing = false;
                self.wait_for_key()
            }
            GamePhase::ComputerWon { .. } | GamePhase::Quit => {
                self.racing = false;
                TickInput::default()
            }
        }
    }

    /// Count down a random delay, then press a key once
    fn wait_for_key(&mut self) -> TickInput {
        let remaining = match self.key_delay {
            Some(ticks) => ticks,
            None => self.rng.random_range(20..90),
        };
        if remaining == 0 {
            self.key_delay = None;
            log::debug!("Demo driver pressing start");
            return TickInput {
                any_key: true,
                ..Default::default()
            };
        }
        self.key_delay = Some(remaining - 1);
        TickInput::default()
    }

    fn race(&mut self, state: &GameState, track: &Track) -> TickInput {
        let mut input = TickInput::default();
        if track.path.is_empty() {
            return input;
        }

        let car = &state.player.car;
        let target = track.path[self.waypoint % track.path.len()];
        if rect_contains(car.pos, car.size(), target) {
            // Wrap round: the finish line sits between the last waypoint
            // and the first
            self.waypoint = (self.waypoint + 1) % track.path.len();
            log::debug!("Demo driver heading for waypoint {}", self.waypoint);
        }

        let target = track.path[self.waypoint];
        // Always the short way round, unlike the computer
        let error = wrap_degrees(car.angle - desired_heading(car.pos, target));
        if error > STEER_DEADBAND {
            input.right = true;
        } else if error < -STEER_DEADBAND {
            input.left = true;
        }

        let sharp = error.abs() > COAST_ANGLE;
        let hesitate = self.rng.random_bool(HESITATION);
        input.forward = !sharp && !hesitate && car.velocity < CRUISE_VELOCITY;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Rules;
    use crate::sim::tick::tick;

    fn inputs(seed: u64, ticks: usize) -> Vec<TickInput> {
        let track = Track::demo();
        let mut state = GameState::new(Rules::default(), &track);
        let mut driver = DemoDriver::new(seed);
        let mut out = Vec::new();
        for i in 0..ticks {
            let input = driver.drive(&state, &track);
            tick(&mut state, &track, &input, i as f64 / 60.0);
            out.push(input);
        }
        out
    }

    #[test]
    fn test_same_seed_same_inputs() {
        assert_eq!(inputs(7, 400), inputs(7, 400));
    }

    #[test]
    fn test_presses_start_after_delay() {
        let track = Track::demo();
        let state = GameState::new(Rules::default(), &track);
        let mut driver = DemoDriver::new(1);

        let first = driver.drive(&state, &track);
        assert!(!first.any_key);

        let pressed = (0..100).any(|_| driver.drive(&state, &track).any_key);
        assert!(pressed);
    }

    #[test]
    fn test_steers_toward_waypoint() {
        let track = Track::demo();
        let mut state = GameState::new(Rules::default(), &track);
        state.phase = GamePhase::Racing;
        let mut driver = DemoDriver::new(3);

        // First waypoint (60, 60) is up and to the right of the grid
        let input = driver.drive(&state, &track);
        assert!(input.right);
        assert!(!input.left);

        // Facing down the track the error is large: turn and coast
        state.player.car.angle = 180.0;
        let input = driver.drive(&state, &track);
        assert!(!input.forward);
    }

    #[test]
    fn test_moves_to_next_waypoint_when_reached() {
        let track = Track::demo();
        let mut state = GameState::new(Rules::default(), &track);
        state.phase = GamePhase::Racing;
        let mut driver = DemoDriver::new(3);

        driver.drive(&state, &track);
        assert_eq!(driver.waypoint(), 0);

        // Park over (60, 60)
        state.player.car.pos = glam::Vec2::new(55.0, 50.0);
        driver.drive(&state, &track);
        assert_eq!(driver.waypoint(), 1);
    }

    #[test]
    fn test_idle_while_computer_banner_shows() {
        let track = Track::demo();
        let mut state = GameState::new(Rules::default(), &track);
        state.phase = GamePhase::ComputerWon { resume_at: 5.0 };
        let mut driver = DemoDriver::new(0);
        for _ in 0..200 {
            assert_eq!(driver.drive(&state, &track), TickInput::default());
        }
    }

    #[test]
    fn test_gets_the_car_moving() {
        let track = Track::demo();
        let mut state = GameState::new(Rules::default(), &track);
        let mut driver = DemoDriver::new(11);
        for i in 0..300 {
            let input = driver.drive(&state, &track);
            tick(&mut state, &track, &input, i as f64 / 60.0);
        }
        assert_ne!(state.phase, GamePhase::WaitingToStart);
        assert_ne!(state.player.car.pos, track.player_start.pos);
    }
}

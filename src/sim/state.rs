//! Game state and core simulation types
//!
//! One `GameState` lives for the whole session; cars and level info are
//! reset in place rather than rebuilt.

use serde::{Deserialize, Serialize};

use super::autopilot::ComputerCar;
use super::track::Track;
use super::vehicle::PlayerCar;
use crate::consts::*;

/// Gameplay tuning, data-driven so settings files can adjust it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub levels: u32,
    pub acceleration: f32,
    pub player_max_velocity: f32,
    pub player_rotation_velocity: f32,
    pub computer_max_velocity: f32,
    pub computer_rotation_velocity: f32,
    /// Computer speed added per level beyond the first
    pub level_speed_step: f32,
    /// Bounce divides velocity by this after reversing it
    pub bounce_damping: f32,
    /// Seconds between crash sounds
    pub crash_cooldown: f64,
    /// Seconds the computer's win is shown before everything resets
    pub computer_win_pause: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            levels: LEVELS,
            acceleration: ACCELERATION,
            player_max_velocity: PLAYER_MAX_VELOCITY,
            player_rotation_velocity: PLAYER_ROTATION_VELOCITY,
            computer_max_velocity: COMPUTER_MAX_VELOCITY,
            computer_rotation_velocity: COMPUTER_ROTATION_VELOCITY,
            level_speed_step: LEVEL_SPEED_STEP,
            bounce_damping: BOUNCE_DAMPING,
            crash_cooldown: CRASH_COOLDOWN,
            computer_win_pause: COMPUTER_WIN_PAUSE,
        }
    }
}

/// Level progress and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// 1-based; exceeds `levels` once the run is won
    pub level: u32,
    pub levels: u32,
    /// False while waiting for the key press that starts the level
    pub started: bool,
    /// Clock reading when the current level started
    pub level_start_time: f64,
    /// Seconds spent on completed levels
    pub total_time: f64,
}

impl GameInfo {
    pub fn new(levels: u32) -> Self {
        Self {
            level: 1,
            levels,
            started: false,
            level_start_time: 0.0,
            total_time: 0.0,
        }
    }

    /// Back to level 1 with no time banked
    pub fn reset(&mut self) {
        self.level = 1;
        self.started = false;
        self.level_start_time = 0.0;
        self.total_time = 0.0;
    }

    pub fn start_level(&mut self, now: f64) {
        self.started = true;
        self.level_start_time = now;
    }

    /// Seconds on the current level, zero until it starts
    pub fn level_time(&self, now: f64) -> f64 {
        if !self.started {
            return 0.0;
        }
        (now - self.level_start_time).max(0.0)
    }

    /// Bank the level time and move up a level.
    ///
    /// Returns false, changing nothing, once the run is already won.
    pub fn next_level(&mut self, now: f64) -> bool {
        if self.game_finished() {
            return false;
        }
        self.total_time += self.level_time(now);
        self.level += 1;
        self.started = false;
        true
    }

    pub fn game_finished(&self) -> bool {
        self.level > self.levels
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Cars on the grid, waiting for any key
    WaitingToStart,
    /// Active racing
    Racing,
    /// Computer crossed the line; banner shown until `resume_at`
    ComputerWon { resume_at: f64 },
    /// All levels cleared; waiting for any key to start over
    Finished { final_time: f64 },
    /// Quit requested, nothing ticks any more
    Quit,
}

impl GamePhase {
    /// Whether turn/throttle input drives the player in this phase
    pub fn accepts_driving(&self) -> bool {
        matches!(self, GamePhase::Racing)
    }

    /// Whether an any-key press does something in this phase
    pub fn accepts_any_key(&self) -> bool {
        matches!(self, GamePhase::WaitingToStart | GamePhase::Finished { .. })
    }
}

/// Things that happened during a tick, for audio, HUD and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    /// Player bounced off the border or the wrong side of the finish
    Bounce { wrong_way: bool },
    /// A bounce loud enough to play the crash sound
    CrashSound,
    /// Player crossed the line; `level` is the level now up next
    LevelComplete { level: u32, level_time: f64 },
    ComputerWon { level: u32 },
    GameWon { total_time: f64 },
    /// Back to level 1 after a computer win or a won run
    SessionReset,
    Quit,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: Rules,
    pub info: GameInfo,
    pub phase: GamePhase,
    pub player: PlayerCar,
    pub computer: ComputerCar,
    /// Ticks simulated in the racing phase, over the whole session
    pub time_ticks: u64,
}

impl GameState {
    /// Cars on the grid of `track`, level 1, waiting to start
    pub fn new(rules: Rules, track: &Track) -> Self {
        let player = PlayerCar::new(
            track.player_start,
            track.player_sprite.clone(),
            rules.player_max_velocity,
            rules.player_rotation_velocity,
            rules.acceleration,
        );
        let computer = ComputerCar::new(
            track.computer_start,
            track.computer_sprite.clone(),
            rules.computer_max_velocity,
            rules.computer_rotation_velocity,
            rules.acceleration,
            track.path.clone(),
        );

        Self {
            rules,
            info: GameInfo::new(rules.levels),
            phase: GamePhase::WaitingToStart,
            player,
            computer,
            time_ticks: 0,
        }
    }

    /// Level 1, both cars back on the grid, waiting for a key
    pub fn reset_session(&mut self) {
        self.info.reset();
        self.player.car.reset();
        self.computer.next_level(self.info.level, self.rules.level_speed_step);
        self.phase = GamePhase::WaitingToStart;
    }
}

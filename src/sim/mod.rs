//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one tick per frame
//! - Time comes in as a clock reading, never read from the system
//! - Seeded RNG only (demo driver)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod demo;
pub mod mask;
pub mod state;
pub mod tick;
pub mod track;
pub mod vehicle;

pub use autopilot::{ComputerCar, desired_heading, heading_error, rect_contains};
pub use collision::{Crossing, CrossingRule, FinishLine, collide};
pub use demo::DemoDriver;
pub use mask::{Mask, rotated_extent};
pub use state::{GameEvent, GameInfo, GamePhase, GameState, Rules};
pub use tick::{TickInput, tick};
pub use track::Track;
pub use vehicle::{Car, PlayerCar, Pose, Turn, Vehicle};

//! Finish Line - a 2D track racer against a path-following computer car
//!
//! Core modules:
//! - `sim`: Simulation (vehicles, masks, collisions, level state machine)
//! - `render`: Draw lists handed to whatever presents the frame
//! - `platform`: Clock and input abstractions
//! - `session`: Frame loop wiring input, simulation, audio and rendering
//! - `assets`: PNG decoding into collision masks

pub mod assets;
pub mod audio;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation/render rate
    pub const FPS: u32 = 60;

    /// Levels to clear before the run is won
    pub const LEVELS: u32 = 10;

    /// Per-tick velocity increment, shared by both cars
    pub const ACCELERATION: f32 = 0.1;

    /// Player car defaults
    pub const PLAYER_MAX_VELOCITY: f32 = 4.0;
    pub const PLAYER_ROTATION_VELOCITY: f32 = 4.0;

    /// Computer car defaults
    pub const COMPUTER_MAX_VELOCITY: f32 = 2.0;
    pub const COMPUTER_ROTATION_VELOCITY: f32 = 4.0;
    /// Computer speed gained per level cleared
    pub const LEVEL_SPEED_STEP: f32 = 0.2;

    /// Velocity divisor applied when the player bounces off a wall
    pub const BOUNCE_DAMPING: f32 = 1.5;
    /// Minimum seconds between two crash sounds
    pub const CRASH_COOLDOWN: f64 = 0.3;
    /// Seconds the "computer wins" banner stays up before the reset
    pub const COMPUTER_WIN_PAUSE: f64 = 2.0;

    /// Alpha above which a sprite pixel counts as solid
    pub const MASK_ALPHA_THRESHOLD: u8 = 127;
}

/// Wrap an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Displacement for one step of `speed` along `angle_deg`.
///
/// Heading 0 points up the image (negative y) and angles grow
/// counter-clockwise, so 90 points left.
#[inline]
pub fn heading_step(angle_deg: f32, speed: f32) -> Vec2 {
    let radians = angle_deg.to_radians();
    Vec2::new(-radians.sin() * speed, -radians.cos() * speed)
}

/// Format whole seconds as `M:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

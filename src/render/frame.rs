//! Frame description: what to draw, not how
//!
//! A `RenderFrame` is rebuilt every tick from the game state. Backdrop
//! layers go first, then the cars, then text on top.

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::format_clock;
use crate::sim::{GamePhase, GameState, Track};

/// White HUD text
pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];
/// Secondary prompt text
pub const PROMPT_COLOR: [u8; 3] = [200, 200, 200];

/// Full-track images, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Grass,
    Track,
    Finish,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub layer: Layer,
    pub pos: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    Computer,
}

/// A car image, rotated by `angle` degrees and placed with its rotated
/// bounding box at `top_left`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: SpriteId,
    pub top_left: Vec2,
    pub angle: f32,
}

/// Where a line of text goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// Top-left corner in track pixels
    At(Vec2),
    /// Horizontally centred, `dy` pixels below the vertical centre
    Centered { dy: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    pub anchor: Anchor,
    pub color: [u8; 3],
}

impl TextOverlay {
    fn new(text: impl Into<String>, anchor: Anchor, color: [u8; 3]) -> Self {
        Self {
            text: text.into(),
            anchor,
            color,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub size: UVec2,
    /// Clear to black instead of drawing the track
    pub blackout: bool,
    pub backdrop: Vec<Backdrop>,
    pub sprites: Vec<Sprite>,
    /// HUD lines
    pub hud: Vec<TextOverlay>,
    /// Centred phase messages
    pub banners: Vec<TextOverlay>,
}

impl RenderFrame {
    pub fn build(state: &GameState, track: &Track, now: f64) -> Self {
        let size = track.size;

        if let GamePhase::Finished { final_time } = state.phase {
            return Self {
                size,
                blackout: true,
                backdrop: Vec::new(),
                sprites: Vec::new(),
                hud: Vec::new(),
                banners: finished_banners(final_time),
            };
        }

        let backdrop = vec![
            Backdrop {
                layer: Layer::Grass,
                pos: IVec2::ZERO,
            },
            Backdrop {
                layer: Layer::Track,
                pos: IVec2::ZERO,
            },
            Backdrop {
                layer: Layer::Finish,
                pos: track.finish.origin,
            },
            Backdrop {
                layer: Layer::Border,
                pos: IVec2::ZERO,
            },
        ];

        let sprites = vec![
            Sprite {
                id: SpriteId::Player,
                top_left: state.player.car.rotated_origin(),
                angle: state.player.car.angle,
            },
            Sprite {
                id: SpriteId::Computer,
                top_left: state.computer.car.rotated_origin(),
                angle: state.computer.car.angle,
            },
        ];

        let bottom = size.y as f32;
        let seconds = state.info.level_time(now).round() as u64;
        let hud = vec![
            TextOverlay::new(
                format!("Level {}", state.info.level),
                Anchor::At(Vec2::new(10.0, bottom - 70.0)),
                TEXT_COLOR,
            ),
            TextOverlay::new(
                format!("Time: {}s", seconds),
                Anchor::At(Vec2::new(10.0, bottom - 120.0)),
                TEXT_COLOR,
            ),
        ];

        let banners = match state.phase {
            GamePhase::WaitingToStart => vec![TextOverlay::new(
                format!("Press any key to start level {}!", state.info.level),
                Anchor::Centered { dy: 0.0 },
                TEXT_COLOR,
            )],
            GamePhase::ComputerWon { .. } => vec![TextOverlay::new(
                "COMPUTER WINS! TRY AGAIN.",
                Anchor::Centered { dy: 0.0 },
                TEXT_COLOR,
            )],
            _ => Vec::new(),
        };

        Self {
            size,
            blackout: false,
            backdrop,
            sprites,
            hud,
            banners,
        }
    }

    /// Main banner line, if any
    pub fn headline(&self) -> Option<&str> {
        self.banners.first().map(|b| b.text.as_str())
    }
}

fn finished_banners(final_time: f64) -> Vec<TextOverlay> {
    let total = final_time.max(0.0).round() as u64;
    vec![
        TextOverlay::new("CONGRATULATIONS! YOU WIN!", Anchor::Centered { dy: 0.0 }, TEXT_COLOR),
        TextOverlay::new(
            format!("Total time: {}", format_clock(total)),
            Anchor::Centered { dy: 50.0 },
            TEXT_COLOR,
        ),
        TextOverlay::new("Press any key to start over.", Anchor::Centered { dy: 120.0 }, PROMPT_COLOR),
    ]
}

//! Rendering module
//!
//! The game builds a `RenderFrame` draw list each tick and hands it to a
//! `Renderer`. Windowed backends live outside the crate; the headless
//! binary logs frames instead.

pub mod frame;

pub use frame::{Anchor, Backdrop, Layer, RenderFrame, Sprite, SpriteId, TextOverlay};

/// Presents frames to the screen (or wherever)
pub trait Renderer {
    fn present(&mut self, frame: &RenderFrame);

    /// Release display resources. Called once, after the last frame.
    fn shutdown(&mut self);
}

/// Headless renderer: logs banner changes, and the HUD at debug level
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_banner: Option<String>,
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &RenderFrame) {
        self.frames += 1;

        let banner = frame.headline().map(str::to_owned);
        if banner != self.last_banner {
            if let Some(text) = &banner {
                log::info!("{}", text);
            }
            self.last_banner = banner;
        }

        if log::log_enabled!(log::Level::Debug) && self.frames.is_multiple_of(60) {
            let hud: Vec<&str> = frame.hud.iter().map(|t| t.text.as_str()).collect();
            log::debug!("HUD: {}", hud.join(" | "));
        }
    }

    fn shutdown(&mut self) {
        log::info!("Renderer shut down after {} frames", self.frames);
    }
}

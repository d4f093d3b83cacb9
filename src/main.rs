//! Finish Line - headless runner
//!
//! Races the demo driver against the computer car and logs the result.
//!
//! # Usage
//!
//! ```bash
//! finish-line                        # built-in demo track, one minute of game time
//! finish-line --assets imgs          # classic circuit from PNGs
//! finish-line --seed 42 --ticks 0    # run until the process is stopped
//! finish-line --realtime             # pace ticks against the wall clock
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use finish_line::audio::{AudioManager, LogSink};
use finish_line::platform::{Clock, IdleInput, ManualClock, MonotonicClock};
use finish_line::render::LogRenderer;
use finish_line::sim::Track;
use finish_line::{Session, Settings, assets};

#[derive(Parser)]
#[command(name = "finish-line")]
#[command(author, version, about = "Finish Line - race a computer car over ten levels")]
struct Args {
    /// Seed for the demo driver
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Ticks to run before stopping (0 = no limit)
    #[arg(long, default_value = "3600")]
    ticks: u64,

    /// Settings file (JSON)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Directory with the classic circuit images
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("Finish Line starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let track = match &args.assets {
        Some(dir) => assets::load_classic(dir)
            .with_context(|| format!("Failed to load track from {}", dir.display()))?,
        None => Track::demo(),
    };
    log::info!("Track '{}' ({}x{})", track.name, track.size.x, track.size.y);

    let clock: Box<dyn Clock> = if args.realtime {
        Box::new(MonotonicClock::new())
    } else {
        Box::new(ManualClock::new(0.0))
    };
    let audio = AudioManager::from_settings(Some(Box::new(LogSink)), &settings);

    let mut session = Session::new(
        track,
        &settings,
        clock,
        Box::new(IdleInput),
        Box::new(LogRenderer::new()),
        audio,
    )
    .with_demo_driver(args.seed);
    if args.ticks > 0 {
        session = session.with_tick_limit(args.ticks);
    }

    let summary = session.run();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

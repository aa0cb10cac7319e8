#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Pixel Quest experience.

mod config;
mod scene;
mod simulation;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use log::info;
use pixel_quest_core::{ARENA_HEIGHT, ARENA_WIDTH, WINDOW_TITLE};
use pixel_quest_rendering::{Color, Presentation, RenderingBackend, Scene};
use pixel_quest_rendering_macroquad::MacroquadBackend;
use pixel_quest_system_hud::Hud;
use pixel_quest_system_spawning::{Config, Spawning};
use pixel_quest_world::World;
use simulation::Simulation;
use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Command-line arguments for launching the experience.
#[derive(Debug, Parser)]
#[command(name = "pixel-quest", about = "Side-scrolling platformer with an unlockable overworld.")]
struct CliArgs {
    /// Seed for the coin and enemy layout of levels 2 to 8; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// TOML file overriding physics and scoring tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Controls whether vertical sync is enabled.
    #[arg(long, value_enum, default_value_t = VsyncMode::On)]
    vsync: VsyncMode,
    /// Logs frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VsyncMode {
    On,
    Off,
}

impl VsyncMode {
    fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Entry point for the Pixel Quest command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();

    let tuning = config::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("invalid tuning file {}", path.display()),
        None => "invalid default tuning".to_owned(),
    })?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting {WINDOW_TITLE} with layout seed {seed}");

    let world = World::with_tuning(tuning);
    let spawning = Spawning::new(Config::new(seed));
    let mut simulation = Simulation::new(world, spawning);
    let hud = Hud;

    let mut initial_scene = Scene::new(Color::from_rgb_u8(0, 0, 0));
    scene::populate(&mut initial_scene, simulation.world(), &hud, simulation.elapsed());
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        initial_scene,
    )
    .context("failed to describe the window")?;

    let backend = MacroquadBackend::default()
        .with_vsync(args.vsync.enabled())
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, input, scene| {
        let control = simulation.advance(frame_dt, &input);
        scene::populate(scene, simulation.world(), &hud, simulation.elapsed());
        control
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, seed_from_elapsed)
}

/// Folds the sub-second part into the whole seconds without truncating.
fn seed_from_elapsed(elapsed: Duration) -> u64 {
    elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos())
}

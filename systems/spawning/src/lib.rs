#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system that scatters coins and enemies into fresh levels.
//!
//! Levels only carry their hand-placed geometry. When the world reports a
//! started level, this system answers with one spawn command per entity the
//! level's scatter plan asks for. Positions are drawn from a seeded
//! [`ChaCha8Rng`], so the same seed always yields the same layouts.

use std::ops::RangeInclusive;

use glam::Vec2;
use log::debug;
use pixel_quest_core::{Command, Event, ScatterPlan, ARENA_HEIGHT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const COIN_X: RangeInclusive<i32> = 50..=750;
const COIN_Y: RangeInclusive<i32> = 100..=500;
const ENEMY_X: RangeInclusive<i32> = 100..=700;
/// Enemies drop in standing on the ground slab.
const ENEMY_Y: f32 = ARENA_HEIGHT - 70.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits spawn commands whenever a level starts.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and emits spawn commands for every started level.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelStarted { level, scatter } = event {
                debug!(
                    "scattering {} coins and {} enemies into level {}",
                    scatter.coins,
                    scatter.enemies,
                    level.get()
                );
                self.scatter(*scatter, out);
            }
        }
    }

    fn scatter(&mut self, plan: ScatterPlan, out: &mut Vec<Command>) {
        for _ in 0..plan.coins {
            let origin = Vec2::new(self.draw(COIN_X), self.draw(COIN_Y));
            out.push(Command::SpawnCoin { origin });
        }
        for _ in 0..plan.enemies {
            let origin = Vec2::new(self.draw(ENEMY_X), ENEMY_Y);
            out.push(Command::SpawnEnemy { origin });
        }
    }

    fn draw(&mut self, range: RangeInclusive<i32>) -> f32 {
        self.rng.gen_range(range) as f32
    }
}

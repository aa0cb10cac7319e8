#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Pixel Quest.
//!
//! The [`World`] owns the overworld map, the level being played and the
//! running score of the playthrough. It only changes through [`apply`], which
//! executes one [`Command`] and reports what happened as [`Event`] values.
//! Adapters and systems read state through the [`query`] module.

mod layouts;
mod level;
mod overworld;

use log::info;
use pixel_quest_core::{Command, EntityKind, Event, GamePhase, LevelStatus, Tuning};

pub use level::{Coin, Enemy, Goal, Level, Platform, Player};
pub use overworld::{OverworldMap, OverworldNode};

/// Represents the authoritative Pixel Quest world state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    phase: GamePhase,
    campaign: OverworldMap,
    overworld: OverworldMap,
    level: Option<Level>,
    total_score: u32,
    lives: u8,
}

impl World {
    /// Creates a new world on the standard overworld with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Creates a new world on the standard overworld with custom tuning.
    #[must_use]
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self::with_overworld(tuning, OverworldMap::standard())
    }

    /// Creates a new world on a custom overworld map.
    #[must_use]
    pub fn with_overworld(tuning: Tuning, overworld: OverworldMap) -> Self {
        Self {
            lives: tuning.starting_lives,
            tuning,
            phase: GamePhase::Overworld,
            campaign: overworld.clone(),
            overworld,
            level: None,
            total_score: 0,
        }
    }

    fn enter_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        info!("entering {phase:?}");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn start_level(&mut self, out_events: &mut Vec<Event>) {
        let number = self.overworld.current_level();
        let level = Level::new(number, self.lives, &self.tuning);
        let scatter = level.scatter();
        info!("starting level {} with {} lives", number.get(), self.lives);
        self.level = Some(level);
        self.enter_phase(GamePhase::Level, out_events);
        out_events.push(Event::LevelStarted {
            level: number,
            scatter,
        });
    }

    fn finish_level(&mut self, level: Level, out_events: &mut Vec<Event>) {
        self.total_score = self.total_score.saturating_add(level.score());
        self.lives = level.player().lives();

        for node in self.overworld.complete_current_level() {
            out_events.push(Event::NodeUnlocked { node });
        }
        out_events.push(Event::LevelCompleted {
            level: level.number(),
            level_score: level.score(),
            total_score: self.total_score,
        });

        if self.overworld.current_level().is_final() {
            self.enter_phase(GamePhase::Victory, out_events);
        } else {
            self.enter_phase(GamePhase::Overworld, out_events);
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.overworld = self.campaign.clone();
        self.level = None;
        self.total_score = 0;
        self.lives = self.tuning.starting_lives;
        self.enter_phase(GamePhase::Overworld, out_events);
    }

    fn is_terminal(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that make no sense in the current phase are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { held } => {
            let Some(level) = world.level.as_mut() else {
                return;
            };
            match level.update(held, out_events) {
                LevelStatus::Playing => {}
                LevelStatus::Completed => {
                    if let Some(level) = world.level.take() {
                        world.finish_level(level, out_events);
                    }
                }
                LevelStatus::GameOver => {
                    world.level = None;
                    world.lives = 0;
                    world.enter_phase(GamePhase::GameOver, out_events);
                }
            }
        }
        Command::Jump => {
            if let Some(level) = world.level.as_mut() {
                let _ = level.jump();
            }
        }
        Command::Navigate { direction } => {
            if world.phase != GamePhase::Overworld {
                return;
            }
            let from = world.overworld.current_node();
            if world.overworld.travel(direction) {
                out_events.push(Event::CursorMoved {
                    from,
                    to: world.overworld.current_node(),
                });
            }
        }
        Command::Confirm => {
            if world.phase == GamePhase::Overworld {
                world.start_level(out_events);
            }
        }
        Command::Cancel => {
            if let Some(level) = world.level.take() {
                world.lives = level.player().lives();
                info!("abandoning level {}", level.number().get());
                out_events.push(Event::LevelAbandoned {
                    level: level.number(),
                });
                world.enter_phase(GamePhase::Overworld, out_events);
            }
        }
        Command::Restart => {
            if world.is_terminal() {
                world.restart(out_events);
            }
        }
        Command::Quit => {
            if world.is_terminal() {
                out_events.push(Event::QuitRequested);
            }
        }
        Command::SpawnCoin { origin } => {
            if let Some(level) = world.level.as_mut() {
                let bounds = level.spawn_coin(origin);
                out_events.push(Event::EntitySpawned {
                    kind: EntityKind::Coin,
                    bounds,
                });
            }
        }
        Command::SpawnEnemy { origin } => {
            if let Some(level) = world.level.as_mut() {
                let bounds = level.spawn_enemy(origin);
                out_events.push(Event::EntitySpawned {
                    kind: EntityKind::Enemy,
                    bounds,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pixel_quest_core::{GamePhase, Tuning};

    use super::{Level, OverworldMap, World};

    /// Top-level phase the world is in.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Provides read-only access to the overworld map.
    #[must_use]
    pub fn overworld(world: &World) -> &OverworldMap {
        &world.overworld
    }

    /// The level being played, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<&Level> {
        world.level.as_ref()
    }

    /// Score banked from completed levels.
    #[must_use]
    pub fn total_score(world: &World) -> u32 {
        world.total_score
    }

    /// Lives the player has right now, including hits taken in the active level.
    #[must_use]
    pub fn player_lives(world: &World) -> u8 {
        world
            .level
            .as_ref()
            .map_or(world.lives, |level| level.player().lives())
    }

    /// Physics and scoring knobs in effect.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }
}

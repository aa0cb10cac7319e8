use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use glam::Vec2;
use pixel_quest_core::{Command, EntityKind, Event, LevelNumber, ScatterPlan};
use pixel_quest_system_spawning::{Config, Spawning};
use pixel_quest_world::{self as world, query, World};

fn level_started(level: u8, coins: u32, enemies: u32) -> Event {
    Event::LevelStarted {
        level: LevelNumber::new(level).expect("valid level"),
        scatter: ScatterPlan::new(coins, enemies),
    }
}

fn origins(commands: &[Command]) -> Vec<(EntityKind, Vec2)> {
    commands
        .iter()
        .map(|command| match command {
            Command::SpawnCoin { origin } => (EntityKind::Coin, *origin),
            Command::SpawnEnemy { origin } => (EntityKind::Enemy, *origin),
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect()
}

fn fingerprint(commands: &[Command]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (kind, origin) in origins(commands) {
        kind.hash(&mut hasher);
        origin.x.to_bits().hash(&mut hasher);
        origin.y.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[test]
fn scatter_lands_inside_the_spawn_areas() {
    let mut spawning = Spawning::new(Config::new(0x1234_5678));
    let mut commands = Vec::new();
    spawning.handle(&[level_started(8, 20, 6)], &mut commands);

    let spawned = origins(&commands);
    assert_eq!(spawned.len(), 26);

    for (kind, origin) in spawned {
        match kind {
            EntityKind::Coin => {
                assert!((50.0..=750.0).contains(&origin.x));
                assert!((100.0..=500.0).contains(&origin.y));
            }
            EntityKind::Enemy => {
                assert!((100.0..=700.0).contains(&origin.x));
                assert_eq!(origin.y, 530.0);
            }
            other => panic!("unexpected entity kind: {other:?}"),
        }
        assert_eq!(origin.x.fract(), 0.0, "positions are whole units");
    }
}

#[test]
fn unrelated_events_are_ignored() {
    let mut spawning = Spawning::new(Config::new(1));
    let mut commands = Vec::new();
    spawning.handle(
        &[
            Event::CoinCollected { level_score: 10 },
            Event::QuitRequested,
            level_started(1, 0, 0),
        ],
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn same_seed_replays_identical_layouts() {
    let events = [level_started(2, 8, 2), level_started(5, 15, 5)];

    let mut first = Vec::new();
    Spawning::new(Config::new(0x4d59_5df4_d0f3_3173)).handle(&events, &mut first);
    let mut second = Vec::new();
    Spawning::new(Config::new(0x4d59_5df4_d0f3_3173)).handle(&events, &mut second);
    let mut other = Vec::new();
    Spawning::new(Config::new(0x0bad_5eed)).handle(&events, &mut other);

    assert_eq!(first, second);
    assert_eq!(fingerprint(&first), fingerprint(&second));
    assert_ne!(fingerprint(&first), fingerprint(&other));
}

#[test]
fn world_accepts_scattered_entities() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(99));

    let mut events = Vec::new();
    world::apply(&mut world, Command::Confirm, &mut events);
    let mut pending = Vec::new();
    spawning.handle(&events, &mut pending);
    assert!(pending.is_empty(), "the first level has no scatter");

    events.clear();
    spawning.handle(&[level_started(2, 8, 2)], &mut pending);
    for command in pending.drain(..) {
        world::apply(&mut world, command, &mut events);
    }

    let spawned = events
        .iter()
        .filter(|event| matches!(event, Event::EntitySpawned { .. }))
        .count();
    assert_eq!(spawned, 10);

    let level = query::level(&world).expect("level active");
    assert_eq!(level.coins().len(), 4 + 8);
    assert_eq!(level.enemies().len(), 2);
}

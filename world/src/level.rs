//! A single playable level and its per-frame update.

use glam::Vec2;
use log::{debug, info};
use pixel_quest_core::{
    Bounded, Event, Facing, HeldKeys, LevelNumber, LevelStatus, Rect, ScatterPlan, Surface,
    Tuning, ARENA_WIDTH, COIN_SIZE, ENEMY_SIZE, GOAL_SIZE, PLAYER_SIZE, PLAYER_START,
};
use pixel_quest_system_physics::{overlapping, step_body, Body, Patrol};

use crate::layouts::{self, GROUND};

/// Static solid geometry the player and enemies stand on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    bounds: Rect,
    surface: Surface,
}

impl Platform {
    /// Material drawn on the platform.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        self.surface
    }
}

impl Bounded for Platform {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Collectible worth a fixed number of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coin {
    bounds: Rect,
}

impl Bounded for Coin {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Flag that completes the level when touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    bounds: Rect,
}

impl Bounded for Goal {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Hazard walking back and forth along a platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    bounds: Rect,
    heading: Facing,
}

impl Enemy {
    /// Direction the enemy is currently walking in.
    #[must_use]
    pub const fn heading(&self) -> Facing {
        self.heading
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// The player-controlled character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    body: Body,
    on_ground: bool,
    facing: Facing,
    lives: u8,
}

impl Player {
    fn spawn(lives: u8) -> Self {
        Self {
            body: Body::at_rest(Rect::from_origin_and_size(PLAYER_START, PLAYER_SIZE)),
            on_ground: false,
            facing: Facing::Right,
            lives,
        }
    }

    fn return_to_start(&mut self) {
        self.body = Body::at_rest(Rect::from_origin_and_size(PLAYER_START, PLAYER_SIZE));
        self.on_ground = false;
    }

    /// Displacement applied on the next frame.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Whether the player stood on a platform after the last frame.
    #[must_use]
    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Direction the player last ran in.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Lives the player has left.
    #[must_use]
    pub const fn lives(&self) -> u8 {
        self.lives
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        self.body.bounds
    }
}

/// Playable level holding every entity and the level score.
#[derive(Clone, Debug)]
pub struct Level {
    number: LevelNumber,
    tuning: Tuning,
    platforms: Vec<Platform>,
    coins: Vec<Coin>,
    enemies: Vec<Enemy>,
    goals: Vec<Goal>,
    player: Player,
    scatter: ScatterPlan,
    score: u32,
    completed: bool,
}

impl Level {
    /// Builds a fresh level with the player standing at the start position.
    ///
    /// Only the hand-placed geometry is created; randomly scattered coins and
    /// enemies described by [`Level::scatter`] arrive later through
    /// [`Level::spawn_coin`] and [`Level::spawn_enemy`].
    #[must_use]
    pub fn new(number: LevelNumber, lives: u8, tuning: &Tuning) -> Self {
        let layout = layouts::layout(number);
        let raised = number.theme().platform_surface();

        let [x, y, width, height] = GROUND;
        let mut platforms = vec![Platform {
            bounds: Rect::new(x, y, width, height),
            surface: Surface::Grass,
        }];
        platforms.extend(layout.platforms.iter().map(|&[x, y, width, height]| Platform {
            bounds: Rect::new(x, y, width, height),
            surface: raised,
        }));

        let coins = layout
            .coins
            .iter()
            .map(|&[x, y]| Coin {
                bounds: Rect::from_origin_and_size(Vec2::new(x, y), COIN_SIZE),
            })
            .collect();

        let [goal_x, goal_y] = layout.goal;
        let goals = vec![Goal {
            bounds: Rect::from_origin_and_size(Vec2::new(goal_x, goal_y), GOAL_SIZE),
        }];

        Self {
            number,
            tuning: tuning.clone(),
            platforms,
            coins,
            enemies: Vec::new(),
            goals,
            player: Player::spawn(lives),
            scatter: layout.scatter,
            score: 0,
            completed: false,
        }
    }

    /// Number of the level.
    #[must_use]
    pub const fn number(&self) -> LevelNumber {
        self.number
    }

    /// Solid platforms, ground first.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Coins that have not been collected yet.
    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Enemies that have not been stomped yet.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Goal flags of the level.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The player-controlled character.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Randomly placed entities the level expects.
    #[must_use]
    pub const fn scatter(&self) -> ScatterPlan {
        self.scatter
    }

    /// Points earned inside the level so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whether the player reached a goal.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Adds a coin with its upper-left corner at `origin`.
    pub fn spawn_coin(&mut self, origin: Vec2) -> Rect {
        let bounds = Rect::from_origin_and_size(origin, COIN_SIZE);
        self.coins.push(Coin { bounds });
        bounds
    }

    /// Adds an enemy with its upper-left corner at `origin`, walking right.
    pub fn spawn_enemy(&mut self, origin: Vec2) -> Rect {
        let bounds = Rect::from_origin_and_size(origin, ENEMY_SIZE);
        self.enemies.push(Enemy {
            bounds,
            heading: Facing::Right,
        });
        bounds
    }

    /// Launches the player upwards if they stand on a platform.
    ///
    /// Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.player.on_ground {
            return false;
        }
        self.player.body.velocity.y = self.tuning.jump_velocity;
        self.player.on_ground = false;
        true
    }

    /// Advances the level by one frame.
    ///
    /// The player moves first, then every enemy patrols, then coins, enemies
    /// and goals are checked against the player in that order. Losing the final
    /// life ends the frame immediately.
    pub fn update(&mut self, held: HeldKeys, out_events: &mut Vec<Event>) -> LevelStatus {
        match held.horizontal() {
            Some(facing) => {
                self.player.body.velocity.x = self.tuning.run_speed * facing.sign();
                self.player.facing = facing;
            }
            None => self.player.body.velocity.x = 0.0,
        }

        let contact = step_body(
            &mut self.player.body,
            self.tuning.gravity,
            &self.platforms,
            ARENA_WIDTH,
        );
        self.player.on_ground = contact.grounded();

        let patrol = Patrol {
            speed: self.tuning.enemy_speed,
            probe_drop: self.tuning.edge_probe_drop,
            arena_width: ARENA_WIDTH,
        };
        for enemy in &mut self.enemies {
            patrol.step(&mut enemy.bounds, &mut enemy.heading, &self.platforms);
        }

        self.collect_coins(out_events);

        if self.resolve_enemy_contacts(out_events) {
            return LevelStatus::GameOver;
        }

        let player = self.player.bounds();
        if self.goals.iter().any(|goal| goal.bounds.overlaps(&player)) {
            self.completed = true;
            info!("level {} completed with {} points", self.number.get(), self.score);
            return LevelStatus::Completed;
        }

        LevelStatus::Playing
    }

    fn collect_coins(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player.bounds();
        let before = self.coins.len();
        self.coins.retain(|coin| !coin.bounds.overlaps(&player));

        for _ in self.coins.len()..before {
            self.score = self.score.saturating_add(self.tuning.coin_value);
            debug!("coin collected, level score {}", self.score);
            out_events.push(Event::CoinCollected {
                level_score: self.score,
            });
        }
    }

    /// Returns `true` when the player ran out of lives.
    fn resolve_enemy_contacts(&mut self, out_events: &mut Vec<Event>) -> bool {
        let touching: Vec<usize> = overlapping(&self.player.body.bounds, &self.enemies).collect();
        let mut stomped: Vec<usize> = Vec::new();
        let mut out_of_lives = false;

        for index in touching {
            let enemy = self.enemies[index].bounds;
            // Every enemy touched this frame is judged, even after a hit sent
            // the player back to the start.
            let player = self.player.bounds();
            if self.player.body.velocity.y > 0.0 && player.bottom() < enemy.center().y {
                stomped.push(index);
                self.player.body.velocity.y = self.tuning.stomp_bounce();
                self.score = self.score.saturating_add(self.tuning.stomp_bonus);
                debug!("enemy stomped, level score {}", self.score);
                out_events.push(Event::EnemyStomped {
                    level_score: self.score,
                });
            } else {
                self.player.lives = self.player.lives.saturating_sub(1);
                self.player.return_to_start();
                info!("player hurt, {} lives remaining", self.player.lives);
                out_events.push(Event::PlayerHurt {
                    lives_remaining: self.player.lives,
                });
                if self.player.lives == 0 {
                    out_of_lives = true;
                    break;
                }
            }
        }

        for index in stomped.into_iter().rev() {
            let _ = self.enemies.remove(index);
        }
        out_of_lives
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, origin: Vec2) {
        self.player.body.bounds.set_origin(origin);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pixel Quest engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! All coordinates are expressed in arena units: the origin sits in the
//! top-left corner, `x` grows to the right and `y` grows downwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Title presented by adapters when the experience boots.
pub const WINDOW_TITLE: &str = "Pixel Quest";

/// Width of the playable arena measured in world units.
pub const ARENA_WIDTH: f32 = 800.0;

/// Height of the playable arena measured in world units.
pub const ARENA_HEIGHT: f32 = 600.0;

/// Number of simulation frames advanced per second of wall-clock time.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Location where the player appears when a level starts or after a hit.
pub const PLAYER_START: Vec2 = Vec2::new(100.0, 300.0);

/// Bounding box dimensions of the player.
pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 50.0);

/// Bounding box dimensions of a patrolling enemy.
pub const ENEMY_SIZE: Vec2 = Vec2::new(30.0, 30.0);

/// Bounding box dimensions of a coin.
pub const COIN_SIZE: Vec2 = Vec2::new(15.0, 15.0);

/// Bounding box dimensions of a goal flag.
pub const GOAL_SIZE: Vec2 = Vec2::new(40.0, 60.0);

/// Describes the active top-level state of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// The player is choosing a level on the overworld map.
    Overworld,
    /// The player is inside a level.
    Level,
    /// The player ran out of lives.
    GameOver,
    /// The final castle level was cleared.
    Victory,
}

/// Result of advancing a level by a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    /// The level is still in progress.
    Playing,
    /// The player touched a goal.
    Completed,
    /// The player lost their final life.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by a single frame.
    Tick {
        /// Movement keys held down during the frame.
        held: HeldKeys,
    },
    /// Requests a jump from the player inside a level.
    Jump,
    /// Requests that the overworld cursor travel in the provided direction.
    Navigate {
        /// Direction pressed by the player.
        direction: Direction,
    },
    /// Enters the level bound to the current overworld node.
    Confirm,
    /// Abandons the active level and returns to the overworld.
    Cancel,
    /// Starts a fresh playthrough from a terminal screen.
    Restart,
    /// Asks the experience to shut down from a terminal screen.
    Quit,
    /// Places a coin into the active level.
    SpawnCoin {
        /// Upper-left corner of the coin.
        origin: Vec2,
    },
    /// Places a patrolling enemy into the active level.
    SpawnEnemy {
        /// Upper-left corner of the enemy.
        origin: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that the game entered a new top-level phase.
    PhaseChanged {
        /// Phase that became active after processing the command.
        phase: GamePhase,
    },
    /// Confirms that the overworld cursor moved between two nodes.
    CursorMoved {
        /// Node the cursor left.
        from: NodeId,
        /// Node the cursor now rests on.
        to: NodeId,
    },
    /// Confirms that a fresh level was constructed.
    LevelStarted {
        /// Level that was entered.
        level: LevelNumber,
        /// Number of randomly placed entities the level expects.
        scatter: ScatterPlan,
    },
    /// Confirms that an entity was added to the active level.
    EntitySpawned {
        /// Kind of entity that was added.
        kind: EntityKind,
        /// Bounding box of the new entity.
        bounds: Rect,
    },
    /// Reports that the player picked up a coin.
    CoinCollected {
        /// Level score after the pickup.
        level_score: u32,
    },
    /// Reports that the player defeated an enemy by landing on it.
    EnemyStomped {
        /// Level score after the stomp bonus.
        level_score: u32,
    },
    /// Reports that an enemy hurt the player.
    PlayerHurt {
        /// Lives the player has left after the hit.
        lives_remaining: u8,
    },
    /// Reports that the player reached the goal of a level.
    LevelCompleted {
        /// Level that was cleared.
        level: LevelNumber,
        /// Score earned inside the level.
        level_score: u32,
        /// Running score across the playthrough including this level.
        total_score: u32,
    },
    /// Reports that the player left a level before finishing it.
    LevelAbandoned {
        /// Level that was abandoned.
        level: LevelNumber,
    },
    /// Reports that an overworld node became traversable.
    NodeUnlocked {
        /// Node that was unlocked.
        node: NodeId,
    },
    /// Signals that the experience should shut down.
    QuitRequested,
}

/// Cardinal directions available on the overworld map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top of the screen.
    North,
    /// Towards the right edge of the screen.
    East,
    /// Towards the bottom of the screen.
    South,
    /// Towards the left edge of the screen.
    West,
}

impl Direction {
    /// Reports whether an offset between two points heads in this direction.
    ///
    /// Only the sign of the relevant axis is inspected, so a node far below
    /// and slightly to the right still matches [`Direction::East`].
    #[must_use]
    pub fn matches(self, offset: Vec2) -> bool {
        match self {
            Self::North => offset.y < 0.0,
            Self::East => offset.x > 0.0,
            Self::South => offset.y > 0.0,
            Self::West => offset.x < 0.0,
        }
    }
}

/// Horizontal orientation shared by the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// Heading towards decreasing `x`.
    Left,
    /// Heading towards increasing `x`.
    #[default]
    Right,
}

impl Facing {
    /// Unit multiplier applied to horizontal speeds.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Returns the opposite orientation.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Movement keys held during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct HeldKeys {
    /// Whether the left movement key is held.
    pub left: bool,
    /// Whether the right movement key is held.
    pub right: bool,
}

impl HeldKeys {
    /// No movement keys held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };

    /// Only the left movement key held.
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };

    /// Only the right movement key held.
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };

    /// Resolves the requested run direction. Left wins when both keys are held.
    #[must_use]
    pub const fn horizontal(self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle expressed in arena units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    origin: Vec2,
    size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its upper-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Constructs a rectangle from an origin point and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.x
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.y
    }

    /// Coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.origin.x
    }

    /// Coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    /// Coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.origin.y
    }

    /// Coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Moves the rectangle so its left edge sits at `x`.
    pub fn set_left(&mut self, x: f32) {
        self.origin.x = x;
    }

    /// Moves the rectangle so its right edge sits at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.origin.x = x - self.size.x;
    }

    /// Moves the rectangle so its top edge sits at `y`.
    pub fn set_top(&mut self, y: f32) {
        self.origin.y = y;
    }

    /// Moves the rectangle so its bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.origin.y = y - self.size.y;
    }

    /// Moves the rectangle so its upper-left corner sits at `origin`.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Shifts the rectangle by the provided offset.
    pub fn translate(&mut self, offset: Vec2) {
        self.origin += offset;
    }

    /// Returns a copy shifted by the provided offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.translate(offset);
        self
    }

    /// Reports whether the interiors of two rectangles intersect.
    ///
    /// Rectangles that merely share an edge do not overlap, so a body resting
    /// exactly on top of a platform is not considered colliding with it.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Capability shared by every entity that occupies space in a level.
pub trait Bounded {
    /// Bounding box currently occupied by the entity.
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Kinds of entities that populate a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player-controlled character.
    Player,
    /// Static solid geometry.
    Platform,
    /// Collectible worth points.
    Coin,
    /// Patrolling hazard.
    Enemy,
    /// Flag that finishes the level.
    Goal,
}

/// Material drawn on the top of a platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Green turf used by the ground and the first world.
    Grass,
    /// Desert sandstone.
    Sand,
    /// Pale sky-world cloud blocks.
    Cloud,
    /// Castle masonry.
    Stone,
}

/// Visual theme shared by every level of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    /// World 1.
    GrassLand,
    /// World 2.
    DesertHills,
    /// World 3.
    SkyWorld,
    /// World 4.
    IceLand,
}

impl Theme {
    /// Surface used by the raised platforms of the theme.
    #[must_use]
    pub const fn platform_surface(self) -> Surface {
        match self {
            Self::GrassLand => Surface::Grass,
            Self::DesertHills => Surface::Sand,
            Self::SkyWorld => Surface::Cloud,
            Self::IceLand => Surface::Stone,
        }
    }

    /// Whether drifting clouds are drawn behind the level.
    #[must_use]
    pub const fn has_clouds(self) -> bool {
        !matches!(self, Self::DesertHills)
    }
}

/// Identifier of a world grouping several overworld nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(u8);

impl WorldId {
    /// Creates a world identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Number of a playable level, always within `1..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelNumber(u8);

impl LevelNumber {
    /// First level of the campaign.
    pub const FIRST: Self = Self(1);

    /// Final castle level; clearing it wins the game.
    pub const FINAL: Self = Self(8);

    /// Creates a level number, rejecting values outside the campaign.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::FIRST.0 && value <= Self::FINAL.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Iterates every level of the campaign in order.
    pub fn all() -> impl Iterator<Item = LevelNumber> {
        (Self::FIRST.0..=Self::FINAL.0).map(Self)
    }

    /// Reports whether this is the final level.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.0 == Self::FINAL.0
    }

    /// Visual theme applied to the level.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        match self.0 {
            0..=3 => Theme::GrassLand,
            4..=5 => Theme::DesertHills,
            6..=7 => Theme::SkyWorld,
            _ => Theme::IceLand,
        }
    }
}

/// Unique identifier of an overworld node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Role an overworld node plays on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Entry node unlocked from the start.
    Start,
    /// Regular level.
    Normal,
    /// Boss level guarding a world.
    Boss,
    /// Final castle.
    Castle,
}

/// Number of randomly placed entities a level expects after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScatterPlan {
    /// Coins scattered across the arena.
    pub coins: u32,
    /// Enemies dropped onto the ground.
    pub enemies: u32,
}

impl ScatterPlan {
    /// Creates a scatter plan for the provided entity counts.
    #[must_use]
    pub const fn new(coins: u32, enemies: u32) -> Self {
        Self { coins, enemies }
    }

    /// Reports whether the plan requests no entities at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.coins == 0 && self.enemies == 0
    }
}

/// Physics and scoring knobs applied by the world.
///
/// Velocities are expressed in arena units per frame and accelerations in
/// arena units per frame squared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Downward acceleration added to the player's vertical velocity every frame.
    pub gravity: f32,
    /// Vertical velocity applied when jumping; negative values point upwards.
    pub jump_velocity: f32,
    /// Horizontal speed of the player while a movement key is held.
    pub run_speed: f32,
    /// Horizontal speed of patrolling enemies.
    pub enemy_speed: f32,
    /// Distance below an enemy probed for solid ground before each step.
    pub edge_probe_drop: f32,
    /// Points awarded per coin.
    pub coin_value: u32,
    /// Points awarded per stomped enemy.
    pub stomp_bonus: u32,
    /// Lives granted at the start of a playthrough.
    pub starting_lives: u8,
}

impl Tuning {
    /// Upward velocity applied after a successful stomp.
    #[must_use]
    pub fn stomp_bounce(&self) -> f32 {
        self.jump_velocity / 2.0
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_velocity: -12.0,
            run_speed: 5.0,
            enemy_speed: 2.0,
            edge_probe_drop: 5.0,
            coin_value: 10,
            stomp_bonus: 100,
            starting_lives: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangles_sharing_an_edge_do_not_overlap() {
        let floor = Rect::new(0.0, 560.0, 800.0, 40.0);
        let body = Rect::new(100.0, 510.0, 30.0, 50.0);
        assert!(!body.overlaps(&floor));

        let sunk = body.translated(Vec2::new(0.0, 0.5));
        assert!(sunk.overlaps(&floor));
        assert!(floor.overlaps(&sunk));
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut rect = Rect::new(10.0, 20.0, 30.0, 50.0);
        rect.set_right(100.0);
        rect.set_bottom(200.0);
        assert_eq!(rect.origin(), Vec2::new(70.0, 150.0));
        assert_eq!(rect.size(), Vec2::new(30.0, 50.0));
        assert_eq!(rect.center(), Vec2::new(85.0, 175.0));
    }

    #[test]
    fn level_numbers_outside_campaign_are_rejected() {
        assert!(LevelNumber::new(0).is_none());
        assert!(LevelNumber::new(9).is_none());
        assert_eq!(LevelNumber::all().count(), 8);
        assert!(LevelNumber::new(8).is_some_and(|level| level.is_final()));
    }

    #[test]
    fn level_themes_follow_world_boundaries() {
        let themes: Vec<Theme> = LevelNumber::all().map(|level| level.theme()).collect();
        assert_eq!(
            themes,
            vec![
                Theme::GrassLand,
                Theme::GrassLand,
                Theme::GrassLand,
                Theme::DesertHills,
                Theme::DesertHills,
                Theme::SkyWorld,
                Theme::SkyWorld,
                Theme::IceLand,
            ]
        );
        assert!(!Theme::DesertHills.has_clouds());
        assert!(Theme::IceLand.has_clouds());
    }

    #[test]
    fn left_key_wins_when_both_are_held() {
        let both = HeldKeys {
            left: true,
            right: true,
        };
        assert_eq!(both.horizontal(), Some(Facing::Left));
        assert_eq!(HeldKeys::RIGHT.horizontal(), Some(Facing::Right));
        assert_eq!(HeldKeys::NONE.horizontal(), None);
    }

    #[test]
    fn direction_matching_uses_axis_sign_only() {
        let down_right = Vec2::new(75.0, 100.0);
        assert!(Direction::East.matches(down_right));
        assert!(Direction::South.matches(down_right));
        assert!(!Direction::West.matches(down_right));
        assert!(!Direction::North.matches(down_right));
    }

    #[test]
    fn default_tuning_bounce_is_half_a_jump() {
        let tuning = Tuning::default();
        assert!((tuning.stomp_bounce() - -6.0).abs() < f32::EPSILON);
    }
}

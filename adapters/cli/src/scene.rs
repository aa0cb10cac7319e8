//! Translates world queries into drawable scenes.

use glam::Vec2;
use pixel_quest_core::{
    Bounded, GamePhase, NodeKind, Rect, Surface, Theme, ARENA_HEIGHT, ARENA_WIDTH,
};
use pixel_quest_rendering::{Color, Scene, Shape, TextAnchor};
use pixel_quest_system_hud::Hud;
use pixel_quest_world::{query, Level, OverworldMap, World};
use std::time::Duration;

const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
const RED: Color = Color::from_rgb_u8(255, 0, 0);
const GREEN: Color = Color::from_rgb_u8(0, 168, 0);
const DARK_GREEN: Color = Color::from_rgb_u8(0, 100, 0);
const BLUE: Color = Color::from_rgb_u8(0, 0, 255);
const YELLOW: Color = Color::from_rgb_u8(255, 255, 0);
const GRAY: Color = Color::from_rgb_u8(150, 150, 150);
const LIGHT_BLUE: Color = Color::from_rgb_u8(173, 216, 230);
const PURPLE: Color = Color::from_rgb_u8(200, 0, 200);
const BROWN: Color = Color::from_rgb_u8(180, 122, 48);
const GOLD: Color = Color::from_rgb_u8(255, 215, 0);
const TEXTURE: Color = Color::from_rgb_u8(0, 128, 0);

const NODE_RADIUS: f32 = 20.0;
const CURSOR_RADIUS: f32 = 15.0;
const TEXTURE_SPACING: f32 = 10.0;

/// Rewrites `scene` so it shows the current phase of `world`.
pub(crate) fn populate(scene: &mut Scene, world: &World, hud: &Hud, elapsed: Duration) {
    match query::phase(world) {
        GamePhase::Overworld => overworld(scene, world, hud),
        GamePhase::Level => match query::level(world) {
            Some(level) => level_scene(scene, level, world, hud, elapsed),
            None => scene.reset(BLACK),
        },
        GamePhase::GameOver => end_screen(scene, world, hud, BLACK, RED),
        GamePhase::Victory => end_screen(scene, world, hud, DARK_GREEN, YELLOW),
    }
}

fn overworld(scene: &mut Scene, world: &World, hud: &Hud) {
    scene.reset(LIGHT_BLUE);
    scene.draw(
        Shape::Rectangle(Rect::new(0.0, ARENA_HEIGHT - 100.0, ARENA_WIDTH, 100.0)),
        Color::from_rgb_u8(100, 200, 100),
    );

    let centre = ARENA_WIDTH / 2.0;
    scene.write(hud.title(), Vec2::new(centre, 20.0), 48.0, RED, TextAnchor::TopCenter);
    scene.write(
        hud.world_banner(world),
        Vec2::new(centre, 70.0),
        48.0,
        BLUE,
        TextAnchor::TopCenter,
    );

    map(scene, query::overworld(world));

    for (index, line) in hud.overworld_lines(world).into_iter().enumerate() {
        let y = ARENA_HEIGHT - 120.0 + index as f32 * 25.0;
        scene.write(line, Vec2::new(10.0, y), 24.0, BLACK, TextAnchor::TopLeft);
    }
}

fn map(scene: &mut Scene, overworld: &OverworldMap) {
    for (from, to) in overworld.visible_edges() {
        if let (Some(from), Some(to)) = (overworld.node(from), overworld.node(to)) {
            scene.draw(
                Shape::Line {
                    from: from.position(),
                    to: to.position(),
                    thickness: 5.0,
                },
                BROWN,
            );
        }
    }

    for node in overworld.nodes() {
        if !overworld.is_unlocked(node.id()) {
            continue;
        }
        let fill = match node.kind() {
            NodeKind::Start => GREEN,
            NodeKind::Boss => RED,
            NodeKind::Castle => PURPLE,
            NodeKind::Normal if node.is_completed() => YELLOW,
            NodeKind::Normal => BLUE,
        };
        let border = if node.is_completed() { DARK_GREEN } else { BLACK };
        let center = node.position();
        scene.draw(
            Shape::Circle {
                center,
                radius: NODE_RADIUS,
            },
            fill,
        );
        scene.draw(
            Shape::Ring {
                center,
                radius: NODE_RADIUS,
                thickness: 2.0,
            },
            border,
        );
        scene.write(
            node.level().get().to_string(),
            center - Vec2::new(5.0, 8.0),
            24.0,
            WHITE,
            TextAnchor::TopLeft,
        );
    }

    let cursor = overworld.cursor();
    scene.draw(
        Shape::Circle {
            center: cursor,
            radius: CURSOR_RADIUS,
        },
        RED,
    );
    scene.draw(
        Shape::Ring {
            center: cursor,
            radius: CURSOR_RADIUS,
            thickness: 2.0,
        },
        RED.lighten(100.0 / 255.0),
    );
}

fn level_scene(scene: &mut Scene, level: &Level, world: &World, hud: &Hud, elapsed: Duration) {
    let theme = level.number().theme();
    scene.reset(background(theme));

    if theme.has_clouds() {
        clouds(scene, elapsed);
    }

    for platform in level.platforms() {
        let bounds = platform.bounds();
        scene.draw(Shape::Rectangle(bounds), surface(platform.surface()));
        texture(scene, bounds);
    }
    for coin in level.coins() {
        let center = coin.bounds().origin() + Vec2::splat(7.0);
        scene.draw(Shape::Circle { center, radius: 7.0 }, YELLOW);
        scene.draw(
            Shape::Circle { center, radius: 5.0 },
            Color::from_rgb_u8(200, 200, 0),
        );
    }
    for enemy in level.enemies() {
        walker(scene, enemy.bounds());
    }
    for goal in level.goals() {
        flag(scene, goal.bounds());
    }
    hero(scene, level.player().bounds());

    for (index, line) in hud.level_lines(world).into_iter().enumerate() {
        let position = Vec2::new(10.0, 10.0 + index as f32 * 40.0);
        scene.write(line, position, 36.0, WHITE, TextAnchor::TopLeft);
    }
}

fn background(theme: Theme) -> Color {
    match theme {
        Theme::GrassLand => Color::from_rgb_u8(107, 140, 255),
        Theme::DesertHills => Color::from_rgb_u8(255, 220, 150),
        Theme::SkyWorld => LIGHT_BLUE,
        Theme::IceLand => Color::from_rgb_u8(200, 230, 255),
    }
}

fn surface(surface: Surface) -> Color {
    match surface {
        Surface::Grass => GREEN,
        Surface::Sand => Color::from_rgb_u8(210, 180, 140),
        Surface::Cloud => Color::from_rgb_u8(200, 200, 255),
        Surface::Stone => GRAY,
    }
}

fn clouds(scene: &mut Scene, elapsed: Duration) {
    let drift = elapsed.as_millis() / 100;
    for index in 0..5u32 {
        let x = ((u128::from(index) * 200 + drift) % 1000) as f32 - 100.0;
        let y = 50.0 + index as f32 * 30.0;
        for puff in [
            Rect::new(x, y, 100.0, 40.0),
            Rect::new(x + 20.0, y - 20.0, 80.0, 40.0),
            Rect::new(x + 40.0, y + 10.0, 60.0, 40.0),
        ] {
            scene.draw(Shape::Ellipse(puff), WHITE);
        }
    }
}

/// Thin grid lines every ten units across a platform.
fn texture(scene: &mut Scene, bounds: Rect) {
    let steps = |extent: f32| {
        (0..)
            .map(|step| step as f32 * TEXTURE_SPACING)
            .take_while(move |offset| *offset < extent)
    };
    for offset in steps(bounds.width()) {
        let x = bounds.left() + offset;
        scene.draw(
            Shape::Line {
                from: Vec2::new(x, bounds.top()),
                to: Vec2::new(x, bounds.bottom()),
                thickness: 1.0,
            },
            TEXTURE,
        );
    }
    for offset in steps(bounds.height()) {
        let y = bounds.top() + offset;
        scene.draw(
            Shape::Line {
                from: Vec2::new(bounds.left(), y),
                to: Vec2::new(bounds.right(), y),
                thickness: 1.0,
            },
            TEXTURE,
        );
    }
}

fn walker(scene: &mut Scene, bounds: Rect) {
    let origin = bounds.origin();
    scene.draw(Shape::Rectangle(bounds), Color::from_rgb_u8(150, 75, 0));
    for eye in [Vec2::new(8.0, 10.0), Vec2::new(22.0, 10.0)] {
        let center = origin + eye;
        scene.draw(Shape::Circle { center, radius: 5.0 }, WHITE);
        scene.draw(Shape::Circle { center, radius: 2.0 }, BLACK);
    }
}

fn flag(scene: &mut Scene, bounds: Rect) {
    let origin = bounds.origin();
    scene.draw(Shape::Rectangle(bounds), GOLD);
    scene.draw(
        Shape::Rectangle(Rect::new(origin.x + 15.0, origin.y, 10.0, 60.0)),
        GRAY,
    );
    scene.draw(
        Shape::Triangle {
            a: origin + Vec2::new(25.0, 10.0),
            b: origin + Vec2::new(25.0, 30.0),
            c: origin + Vec2::new(40.0, 20.0),
        },
        RED,
    );
}

fn hero(scene: &mut Scene, bounds: Rect) {
    let origin = bounds.origin();
    scene.draw(Shape::Rectangle(bounds), RED);
    scene.draw(
        Shape::Rectangle(Rect::new(origin.x + 5.0, origin.y + 5.0, 20.0, 15.0)),
        Color::from_rgb_u8(255, 200, 150),
    );
    scene.draw(
        Shape::Rectangle(Rect::new(origin.x, origin.y + 30.0, 30.0, 20.0)),
        BLUE,
    );
}

fn end_screen(scene: &mut Scene, world: &World, hud: &Hud, background: Color, accent: Color) {
    scene.reset(background);
    let Some(screen) = hud.end_screen(world) else {
        return;
    };
    let centre = ARENA_WIDTH / 2.0;
    let middle = ARENA_HEIGHT / 2.0;
    scene.write(
        screen.headline,
        Vec2::new(centre, middle - 50.0),
        72.0,
        accent,
        TextAnchor::TopCenter,
    );
    scene.write(
        screen.score_line,
        Vec2::new(centre, middle + 50.0),
        36.0,
        WHITE,
        TextAnchor::TopCenter,
    );
    scene.write(
        screen.hint,
        Vec2::new(centre, middle + 100.0),
        36.0,
        WHITE,
        TextAnchor::TopCenter,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_quest_core::{Command, HeldKeys, Tuning};
    use pixel_quest_rendering::Primitive;
    use pixel_quest_world as world;

    fn render(world: &World, elapsed: Duration) -> Scene {
        let mut scene = Scene::new(BLACK);
        populate(&mut scene, world, &Hud, elapsed);
        scene
    }

    fn labels(scene: &Scene) -> Vec<&str> {
        scene.labels.iter().map(|label| label.text.as_str()).collect()
    }

    #[test]
    fn overworld_shows_only_unlocked_nodes() {
        let world = World::new();
        let scene = render(&world, Duration::ZERO);

        assert_eq!(scene.background, LIGHT_BLUE);
        let texts = labels(&scene);
        assert_eq!(&texts[..2], &["PIXEL QUEST", "WORLD 1"]);
        assert!(texts.contains(&"Total Score: 0"));

        let start = query::overworld(&world).cursor();
        let node_fills: Vec<&Primitive> = scene
            .primitives
            .iter()
            .filter(|primitive| {
                primitive.shape
                    == Shape::Circle {
                        center: start,
                        radius: NODE_RADIUS,
                    }
            })
            .collect();
        assert_eq!(node_fills.len(), 1);
        assert_eq!(node_fills[0].color, GREEN);

        let rings = scene
            .primitives
            .iter()
            .filter(|primitive| matches!(primitive.shape, Shape::Ring { radius, .. } if radius == NODE_RADIUS))
            .count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn level_scene_draws_hud_and_drifting_clouds() {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::Confirm, &mut events);

        let early = render(&world, Duration::ZERO);
        let later = render(&world, Duration::from_secs(1));

        assert_eq!(early.background, Color::from_rgb_u8(107, 140, 255));
        assert_eq!(labels(&early), vec!["Level: 1", "Score: 0", "Lives: 3"]);
        assert_eq!(
            early.primitives[0],
            Primitive {
                shape: Shape::Ellipse(Rect::new(-100.0, 50.0, 100.0, 40.0)),
                color: WHITE,
            }
        );
        assert_eq!(
            later.primitives[0].shape,
            Shape::Ellipse(Rect::new(-90.0, 50.0, 100.0, 40.0))
        );
        assert_eq!(early.primitives.len(), later.primitives.len());
    }

    #[test]
    fn game_over_screen_is_black_with_red_headline() {
        let mut world = World::with_tuning(Tuning {
            starting_lives: 1,
            ..Tuning::default()
        });
        let mut events = Vec::new();
        world::apply(&mut world, Command::Confirm, &mut events);
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                origin: Vec2::new(100.0, 310.0),
            },
            &mut events,
        );
        world::apply(
            &mut world,
            Command::Tick {
                held: HeldKeys::NONE,
            },
            &mut events,
        );

        let scene = render(&world, Duration::ZERO);

        assert_eq!(scene.background, BLACK);
        assert!(scene.primitives.is_empty());
        assert_eq!(scene.labels[0].text, "GAME OVER");
        assert_eq!(scene.labels[0].color, RED);
        assert_eq!(scene.labels[0].anchor, TextAnchor::TopCenter);
        assert_eq!(scene.labels[1].text, "Final Score: 0");
    }

    #[test]
    fn texture_lines_cover_the_platform() {
        let mut scene = Scene::new(BLACK);
        texture(&mut scene, Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(scene.primitives.len(), 3 + 2);
    }
}

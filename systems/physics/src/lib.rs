#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic frame-step physics for Pixel Quest bodies.
//!
//! Every function in this crate is pure with respect to its arguments: the
//! caller owns the bodies and the list of solids, and the same inputs always
//! produce the same outputs. Collisions are resolved with a direct sweep over
//! every solid on every frame; levels hold a few dozen rectangles at most.
//!
//! Horizontal and vertical movement are resolved in two independent passes.
//! The body first moves along `x` and is pushed out of anything it entered,
//! then moves along `y` and is pushed out again. Bodies clipping the exact
//! corner of a platform can therefore snap to the side instead of the top.

use glam::Vec2;
use pixel_quest_core::{Bounded, Facing, Rect};

/// Kinematic body integrated by [`step_body`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Body {
    /// Bounding box occupied by the body.
    pub bounds: Rect,
    /// Displacement applied on the next frame.
    pub velocity: Vec2,
}

impl Body {
    /// Creates a body at rest occupying the provided bounds.
    #[must_use]
    pub const fn at_rest(bounds: Rect) -> Self {
        Self {
            bounds,
            velocity: Vec2::ZERO,
        }
    }
}

/// Outcome of resolving the vertical pass against the solids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalContact {
    /// The body did not touch anything vertically.
    #[default]
    Airborne,
    /// The body landed on top of a solid.
    Landed,
    /// The body struck the underside of a solid.
    HitCeiling,
}

/// Contacts observed while stepping a body by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Contact {
    /// Whether the horizontal pass pushed the body out of a solid.
    pub blocked: bool,
    /// Result of the vertical pass.
    pub vertical: VerticalContact,
}

impl Contact {
    /// Whether a solid supports the body after the step.
    #[must_use]
    pub const fn grounded(&self) -> bool {
        matches!(self.vertical, VerticalContact::Landed)
    }
}

/// Advances a body by a single frame under gravity.
///
/// Gravity is added to the vertical velocity before any movement. The body
/// then moves horizontally, is resolved against `solids`, moves vertically,
/// is resolved again, and is finally confined to `0..arena_width`.
pub fn step_body<P>(body: &mut Body, gravity: f32, solids: &[P], arena_width: f32) -> Contact
where
    P: Bounded,
{
    body.velocity.y += gravity;

    body.bounds.translate(Vec2::new(body.velocity.x, 0.0));
    let blocked = resolve_horizontal(&mut body.bounds, body.velocity.x, solids);

    body.bounds.translate(Vec2::new(0.0, body.velocity.y));
    let vertical = resolve_vertical(&mut body.bounds, &mut body.velocity.y, solids);

    confine_horizontally(&mut body.bounds, arena_width);

    Contact { blocked, vertical }
}

/// Pushes a body that just moved horizontally out of every solid it entered.
///
/// The moving edge is clamped to the opposite edge of each overlapping solid,
/// in declaration order. Solids that stopped overlapping after an earlier
/// clamp are skipped. A body with no horizontal velocity is never moved.
/// Returns whether any clamp happened.
pub fn resolve_horizontal<P>(bounds: &mut Rect, velocity_x: f32, solids: &[P]) -> bool
where
    P: Bounded,
{
    let mut resolved = false;
    for solid in solids {
        let solid = solid.bounds();
        if !bounds.overlaps(&solid) {
            continue;
        }

        if velocity_x > 0.0 {
            bounds.set_right(solid.left());
            resolved = true;
        } else if velocity_x < 0.0 {
            bounds.set_left(solid.right());
            resolved = true;
        }
    }
    resolved
}

/// Pushes a body that just moved vertically out of every solid it entered.
///
/// Falling bodies land on the solid's top edge, rising bodies are stopped at
/// its bottom edge; both cases zero the vertical velocity, so later solids in
/// the list no longer move the body along `y`.
pub fn resolve_vertical<P>(bounds: &mut Rect, velocity_y: &mut f32, solids: &[P]) -> VerticalContact
where
    P: Bounded,
{
    let mut contact = VerticalContact::Airborne;
    for solid in solids {
        let solid = solid.bounds();
        if !bounds.overlaps(&solid) {
            continue;
        }

        if *velocity_y > 0.0 {
            bounds.set_bottom(solid.top());
            *velocity_y = 0.0;
            contact = VerticalContact::Landed;
        } else if *velocity_y < 0.0 {
            bounds.set_top(solid.bottom());
            *velocity_y = 0.0;
            contact = VerticalContact::HitCeiling;
        }
    }
    contact
}

/// Keeps a body between the left and right arena walls.
pub fn confine_horizontally(bounds: &mut Rect, arena_width: f32) {
    if bounds.left() < 0.0 {
        bounds.set_left(0.0);
    }
    if bounds.right() > arena_width {
        bounds.set_right(arena_width);
    }
}

/// Parameters governing a patrolling walker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patrol {
    /// Horizontal distance covered per frame.
    pub speed: f32,
    /// Distance below the walker probed for solid ground.
    pub probe_drop: f32,
    /// Width of the arena the walker must stay inside.
    pub arena_width: f32,
}

impl Patrol {
    /// Advances a walker by one frame, turning it around at walls and ledges.
    ///
    /// The walker first moves `speed` units along its heading and reverses if
    /// it touched either arena wall. It then probes one further step ahead and
    /// `probe_drop` units down; when no solid overlaps the probe the walker
    /// reverses so it never walks off a ledge. Walkers are not affected by
    /// gravity.
    pub fn step<P>(&self, bounds: &mut Rect, heading: &mut Facing, solids: &[P])
    where
        P: Bounded,
    {
        bounds.translate(Vec2::new(self.speed * heading.sign(), 0.0));

        if bounds.right() >= self.arena_width || bounds.left() <= 0.0 {
            *heading = heading.reversed();
        }

        let probe = bounds.translated(Vec2::new(self.speed * heading.sign(), self.probe_drop));
        if !solids.iter().any(|solid| probe.overlaps(&solid.bounds())) {
            *heading = heading.reversed();
        }
    }
}

/// Indices of every entity in `others` overlapping `subject`, in order.
pub fn overlapping<'a, B>(subject: &'a Rect, others: &'a [B]) -> impl Iterator<Item = usize> + 'a
where
    B: Bounded,
{
    others
        .iter()
        .enumerate()
        .filter(move |(_, other)| subject.overlaps(&other.bounds()))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: f32 = 800.0;

    fn ground() -> Rect {
        Rect::new(0.0, 560.0, 800.0, 40.0)
    }

    #[test]
    fn falling_body_lands_on_ground() {
        let mut body = Body::at_rest(Rect::new(100.0, 509.0, 30.0, 50.0));
        body.velocity.y = 2.0;

        let contact = step_body(&mut body, 0.5, &[ground()], ARENA);

        assert!(contact.grounded());
        assert_eq!(body.bounds.bottom(), 560.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn resting_body_stays_grounded_every_frame() {
        let mut body = Body::at_rest(Rect::new(100.0, 510.0, 30.0, 50.0));
        for _ in 0..10 {
            let contact = step_body(&mut body, 0.5, &[ground()], ARENA);
            assert!(contact.grounded());
            assert_eq!(body.bounds.top(), 510.0);
        }
    }

    #[test]
    fn rising_body_bumps_ceiling() {
        let ceiling = Rect::new(0.0, 380.0, 200.0, 20.0);
        let mut body = Body::at_rest(Rect::new(50.0, 405.0, 30.0, 50.0));
        body.velocity.y = -12.0;

        let contact = step_body(&mut body, 0.5, &[ceiling], ARENA);

        assert_eq!(contact.vertical, VerticalContact::HitCeiling);
        assert_eq!(body.bounds.top(), 400.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn running_into_wall_clamps_leading_edge() {
        let wall = Rect::new(200.0, 400.0, 20.0, 200.0);
        let mut body = Body::at_rest(Rect::new(168.0, 450.0, 30.0, 50.0));
        body.velocity.x = 5.0;

        let contact = step_body(&mut body, 0.0, &[wall], ARENA);

        assert!(contact.blocked);
        assert_eq!(body.bounds.right(), 200.0);

        body.velocity.x = -5.0;
        body.bounds.set_left(222.0);
        let contact = step_body(&mut body, 0.0, &[wall], ARENA);
        assert!(contact.blocked);
        assert_eq!(body.bounds.left(), 220.0);
    }

    #[test]
    fn arena_walls_confine_body() {
        let mut body = Body::at_rest(Rect::new(2.0, 0.0, 30.0, 50.0));
        body.velocity.x = -5.0;
        let _ = step_body::<Rect>(&mut body, 0.0, &[], ARENA);
        assert_eq!(body.bounds.left(), 0.0);

        body.bounds.set_right(798.0);
        body.velocity.x = 5.0;
        let _ = step_body::<Rect>(&mut body, 0.0, &[], ARENA);
        assert_eq!(body.bounds.right(), ARENA);
    }

    #[test]
    fn patrol_turns_at_ledge() {
        let ledge = Rect::new(100.0, 450.0, 100.0, 20.0);
        let patrol = Patrol {
            speed: 2.0,
            probe_drop: 5.0,
            arena_width: ARENA,
        };
        let mut bounds = Rect::new(194.0, 420.0, 30.0, 30.0);
        let mut heading = Facing::Right;

        patrol.step(&mut bounds, &mut heading, &[ledge]);
        assert_eq!(bounds.left(), 196.0);
        assert_eq!(heading, Facing::Right);

        patrol.step(&mut bounds, &mut heading, &[ledge]);
        assert_eq!(bounds.left(), 198.0);
        assert_eq!(heading, Facing::Left, "probe past the ledge finds nothing");
    }

    #[test]
    fn patrol_turns_at_arena_wall() {
        let patrol = Patrol {
            speed: 2.0,
            probe_drop: 5.0,
            arena_width: ARENA,
        };
        let mut bounds = Rect::new(768.0, 530.0, 30.0, 30.0);
        let mut heading = Facing::Right;

        patrol.step(&mut bounds, &mut heading, &[ground()]);

        assert_eq!(bounds.right(), 800.0);
        assert_eq!(heading, Facing::Left);
    }

    #[test]
    fn overlapping_reports_indices_in_order() {
        let subject = Rect::new(0.0, 0.0, 10.0, 10.0);
        let others = [
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(-5.0, -5.0, 6.0, 6.0),
        ];
        let hits: Vec<usize> = overlapping(&subject, &others).collect();
        assert_eq!(hits, vec![0, 2]);
    }
}

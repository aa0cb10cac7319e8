use glam::Vec2;
use pixel_quest_core::{Facing, Rect};
use pixel_quest_system_physics::{
    resolve_horizontal, resolve_vertical, step_body, Body, Patrol, VerticalContact,
};
use proptest::prelude::*;

const BODY_WIDTH: i32 = 30;
const BODY_HEIGHT: i32 = 50;

fn platform() -> impl Strategy<Value = Rect> {
    (0i32..700, 100i32..500, 20i32..200, 10i32..40)
        .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
}

/// A platform paired with a body that intersects its interior.
fn overlapping_pair() -> impl Strategy<Value = (Rect, Rect)> {
    platform().prop_flat_map(|solid| {
        let left = solid.left() as i32;
        let right = solid.right() as i32;
        let top = solid.top() as i32;
        let bottom = solid.bottom() as i32;
        (
            Just(solid),
            (left - BODY_WIDTH + 1)..right,
            (top - BODY_HEIGHT + 1)..bottom,
        )
            .prop_map(|(solid, x, y)| {
                (
                    solid,
                    Rect::new(x as f32, y as f32, BODY_WIDTH as f32, BODY_HEIGHT as f32),
                )
            })
    })
}

fn nonzero_speed() -> impl Strategy<Value = f32> {
    prop_oneof![(1i32..=24), (-24i32..=-1)].prop_map(|half_units| half_units as f32 * 0.5)
}

proptest! {
    #[test]
    fn horizontal_resolution_leaves_no_overlap(
        (solid, mut bounds) in overlapping_pair(),
        velocity_x in nonzero_speed(),
    ) {
        prop_assume!(bounds.overlaps(&solid));
        let top = bounds.top();

        prop_assert!(resolve_horizontal(&mut bounds, velocity_x, &[solid]));
        prop_assert!(!bounds.overlaps(&solid));
        prop_assert_eq!(bounds.top(), top);
        if velocity_x > 0.0 {
            prop_assert_eq!(bounds.right(), solid.left());
        } else {
            prop_assert_eq!(bounds.left(), solid.right());
        }
    }

    #[test]
    fn vertical_resolution_leaves_no_overlap(
        (solid, mut bounds) in overlapping_pair(),
        velocity_y in nonzero_speed(),
    ) {
        prop_assume!(bounds.overlaps(&solid));
        let mut velocity = velocity_y;
        let left = bounds.left();

        let contact = resolve_vertical(&mut bounds, &mut velocity, &[solid]);

        prop_assert!(!bounds.overlaps(&solid));
        prop_assert_eq!(velocity, 0.0);
        prop_assert_eq!(bounds.left(), left);
        if velocity_y > 0.0 {
            prop_assert_eq!(contact, VerticalContact::Landed);
            prop_assert_eq!(bounds.bottom(), solid.top());
        } else {
            prop_assert_eq!(contact, VerticalContact::HitCeiling);
            prop_assert_eq!(bounds.top(), solid.bottom());
        }
    }

    #[test]
    fn stepped_body_stays_inside_arena(
        x in 0i32..770,
        velocity_x in nonzero_speed(),
        frames in 1usize..120,
    ) {
        let ground = Rect::new(0.0, 560.0, 800.0, 40.0);
        let mut body = Body::at_rest(Rect::new(x as f32, 300.0, 30.0, 50.0));
        for _ in 0..frames {
            body.velocity.x = velocity_x;
            let _ = step_body(&mut body, 0.5, &[ground], 800.0);
            prop_assert!(body.bounds.left() >= 0.0);
            prop_assert!(body.bounds.right() <= 800.0);
            prop_assert!(!body.bounds.overlaps(&ground));
        }
    }

    #[test]
    fn patrolling_walker_never_leaves_wide_ledge(
        start in 60i32..600,
        heading_right in any::<bool>(),
        frames in 1usize..400,
    ) {
        let ledge = Rect::new(50.0, 450.0, 600.0, 20.0);
        let patrol = Patrol {
            speed: 2.0,
            probe_drop: 5.0,
            arena_width: 800.0,
        };
        let mut bounds = Rect::new(start as f32, 420.0, 30.0, 30.0);
        let mut heading = if heading_right { Facing::Right } else { Facing::Left };
        for _ in 0..frames {
            patrol.step(&mut bounds, &mut heading, &[ledge]);
            let support = bounds.translated(Vec2::new(0.0, 5.0));
            prop_assert!(support.overlaps(&ledge));
        }
    }
}

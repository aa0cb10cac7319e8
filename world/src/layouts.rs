//! Hand-authored geometry for every level of the campaign.

use pixel_quest_core::{LevelNumber, ScatterPlan};

/// Ground slab shared by every level.
pub(crate) const GROUND: [f32; 4] = [0.0, 560.0, 800.0, 40.0];

/// Static content of a single level.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Layout {
    /// Raised platforms as `[x, y, width, height]`.
    pub(crate) platforms: &'static [[f32; 4]],
    /// Coins placed at fixed positions.
    pub(crate) coins: &'static [[f32; 2]],
    /// Upper-left corner of the goal flag.
    pub(crate) goal: [f32; 2],
    /// Randomly placed entities requested after construction.
    pub(crate) scatter: ScatterPlan,
}

const LEVEL_1_PLATFORMS: &[[f32; 4]] = &[
    [100.0, 450.0, 200.0, 20.0],
    [400.0, 400.0, 150.0, 20.0],
    [200.0, 350.0, 100.0, 20.0],
    [500.0, 300.0, 200.0, 20.0],
];

const LEVEL_1_COINS: &[[f32; 2]] = &[
    [150.0, 400.0],
    [450.0, 350.0],
    [250.0, 300.0],
    [550.0, 250.0],
];

const LEVEL_2_PLATFORMS: &[[f32; 4]] = &[
    [100.0, 450.0, 200.0, 20.0],
    [400.0, 400.0, 150.0, 20.0],
    [200.0, 350.0, 100.0, 20.0],
    [500.0, 300.0, 200.0, 20.0],
    [100.0, 250.0, 150.0, 20.0],
];

const LEVEL_3_PLATFORMS: &[[f32; 4]] = &[
    [0.0, 450.0, 150.0, 20.0],
    [250.0, 450.0, 150.0, 20.0],
    [500.0, 450.0, 150.0, 20.0],
    [100.0, 350.0, 150.0, 20.0],
    [350.0, 350.0, 150.0, 20.0],
    [600.0, 350.0, 150.0, 20.0],
    [200.0, 250.0, 150.0, 20.0],
    [450.0, 250.0, 150.0, 20.0],
];

const LEVEL_4_PLATFORMS: &[[f32; 4]] = &[
    [100.0, 450.0, 200.0, 20.0],
    [150.0, 350.0, 100.0, 20.0],
    [200.0, 250.0, 100.0, 20.0],
    [500.0, 450.0, 200.0, 20.0],
    [450.0, 350.0, 100.0, 20.0],
    [400.0, 250.0, 100.0, 20.0],
    [300.0, 150.0, 200.0, 20.0],
];

const LEVEL_5_PLATFORMS: &[[f32; 4]] = &[
    [0.0, 450.0, 100.0, 20.0],
    [150.0, 450.0, 100.0, 20.0],
    [300.0, 450.0, 100.0, 20.0],
    [450.0, 450.0, 100.0, 20.0],
    [600.0, 450.0, 100.0, 20.0],
    [50.0, 350.0, 100.0, 20.0],
    [250.0, 350.0, 100.0, 20.0],
    [450.0, 350.0, 100.0, 20.0],
    [650.0, 350.0, 100.0, 20.0],
    [100.0, 250.0, 100.0, 20.0],
    [350.0, 250.0, 100.0, 20.0],
    [600.0, 250.0, 100.0, 20.0],
];

const LEVEL_6_PLATFORMS: &[[f32; 4]] = &[
    [100.0, 450.0, 200.0, 20.0],
    [400.0, 400.0, 150.0, 20.0],
    [200.0, 350.0, 100.0, 20.0],
    [500.0, 300.0, 200.0, 20.0],
    [100.0, 250.0, 150.0, 20.0],
    [350.0, 200.0, 100.0, 20.0],
    [600.0, 150.0, 100.0, 20.0],
];

const LEVEL_7_PLATFORMS: &[[f32; 4]] = &[
    [0.0, 450.0, 150.0, 20.0],
    [250.0, 450.0, 150.0, 20.0],
    [500.0, 450.0, 150.0, 20.0],
    [100.0, 350.0, 150.0, 20.0],
    [350.0, 350.0, 150.0, 20.0],
    [600.0, 350.0, 150.0, 20.0],
    [200.0, 250.0, 150.0, 20.0],
    [450.0, 250.0, 150.0, 20.0],
    [300.0, 150.0, 150.0, 20.0],
];

const LEVEL_8_PLATFORMS: &[[f32; 4]] = &[
    [0.0, 450.0, 100.0, 20.0],
    [150.0, 450.0, 100.0, 20.0],
    [300.0, 450.0, 100.0, 20.0],
    [450.0, 450.0, 100.0, 20.0],
    [600.0, 450.0, 100.0, 20.0],
    [700.0, 450.0, 100.0, 20.0],
    [50.0, 350.0, 100.0, 20.0],
    [250.0, 350.0, 100.0, 20.0],
    [450.0, 350.0, 100.0, 20.0],
    [650.0, 350.0, 100.0, 20.0],
    [100.0, 250.0, 100.0, 20.0],
    [350.0, 250.0, 100.0, 20.0],
    [600.0, 250.0, 100.0, 20.0],
    [200.0, 150.0, 100.0, 20.0],
    [500.0, 150.0, 100.0, 20.0],
    [350.0, 50.0, 100.0, 20.0],
];

/// Looks up the static layout of a level.
pub(crate) const fn layout(level: LevelNumber) -> Layout {
    match level.get() {
        1 => Layout {
            platforms: LEVEL_1_PLATFORMS,
            coins: LEVEL_1_COINS,
            goal: [700.0, 340.0],
            scatter: ScatterPlan::new(0, 0),
        },
        2 => Layout {
            platforms: LEVEL_2_PLATFORMS,
            coins: &[],
            goal: [700.0, 240.0],
            scatter: ScatterPlan::new(8, 2),
        },
        3 => Layout {
            platforms: LEVEL_3_PLATFORMS,
            coins: &[],
            goal: [700.0, 200.0],
            scatter: ScatterPlan::new(10, 3),
        },
        4 => Layout {
            platforms: LEVEL_4_PLATFORMS,
            coins: &[],
            goal: [350.0, 100.0],
            scatter: ScatterPlan::new(12, 4),
        },
        5 => Layout {
            platforms: LEVEL_5_PLATFORMS,
            coins: &[],
            goal: [700.0, 200.0],
            scatter: ScatterPlan::new(15, 5),
        },
        6 => Layout {
            platforms: LEVEL_6_PLATFORMS,
            coins: &[],
            goal: [650.0, 100.0],
            scatter: ScatterPlan::new(10, 3),
        },
        7 => Layout {
            platforms: LEVEL_7_PLATFORMS,
            coins: &[],
            goal: [700.0, 100.0],
            scatter: ScatterPlan::new(12, 4),
        },
        _ => Layout {
            platforms: LEVEL_8_PLATFORMS,
            coins: &[],
            goal: [370.0, 10.0],
            scatter: ScatterPlan::new(20, 6),
        },
    }
}

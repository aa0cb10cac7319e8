#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system deriving the text shown on top of the Pixel Quest screens.

use pixel_quest_core::{GamePhase, WINDOW_TITLE};
use pixel_quest_world::{query, World};

const OVERWORLD_INSTRUCTIONS: [&str; 3] = [
    "Use ARROWS to move between levels",
    "Press ENTER to start a level",
    "Press ESC in level to return to overworld",
];

/// Text displayed on the game over and victory screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndScreen {
    /// Large headline announcing the outcome.
    pub headline: &'static str,
    /// Score banked over the playthrough.
    pub score_line: String,
    /// Keys available from the screen.
    pub hint: &'static str,
}

/// Produces the text required to annotate every screen.
#[derive(Debug, Default)]
pub struct Hud;

impl Hud {
    /// Title printed at the top of the overworld.
    #[must_use]
    pub fn title(&self) -> String {
        WINDOW_TITLE.to_uppercase()
    }

    /// Banner naming the world the overworld cursor sits in.
    #[must_use]
    pub fn world_banner(&self, world: &World) -> String {
        format!("WORLD {}", query::overworld(world).current_world().get())
    }

    /// Instructions and playthrough totals listed below the overworld map.
    #[must_use]
    pub fn overworld_lines(&self, world: &World) -> Vec<String> {
        OVERWORLD_INSTRUCTIONS
            .iter()
            .map(|line| (*line).to_owned())
            .chain([
                format!("Total Score: {}", query::total_score(world)),
                format!("Lives: {}", query::player_lives(world)),
            ])
            .collect()
    }

    /// Level number, level score and lives shown while playing.
    ///
    /// Empty when no level is active.
    #[must_use]
    pub fn level_lines(&self, world: &World) -> Vec<String> {
        let Some(level) = query::level(world) else {
            return Vec::new();
        };
        vec![
            format!("Level: {}", level.number().get()),
            format!("Score: {}", level.score()),
            format!("Lives: {}", level.player().lives()),
        ]
    }

    /// Text of the terminal screen, if the game reached one.
    #[must_use]
    pub fn end_screen(&self, world: &World) -> Option<EndScreen> {
        let (headline, hint) = match query::phase(world) {
            GamePhase::GameOver => ("GAME OVER", "Press R to Restart or Q to Quit"),
            GamePhase::Victory => ("VICTORY!", "Press R to Play Again or Q to Quit"),
            GamePhase::Overworld | GamePhase::Level => return None,
        };
        Some(EndScreen {
            headline,
            score_line: format!("Final Score: {}", query::total_score(world)),
            hint,
        })
    }
}

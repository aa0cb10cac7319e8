//! Fixed-step driver feeding frame input into the world.

use log::info;
use pixel_quest_core::{Command, Direction, Event, HeldKeys};
use pixel_quest_rendering::{FrameControl, FrameInput, Press};
use pixel_quest_system_spawning::Spawning;
use pixel_quest_world::{self as world, World};
use std::{collections::VecDeque, time::Duration};

/// Duration of a single simulation step.
pub(crate) const SIM_DT: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Upper bound on steps taken per rendered frame so a stalled window does not
/// trigger a burst of catch-up frames.
const MAX_SUBSTEPS: u32 = 5;

/// Owns the world and every system reacting to it.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    spawning: Spawning,
    accumulator: Duration,
    elapsed: Duration,
    events: Vec<Event>,
    commands: Vec<Command>,
    quit_requested: bool,
}

impl Simulation {
    pub(crate) fn new(world: World, spawning: Spawning) -> Self {
        Self {
            world,
            spawning,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            events: Vec::new(),
            commands: Vec::new(),
            quit_requested: false,
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Simulated time since the driver started.
    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies the frame's key presses, then runs as many fixed steps as the
    /// wall-clock time allows.
    pub(crate) fn advance(&mut self, frame_dt: Duration, input: &FrameInput) -> FrameControl {
        for command in discrete_commands(input) {
            self.execute(command);
        }

        self.accumulator = (self.accumulator + frame_dt).min(SIM_DT * MAX_SUBSTEPS);
        let held = HeldKeys {
            left: input.held_left,
            right: input.held_right,
        };
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            self.elapsed += SIM_DT;
            self.execute(Command::Tick { held });
        }

        if self.quit_requested {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    }

    fn execute(&mut self, command: Command) {
        let mut pending = VecDeque::from([command]);
        while let Some(command) = pending.pop_front() {
            self.events.clear();
            world::apply(&mut self.world, command, &mut self.events);

            if self.events.contains(&Event::QuitRequested) {
                info!("quit requested");
                self.quit_requested = true;
            }

            self.commands.clear();
            self.spawning.handle(&self.events, &mut self.commands);
            pending.extend(self.commands.drain(..));
        }
    }
}

fn discrete_commands(input: &FrameInput) -> impl Iterator<Item = Command> + '_ {
    input.presses.iter().map(|press| match press {
        Press::Up => Command::Navigate {
            direction: Direction::North,
        },
        Press::Down => Command::Navigate {
            direction: Direction::South,
        },
        Press::Left => Command::Navigate {
            direction: Direction::West,
        },
        Press::Right => Command::Navigate {
            direction: Direction::East,
        },
        Press::Jump => Command::Jump,
        Press::Confirm => Command::Confirm,
        Press::Cancel => Command::Cancel,
        Press::Restart => Command::Restart,
        Press::Quit => Command::Quit,
    })
}

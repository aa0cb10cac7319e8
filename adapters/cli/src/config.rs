//! Loading and validation of the TOML tuning file.

use pixel_quest_core::Tuning;
use std::{fs, io, path::Path};
use thiserror::Error;

/// Problems encountered while turning a tuning file into [`Tuning`].
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read tuning file")]
    Read(#[from] io::Error),
    /// The file is not valid TOML or names unknown keys.
    #[error("failed to parse tuning file")]
    Parse(#[from] toml::de::Error),
    /// A speed or acceleration was zero, negative or not a number.
    #[error("`{field}` must be positive (received {value})")]
    NotPositive {
        /// Offending key.
        field: &'static str,
        /// Value found in the file.
        value: f32,
    },
    /// Jumping would not move the player upwards.
    #[error("`jump_velocity` must be negative (received {0})")]
    JumpNotUpward(f32),
    /// A playthrough needs at least one life.
    #[error("`starting_lives` must be at least 1")]
    NoLives,
}

/// Reads the tuning file at `path`, or returns the defaults when no path was given.
pub(crate) fn load(path: Option<&Path>) -> Result<Tuning, ConfigError> {
    match path {
        Some(path) => parse(&fs::read_to_string(path)?),
        None => Ok(Tuning::default()),
    }
}

/// Parses tuning overrides; keys missing from `source` keep their defaults.
pub(crate) fn parse(source: &str) -> Result<Tuning, ConfigError> {
    let tuning: Tuning = toml::from_str(source)?;
    validate(&tuning)?;
    Ok(tuning)
}

fn validate(tuning: &Tuning) -> Result<(), ConfigError> {
    for (field, value) in [
        ("gravity", tuning.gravity),
        ("run_speed", tuning.run_speed),
        ("enemy_speed", tuning.enemy_speed),
        ("edge_probe_drop", tuning.edge_probe_drop),
    ] {
        if !(value > 0.0) {
            return Err(ConfigError::NotPositive { field, value });
        }
    }

    if !(tuning.jump_velocity < 0.0) {
        return Err(ConfigError::JumpNotUpward(tuning.jump_velocity));
    }

    if tuning.starting_lives == 0 {
        return Err(ConfigError::NoLives);
    }

    Ok(())
}

//! Level lifecycle messages.
//!
//! Inbound (host → level): `StartLevel`, `LevelCommand`.
//! Outbound (level → host): `LevelFinished`, then exactly one of `LevelChange`,
//! `GameWon` or `GameOver`. The level never navigates by itself.

use bevy::prelude::*;

use super::registry::LevelId;

/// Tear down whatever is running and construct a fresh instance of `level`.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartLevel {
    pub level: LevelId,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelCommand {
    Pause,
    Resume,
    TogglePause,
}

/// Win condition met and another level follows.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelChange {
    pub next: LevelId,
}

/// Last level won.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameWon;

/// Player destroyed.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub level: LevelId,
}

/// Kill count handed to the score collaborator when a level ends either way.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelFinished {
    pub level: LevelId,
    pub kills: u32,
}

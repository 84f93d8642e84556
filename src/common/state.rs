//! Level state machine.
//!
//! ```text
//! Idle -> Initializing -> Running <-> Paused
//!                            |
//!                            +-> Won | Lost   (terminal for the level instance)
//! ```
//!
//! A `StartLevel` request from any state tears the current instance down and
//! re-enters `Initializing`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum LevelState {
    /// No level has been requested yet.
    #[default]
    Idle,
    Initializing,
    Running,
    Paused,
    Won,
    Lost,
}

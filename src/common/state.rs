//! Global state machine.

use bevy::prelude::*;

/// Top-level game mode. The run itself lives in the world plugin's
/// `Run` resource; these states only gate which systems tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Paused,
    GameOver,
    Victory,
}

impl GameState {
    /// The run has ended and can only be restarted.
    pub fn is_finished(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

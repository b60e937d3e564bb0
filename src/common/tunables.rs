//! Tunable run settings.
//!
//! Gameplay constants (gravity, speeds, timers) sit next to the code that
//! uses them; this resource only carries what differs between runs.

use bevy::prelude::*;

use crate::sim::Playfield;
use crate::sim::session::{RunMode, SessionConfig};

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub field: Playfield,
    /// Fixed simulation rate.
    pub tick_hz: f64,
    pub seed: u64,
    pub mode: RunMode,
    pub endless_spawn: Vec2,
    /// Ticks the world stays frozen after a death.
    pub respawn_ticks: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            field: Playfield::default(),
            tick_hz: 60.0,
            seed: 0x5eed,
            mode: RunMode::Campaign,
            endless_spawn: Vec2::new(100.0, 650.0),
            respawn_ticks: 120,
        }
    }
}

impl Tunables {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            field: self.field,
            seed: self.seed,
            endless_spawn: self.endless_spawn,
            respawn_ticks: self.respawn_ticks,
        }
    }
}

//! Fixed-step simulation core.
//!
//! Plain Rust over `Vec2`: nothing in here touches the ECS. The world plugin
//! owns a [`session::Session`] and calls [`session::Session::tick`] once per
//! fixed update.

pub mod cues;
pub mod geom;
pub mod level;
pub mod monsters;
pub mod physics;
pub mod pickups;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod session;
pub mod stage;

/// Size of the visible playfield in screen pixels (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self { width: 1200.0, height: 800.0 }
    }
}

//! Feature plugins.

use bevy::prelude::*;

pub mod audio;
pub mod core;
pub mod player;
pub mod world;

// Render-only
pub mod camera;
pub mod render;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    player::plugin(app);
    world::plugin(app);
    audio::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    render::plugin(app);
}


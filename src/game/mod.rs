//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins;
use crate::plugins::world::LevelSequence;
use crate::sim::level::LevelData;
use crate::sim::session::RunMode;

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    RenderPlugin,
    settings::{Backends, PowerPreference, WgpuSettings},
};

/// Open the window and play. `test_level` replaces the sequence for
/// [`RunMode::Test`].
pub fn run(mode: RunMode, test_level: Option<LevelData>) {
    let mut app = App::new();
    app.insert_resource(Tunables { mode, ..default() });
    if let Some(level) = test_level {
        app.insert_resource(LevelSequence::single(level));
    }
    app.add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let field = app
        .world()
        .get_resource::<Tunables>()
        .map(|t| t.field)
        .unwrap_or_default();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Ants vs Spores".into(),
            resolution: WindowResolution::new(field.width as u32, field.height as u32),
            resizable: false,
            ..default()
        }),
        ..default()
    });

    // DX12 on Windows; Vulkan is unreliable on some hybrid-GPU laptops.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera/gizmo drawing).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

//! Camera plugin (render-only).
//!
//! The playfield is a single fixed screen, so the camera never moves: it
//! sits at the origin and [`crate::plugins::render::to_world`] centres the
//! field on it.

use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands, existing: Query<(), With<MainCamera>>) {
    if !existing.is_empty() {
        return;
    }
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

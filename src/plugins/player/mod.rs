//! Player input plugin.
//!
//! Pipeline:
//! - Update: sample the keyboard into the `ControlInput` resource
//! - FixedUpdate: the world plugin takes one `Controls` snapshot per tick
//!
//! Movement keys are level-triggered and resampled every frame. Jump, shoot,
//! buy and weapon selection are edges: they latch until the next fixed tick
//! consumes them, so a press between two ticks is never lost.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::sim::player::{Controls, Weapon};

#[derive(Resource, Default, Debug)]
pub struct ControlInput {
    latched: Controls,
}

impl ControlInput {
    /// Snapshot for one tick. Edges are cleared; held keys stay.
    pub fn take(&mut self) -> Controls {
        let snapshot = self.latched;
        self.latched = Controls {
            left: snapshot.left,
            right: snapshot.right,
            ..Controls::default()
        };
        snapshot
    }

    pub fn clear(&mut self) {
        self.latched = Controls::default();
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(ControlInput::default())
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(OnExit(GameState::InGame), release_all);
}

const WEAPON_KEYS: [(KeyCode, Weapon); 4] = [
    (KeyCode::Digit1, Weapon::Normal),
    (KeyCode::Digit2, Weapon::Rapid),
    (KeyCode::Digit3, Weapon::Spread),
    (KeyCode::Digit4, Weapon::Missile),
];

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<ControlInput>) {
    let Some(keys) = keys else {
        return;
    };
    let c = &mut input.latched;

    c.left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    c.right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    c.jump |= keys.any_just_pressed([KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp]);
    c.shoot |= keys.just_pressed(KeyCode::ShiftRight);
    c.buy |= keys.just_pressed(KeyCode::KeyE);

    if let Some((_, weapon)) = WEAPON_KEYS.iter().find(|(key, _)| keys.just_pressed(*key)) {
        c.select = Some(*weapon);
    }
}

fn release_all(mut input: ResMut<ControlInput>) {
    input.clear();
}

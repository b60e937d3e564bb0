//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    // Keep a Tunables inserted by the caller (e.g. a chosen run mode).
    app.init_resource::<Tunables>();
    let hz = app.world().get_resource::<Tunables>().map_or(60.0, |t| t.tick_hz);
    app.insert_resource(Time::<Fixed>::from_hz(hz));
    app.insert_resource(ClearColor(Color::srgb_u8(30, 35, 45)));
}

//! Audio plugin: fire-and-forget consumer of simulation cues.
//!
//! Sound synthesis is out of scope; cues are logged and the current music
//! track is tracked so redundant switches are dropped.

use bevy::prelude::*;

use crate::plugins::world::messages::{AudioCue, MusicCue};
use crate::sim::cues::Track;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NowPlaying(pub Option<Track>);

pub fn plugin(app: &mut App) {
    app.init_resource::<NowPlaying>()
        .add_systems(Update, (play_cues, switch_music));
}

fn play_cues(mut cues: MessageReader<AudioCue>) {
    for AudioCue(cue) in cues.read() {
        debug!("cue {}", cue.name());
    }
}

fn switch_music(mut switches: MessageReader<MusicCue>, mut now: ResMut<NowPlaying>) {
    for MusicCue(track) in switches.read() {
        if now.0 == *track {
            continue;
        }
        match track {
            Some(t) => debug!("music -> {}", t.name()),
            None => debug!("music stopped"),
        }
        now.0 = *track;
    }
}

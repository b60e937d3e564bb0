//! Outbound notifications from the running simulation.
//!
//! The fixed tick is the only producer. Consumers (audio, records) never
//! touch the session; they react to these messages.

use bevy::prelude::*;

use crate::sim::cues::{Cue, Track};
use crate::sim::session::RunReport;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioCue(pub Cue);

/// `None` stops the music.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicCue(pub Option<Track>);

/// Written once, on the tick a run ends.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunFinished(pub RunReport);

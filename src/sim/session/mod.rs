//! A whole run: lives, score, spores and the walk through a level sequence.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::sim::Playfield;
use crate::sim::cues::{Cue, CueSink, StageEvent, Track};
use crate::sim::level::{LevelData, LevelError};
use crate::sim::player::{Carry, Controls};
use crate::sim::stage::{Purchase, Stage};

pub const STARTING_LIVES: u32 = 3;
/// Health at or below which the intense theme takes over.
pub const LOW_HEALTH: i32 = 30;
/// Endless mode awards a bonus life every this many levels.
pub const ENDLESS_LIFE_INTERVAL: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunMode {
    #[default]
    Campaign,
    /// Loops the sequence with growing rewards.
    Endless,
    /// Deaths do not cost lives.
    Tutorial,
    /// Single level; the portal ends the run.
    Test,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Playing,
    GameOver,
    Victory,
}

/// Statistics handed to the persistence sink once a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub score: u32,
    pub spores: u32,
    pub endless_level: u32,
    pub game_beaten: bool,
    pub mode: RunMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub field: Playfield,
    pub seed: u64,
    /// Where the player reappears after dying in endless mode.
    pub endless_spawn: Vec2,
    pub respawn_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: Playfield::default(),
            seed: 0,
            endless_spawn: Vec2::new(100.0, 650.0),
            respawn_ticks: 120,
        }
    }
}

pub struct Session {
    pub mode: RunMode,
    pub levels: Vec<LevelData>,
    pub level_index: usize,
    pub stage: Stage,
    pub lives: u32,
    pub score: u32,
    pub spores: u32,
    pub endless_level: u32,
    /// Ticks left in the post-death freeze.
    pub respawn_timer: u32,
    pub status: RunStatus,
    track: Option<Track>,
    config: SessionConfig,
    rng: StdRng,
    events: Vec<StageEvent>,
}

impl Session {
    pub fn start(mode: RunMode, levels: Vec<LevelData>, config: SessionConfig) -> Result<Self, LevelError> {
        let first = levels.first().ok_or(LevelError::EmptySequence)?;
        let stage = Stage::load(first, config.field, &Carry::default())?;
        let mut session = Self {
            mode,
            levels,
            level_index: 0,
            stage,
            lives: STARTING_LIVES,
            score: 0,
            spores: 0,
            endless_level: if mode == RunMode::Endless { 1 } else { 0 },
            respawn_timer: 0,
            status: RunStatus::Playing,
            track: None,
            config,
            rng: StdRng::seed_from_u64(config.seed),
            events: Vec::new(),
        };
        session.announce_stage();
        Ok(session)
    }

    /// A fresh run with the same mode, levels and seed.
    pub fn restart(&self) -> Result<Self, LevelError> {
        Self::start(self.mode, self.levels.clone(), self.config)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status != RunStatus::Playing
    }

    #[inline]
    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0
    }

    pub fn track(&self) -> Option<Track> {
        self.track
    }

    /// Take every cue and music change recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        self.events.append(&mut self.stage.drain_events());
        std::mem::take(&mut self.events)
    }

    /// Advance the run by one fixed tick. Returns the report on the tick the
    /// run ends.
    pub fn tick(&mut self, controls: &Controls) -> Option<RunReport> {
        if self.is_over() {
            return None;
        }
        if self.respawn_timer > 0 {
            self.respawn_timer -= 1;
            if self.respawn_timer == 0 {
                self.stage.player.heal_full();
                info!("player back in play on {}", self.stage.name);
            }
            return None;
        }

        if controls.buy {
            self.buy();
        }

        let step = self.stage.step(controls, &mut self.rng);
        self.events.append(&mut self.stage.drain_events());
        self.score += step.score;
        if step.spore_collected {
            self.spores += self.level_index as u32 + 1;
        }
        self.update_music();

        if step.portal_entered {
            return self.complete_level();
        }
        if self.stage.player.is_dead() {
            return self.lose_life();
        }
        None
    }

    fn buy(&mut self) {
        match self.stage.purchase(&mut self.spores) {
            Purchase::Bought { cost, lives } => {
                self.lives += lives;
                debug!("bought for {cost} spores, {} left", self.spores);
            }
            Purchase::TooExpensive => debug!("cannot afford item with {} spores", self.spores),
            Purchase::Nothing => {}
        }
    }

    fn update_music(&mut self) {
        if self.stage.is_shop {
            return;
        }
        let health = self.stage.player.health;
        if health <= LOW_HEALTH && self.track != Some(Track::Intense) {
            self.set_track(Some(Track::Intense));
        } else if health > LOW_HEALTH && self.track == Some(Track::Intense) {
            self.set_track(Some(Track::Main));
        }
    }

    fn set_track(&mut self, track: Option<Track>) {
        if self.track != track {
            self.track = track;
            self.events.push(StageEvent::Music(track));
        }
    }

    fn complete_level(&mut self) -> Option<RunReport> {
        self.events.cue(Cue::LevelComplete);
        info!("completed {}", self.stage.name);
        if !self.stage.is_shop && self.mode != RunMode::Test {
            self.gain_life();
        }

        let next = match self.mode {
            RunMode::Test => return Some(self.finish(RunStatus::Victory)),
            RunMode::Endless => {
                self.endless_level += 1;
                self.spores += self.endless_level;
                if self.endless_level % ENDLESS_LIFE_INTERVAL == 0 {
                    self.gain_life();
                }
                (self.level_index + 1) % self.levels.len()
            }
            RunMode::Campaign | RunMode::Tutorial => self.level_index + 1,
        };

        let Some(level) = self.levels.get(next) else {
            return Some(self.finish(RunStatus::Victory));
        };
        let carry = self.stage.player.carry();
        match Stage::load(level, self.config.field, &carry) {
            Ok(stage) => {
                self.stage = stage;
                self.level_index = next;
                self.announce_stage();
                None
            }
            Err(e) => {
                warn!("cannot load level {next}: {e}");
                Some(self.finish(RunStatus::GameOver))
            }
        }
    }

    fn lose_life(&mut self) -> Option<RunReport> {
        if self.mode != RunMode::Tutorial {
            self.lives = self.lives.saturating_sub(1);
        }
        self.events.cue(Cue::PlayerDeath);
        info!("player died, {} lives left", self.lives);

        if self.lives == 0 {
            self.events.cue(Cue::GameOver);
            return Some(self.finish(RunStatus::GameOver));
        }

        self.respawn_timer = self.config.respawn_ticks;
        let at = match self.mode {
            RunMode::Endless => self.config.endless_spawn,
            _ => self.stage.spawn,
        };
        self.stage.respawn_player(at);
        None
    }

    fn gain_life(&mut self) {
        self.lives += 1;
        self.events.cue(Cue::ExtraLife);
    }

    fn announce_stage(&mut self) {
        let stage = &self.stage;
        info!(
            "loaded {} ({} platforms, {} monsters)",
            stage.name,
            stage.platforms.len(),
            stage.monsters.len()
        );
        if stage.skipped_monsters > 0 {
            warn!("{}: skipped {} monsters of unknown type", stage.name, stage.skipped_monsters);
        }
        let track = if stage.is_shop { Track::Shop } else { Track::Main };
        self.set_track(Some(track));
    }

    fn finish(&mut self, status: RunStatus) -> RunReport {
        self.status = status;
        match status {
            RunStatus::Victory => self.set_track(Some(Track::Victory)),
            RunStatus::GameOver => self.set_track(None),
            RunStatus::Playing => {}
        }
        info!("run over: {:?}, score {}, spores {}", status, self.score, self.spores);
        RunReport {
            score: self.score,
            spores: self.spores,
            endless_level: self.endless_level,
            game_beaten: status == RunStatus::Victory && self.mode == RunMode::Campaign,
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests;

//! World plugin: owns the running session and advances it on the fixed clock.
//!
//! ```text
//! Startup:       LevelSequence + Tunables -> Run(Session)
//! FixedUpdate:   ControlInput.take() -> Session::tick -> AudioCue / MusicCue / RunFinished
//! Update:        Escape pauses, R restarts a finished run, RunFinished -> RunRecords
//! PostUpdate:    advance message buffers
//! ```

pub mod messages;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::ControlInput;
use crate::sim::cues::StageEvent;
use crate::sim::level::{self, LevelData, LevelError};
use crate::sim::session::{RunMode, RunStatus, Session};

use messages::{AudioCue, MusicCue, RunFinished};

/// The run in progress.
#[derive(Resource)]
pub struct Run(pub Session);

/// Level lists each run mode draws from.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelSequence {
    pub campaign: Vec<LevelData>,
    pub tutorial: Vec<LevelData>,
    /// Levels played in [`RunMode::Test`].
    pub test: Vec<LevelData>,
}

impl LevelSequence {
    /// The sets embedded in the binary.
    pub fn builtin() -> Result<Self, LevelError> {
        let campaign = level::parse_all(level::CAMPAIGN)?;
        let tutorial = level::parse_all(level::TUTORIAL)?;
        let test = campaign.first().cloned().into_iter().collect();
        Ok(Self { campaign, tutorial, test })
    }

    /// Test-play a single descriptor.
    pub fn single(level: LevelData) -> Self {
        Self { test: vec![level], ..default() }
    }

    pub fn for_mode(&self, mode: RunMode) -> Vec<LevelData> {
        match mode {
            RunMode::Campaign => self.campaign.clone(),
            RunMode::Endless => self.campaign.iter().filter(|l| !l.is_shop).cloned().collect(),
            RunMode::Tutorial => self.tutorial.clone(),
            RunMode::Test => self.test.clone(),
        }
    }
}

/// Best results across the runs of this process.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct RunRecords {
    pub runs: u32,
    pub high_score: u32,
    pub total_spores: u32,
    pub best_endless_level: u32,
    pub game_beaten: bool,
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<LevelSequence>() {
        match LevelSequence::builtin() {
            Ok(sequence) => {
                app.insert_resource(sequence);
            }
            Err(e) => warn!("built-in levels unavailable: {e}"),
        }
    }

    app.init_resource::<Messages<AudioCue>>()
        .init_resource::<Messages<MusicCue>>()
        .init_resource::<Messages<RunFinished>>()
        .init_resource::<RunRecords>()
        .add_systems(
            PostUpdate,
            (
                update_messages::<AudioCue>,
                update_messages::<MusicCue>,
                update_messages::<RunFinished>,
            ),
        );

    app.add_systems(Startup, start_run)
        .add_systems(FixedUpdate, advance_run.run_if(in_state(GameState::InGame)))
        .add_systems(Update, (toggle_pause, restart_run, record_run));
}

/// Messages are double-buffered; `update()` advances buffers.
fn update_messages<M: Message>(mut msgs: ResMut<Messages<M>>) {
    msgs.update();
}

fn start_run(mut commands: Commands, tunables: Res<Tunables>, sequence: Option<Res<LevelSequence>>) {
    let Some(sequence) = sequence else {
        warn!("no level sequence; nothing to play");
        return;
    };
    match Session::start(tunables.mode, sequence.for_mode(tunables.mode), tunables.session_config()) {
        Ok(session) => {
            info!("starting {:?} run", tunables.mode);
            commands.insert_resource(Run(session));
        }
        Err(e) => warn!("cannot start {:?} run: {e}", tunables.mode),
    }
}

/// One fixed tick of the simulation, then fan its events out as messages.
pub fn advance_run(
    run: Option<ResMut<Run>>,
    mut input: ResMut<ControlInput>,
    mut cues: MessageWriter<AudioCue>,
    mut music: MessageWriter<MusicCue>,
    mut finished: MessageWriter<RunFinished>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(mut run) = run else {
        return;
    };
    let controls = input.take();
    let report = run.0.tick(&controls);

    for event in run.0.drain_events() {
        match event {
            StageEvent::Cue(cue) => {
                cues.write(AudioCue(cue));
            }
            StageEvent::Music(track) => {
                music.write(MusicCue(track));
            }
        }
    }

    if let Some(report) = report {
        finished.write(RunFinished(report));
        next.set(match run.0.status {
            RunStatus::Victory => GameState::Victory,
            _ => GameState::GameOver,
        });
    }
}

fn toggle_pause(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    match state.get() {
        GameState::InGame => next.set(GameState::Paused),
        GameState::Paused => next.set(GameState::InGame),
        GameState::GameOver | GameState::Victory => {}
    }
}

fn restart_run(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<GameState>>,
    run: Option<ResMut<Run>>,
    mut music: MessageWriter<MusicCue>,
    mut next: ResMut<NextState<GameState>>,
) {
    let (Some(keys), Some(mut run)) = (keys, run) else {
        return;
    };
    if !state.get().is_finished() || !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    match run.0.restart() {
        Ok(mut session) => {
            info!("restarting {:?} run", session.mode);
            // The opening track is announced at start; forward it.
            for event in session.drain_events() {
                if let StageEvent::Music(track) = event {
                    music.write(MusicCue(track));
                }
            }
            run.0 = session;
            next.set(GameState::InGame);
        }
        Err(e) => warn!("cannot restart run: {e}"),
    }
}

/// Persistence sink: fold finished runs into the records.
fn record_run(mut finished: MessageReader<RunFinished>, mut records: ResMut<RunRecords>) {
    for RunFinished(report) in finished.read() {
        records.runs += 1;
        records.high_score = records.high_score.max(report.score);
        records.total_spores += report.spores;
        records.best_endless_level = records.best_endless_level.max(report.endless_level);
        records.game_beaten |= report.game_beaten;
        info!(
            "run {} finished: score {}, spores {}, endless level {}",
            records.runs, report.score, report.spores, report.endless_level
        );
    }
}

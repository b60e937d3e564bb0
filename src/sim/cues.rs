//! Named audio cues and music tracks the simulation asks for.
//!
//! The core never plays anything itself: it records intent in an outbox and
//! the audio plugin consumes it.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    DoubleJump,
    Shoot,
    ShootRapid,
    ShootSpread,
    ShootMissile,
    EnemyHit,
    EnemyDeath,
    PlayerHit,
    PlayerDeath,
    GameOver,
    SporeSpawn,
    SporeCollect,
    LevelComplete,
    ExtraLife,
    ShopBuy,
    ShopError,
    Bounce,
    Crumble,
    Bite,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::DoubleJump => "double_jump",
            Cue::Shoot => "shoot",
            Cue::ShootRapid => "shoot_rapid",
            Cue::ShootSpread => "shoot_spread",
            Cue::ShootMissile => "shoot_missile",
            Cue::EnemyHit => "enemy_hit",
            Cue::EnemyDeath => "enemy_death",
            Cue::PlayerHit => "player_hit",
            Cue::PlayerDeath => "player_death",
            Cue::GameOver => "game_over",
            Cue::SporeSpawn => "spore_spawn",
            Cue::SporeCollect => "spore_collect",
            Cue::LevelComplete => "level_complete",
            Cue::ExtraLife => "extra_life",
            Cue::ShopBuy => "shop_buy",
            Cue::ShopError => "shop_error",
            Cue::Bounce => "bounce",
            Cue::Crumble => "crumble",
            Cue::Bite => "bite",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    Main,
    Intense,
    Shop,
    Victory,
}

impl Track {
    pub fn name(self) -> &'static str {
        match self {
            Track::Main => "main_theme",
            Track::Intense => "intense_theme",
            Track::Shop => "shop_theme",
            Track::Victory => "victory_theme",
        }
    }
}

/// Everything the stage reports outward during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageEvent {
    Cue(Cue),
    /// `None` stops the music.
    Music(Option<Track>),
}

/// Fire-and-forget receiver for cues.
pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

impl CueSink for Vec<StageEvent> {
    #[inline]
    fn cue(&mut self, cue: Cue) {
        self.push(StageEvent::Cue(cue));
    }
}

impl CueSink for Vec<Cue> {
    #[inline]
    fn cue(&mut self, cue: Cue) {
        self.push(cue);
    }
}

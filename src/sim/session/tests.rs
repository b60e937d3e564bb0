use super::*;
use crate::sim::level::{MonsterData, PlatformData, Point, ShopItemData};
use crate::sim::player::Weapon;

fn level(name: &str, guarded: bool) -> LevelData {
    let monsters = if guarded {
        vec![MonsterData {
            kind: "walker".into(),
            x: 900.0,
            y: 710.0,
            patrol_range: 50.0,
            speed: 0.0,
            health: 3,
            aggro_duration: None,
            size: None,
        }]
    } else {
        Vec::new()
    };
    LevelData {
        name: name.into(),
        player_spawn: Some(Point { x: 100.0, y: 690.0 }),
        platforms: vec![PlatformData {
            x: 0.0,
            y: 750.0,
            width: 1200.0,
            height: 50.0,
            color: [80, 60, 40],
            bouncy: false,
            unstable: false,
        }],
        monsters,
        portal_position: None,
        background_color: [0, 0, 0],
        is_shop: false,
        shop_items: Vec::new(),
    }
}

fn shop() -> LevelData {
    LevelData {
        is_shop: true,
        shop_items: vec![ShopItemData {
            name: "Extra Life".into(),
            kind: "life".into(),
            cost: 2,
            description: String::new(),
            x: 120.0,
            y: 710.0,
        }],
        ..level("shop", false)
    }
}

fn session(mode: RunMode, levels: Vec<LevelData>) -> Session {
    Session::start(mode, levels, SessionConfig::default()).expect("session starts")
}

fn idle() -> Controls {
    Controls::default()
}

fn enter_portal(session: &mut Session) -> Option<RunReport> {
    session.stage.portal.activate();
    session.stage.player.body.pos = session.stage.portal.pos;
    session.tick(&idle())
}

fn cues(session: &mut Session) -> Vec<Cue> {
    session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            StageEvent::Cue(c) => Some(c),
            StageEvent::Music(_) => None,
        })
        .collect()
}

#[test]
fn starts_on_the_first_level_with_main_theme() {
    let mut s = session(RunMode::Campaign, vec![level("one", true), level("two", true)]);
    assert_eq!(s.lives, STARTING_LIVES);
    assert_eq!(s.level_index, 0);
    assert_eq!(s.stage.name, "one");
    assert_eq!(s.track(), Some(Track::Main));
    assert_eq!(s.drain_events(), vec![StageEvent::Music(Some(Track::Main))]);
}

#[test]
fn empty_sequence_cannot_start() {
    let err = Session::start(RunMode::Campaign, Vec::new(), SessionConfig::default()).err();
    assert!(matches!(err, Some(LevelError::EmptySequence)));
}

#[test]
fn portal_advances_and_carries_the_loadout() {
    let mut s = session(RunMode::Campaign, vec![level("one", true), level("two", true)]);
    s.stage.player.unlocks.rapid = true;
    s.stage.player.weapon = Weapon::Rapid;
    s.stage.player.modifiers.shield = true;
    s.drain_events();

    assert_eq!(enter_portal(&mut s), None);
    assert_eq!(s.level_index, 1);
    assert_eq!(s.stage.name, "two");
    assert_eq!(s.lives, STARTING_LIVES + 1);
    assert_eq!(s.stage.player.weapon, Weapon::Rapid);
    assert!(s.stage.player.modifiers.shield);
    assert_eq!(s.stage.player.health, 100);

    let cues = cues(&mut s);
    assert!(cues.contains(&Cue::LevelComplete));
    assert!(cues.contains(&Cue::ExtraLife));
}

#[test]
fn finishing_the_campaign_is_a_victory() {
    let mut s = session(RunMode::Campaign, vec![level("only", true)]);
    s.score = 700;

    let report = enter_portal(&mut s).expect("run ends");
    assert_eq!(s.status, RunStatus::Victory);
    assert!(report.game_beaten);
    assert_eq!(report.score, 700);
    assert_eq!(report.mode, RunMode::Campaign);
    assert_eq!(s.track(), Some(Track::Victory));

    // Nothing moves once the run is over.
    assert_eq!(s.tick(&idle()), None);
}

#[test]
fn shop_portal_grants_no_life() {
    let mut s = session(RunMode::Campaign, vec![shop(), level("after", true)]);
    assert_eq!(s.track(), Some(Track::Shop));
    enter_portal(&mut s);
    assert_eq!(s.lives, STARTING_LIVES);
    assert_eq!(s.track(), Some(Track::Main));
}

#[test]
fn test_mode_ends_at_the_first_portal_without_bonus() {
    let mut s = session(RunMode::Test, vec![level("draft", true), level("unused", true)]);
    let report = enter_portal(&mut s).expect("run ends");
    assert_eq!(s.status, RunStatus::Victory);
    assert_eq!(s.lives, STARTING_LIVES);
    assert!(!report.game_beaten);
}

#[test]
fn endless_loops_with_growing_rewards() {
    let mut s = session(RunMode::Endless, vec![level("loop", true)]);
    assert_eq!(s.endless_level, 1);

    assert_eq!(enter_portal(&mut s), None);
    assert_eq!(s.endless_level, 2);
    assert_eq!(s.spores, 2);
    assert_eq!(s.lives, STARTING_LIVES + 1);
    assert_eq!(s.level_index, 0);

    assert_eq!(enter_portal(&mut s), None);
    assert_eq!(s.endless_level, 3);
    assert_eq!(s.spores, 5);
    // Level bonus plus the every-third-level bonus.
    assert_eq!(s.lives, STARTING_LIVES + 3);
}

#[test]
fn death_freezes_then_respawns_at_full_health() {
    let mut s = session(RunMode::Campaign, vec![level("one", true)]);
    s.stage.player.body.pos.x = 500.0;
    s.stage.player.health = 0;
    s.drain_events();

    assert_eq!(s.tick(&idle()), None);
    assert_eq!(s.lives, STARTING_LIVES - 1);
    assert!(s.is_respawning());
    assert_eq!(s.stage.player.body.pos, Vec2::new(100.0, 690.0));
    assert!(cues(&mut s).contains(&Cue::PlayerDeath));
    assert_eq!(s.track(), Some(Track::Intense));

    let frozen = s.stage.monsters[0].base.body.pos;
    for _ in 0..119 {
        s.tick(&idle());
        assert_eq!(s.stage.player.health, 0);
    }
    assert_eq!(s.stage.monsters[0].base.body.pos, frozen);
    s.tick(&idle());
    assert!(!s.is_respawning());
    assert_eq!(s.stage.player.health, 100);

    s.tick(&idle());
    assert_eq!(s.track(), Some(Track::Main));
    assert_eq!(s.lives, STARTING_LIVES - 1);
}

#[test]
fn endless_respawns_at_the_fixed_point() {
    let mut s = session(RunMode::Endless, vec![level("loop", true)]);
    s.stage.player.health = 0;
    s.tick(&idle());
    assert_eq!(s.stage.player.body.pos, Vec2::new(100.0, 650.0));
}

#[test]
fn losing_the_last_life_ends_the_run() {
    let mut s = session(RunMode::Campaign, vec![level("one", true)]);
    s.lives = 1;
    s.score = 250;
    s.stage.player.health = 0;
    s.drain_events();

    let report = s.tick(&idle()).expect("run ends");
    assert_eq!(s.status, RunStatus::GameOver);
    assert_eq!(report.score, 250);
    assert!(!report.game_beaten);
    assert_eq!(s.track(), None);

    let events = s.drain_events();
    assert!(events.contains(&StageEvent::Cue(Cue::GameOver)));
    assert_eq!(events.last(), Some(&StageEvent::Music(None)));
}

#[test]
fn tutorial_deaths_are_free() {
    let mut s = session(RunMode::Tutorial, vec![level("lesson", true)]);
    s.stage.player.health = 0;
    s.tick(&idle());
    assert_eq!(s.lives, STARTING_LIVES);
    assert!(s.is_respawning());
}

#[test]
fn spore_reward_scales_with_level_index() {
    let mut s = session(RunMode::Campaign, vec![level("one", false), level("two", false)]);
    s.tick(&idle());
    assert!(s.stage.spore.is_some());

    s.level_index = 1;
    s.stage.player.body.pos = Vec2::new(580.0, 370.0);
    s.tick(&idle());
    assert_eq!(s.spores, 2);
    assert!(s.stage.portal.active);
}

#[test]
fn buying_in_a_shop_adds_lives() {
    let mut s = session(RunMode::Campaign, vec![shop(), level("after", true)]);
    s.spores = 3;
    s.tick(&idle());
    assert!(s.stage.shop_items[0].hover);

    s.tick(&Controls { buy: true, ..idle() });
    assert_eq!(s.spores, 1);
    assert_eq!(s.lives, STARTING_LIVES + 1);
    assert!(cues(&mut s).contains(&Cue::ShopBuy));
}

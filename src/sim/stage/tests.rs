use bevy::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::sim::level::{MonsterData, PlatformData, Point, ShopItemData};
use crate::sim::monsters::{Behavior, SnakeMode};

fn floor() -> PlatformData {
    PlatformData {
        x: 0.0,
        y: 750.0,
        width: 1200.0,
        height: 50.0,
        color: [80, 60, 40],
        bouncy: false,
        unstable: false,
    }
}

fn monster(kind: &str, x: f32, y: f32, health: i32) -> MonsterData {
    MonsterData {
        kind: kind.into(),
        x,
        y,
        patrol_range: 100.0,
        speed: 0.0,
        health,
        aggro_duration: None,
        size: None,
    }
}

fn level(monsters: Vec<MonsterData>) -> LevelData {
    LevelData {
        name: "test".into(),
        player_spawn: Some(Point { x: 100.0, y: 690.0 }),
        platforms: vec![floor()],
        monsters,
        portal_position: None,
        background_color: [0, 0, 0],
        is_shop: false,
        shop_items: Vec::new(),
    }
}

fn stage(level: &LevelData) -> Stage {
    Stage::load(level, Playfield::default(), &Carry::default()).expect("level loads")
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

fn cues(stage: &mut Stage) -> Vec<Cue> {
    stage
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            StageEvent::Cue(c) => Some(c),
            StageEvent::Music(_) => None,
        })
        .collect()
}

fn bullet_at(x: f32, pierce: bool) -> Projectile {
    Projectile::bullet(Vec2::new(x, 720.0), 1.0, 12.0, 0.0, 1, pierce)
}

#[test]
fn three_bullets_kill_and_score_once() {
    let mut stage = stage(&level(vec![monster("walker", 400.0, 710.0, 3)]));
    let mut rng = rng();
    let idle = Controls::default();

    let mut scores = Vec::new();
    for _ in 0..3 {
        stage.projectiles.push(bullet_at(380.0, false));
        scores.push(stage.step(&idle, &mut rng).score);
        assert!(stage.projectiles.is_empty(), "bullet should be spent on hit");
    }
    assert_eq!(scores, vec![0, 0, KILL_SCORE]);
    assert!(stage.monsters.is_empty());

    let cues = cues(&mut stage);
    assert_eq!(cues.iter().filter(|c| **c == Cue::EnemyHit).count(), 2);
    assert_eq!(cues.iter().filter(|c| **c == Cue::EnemyDeath).count(), 1);
    assert!(cues.contains(&Cue::SporeSpawn));
}

#[test]
fn overlapping_monsters_hurt_the_player_once_per_tick() {
    let mut level = level(vec![
        monster("walker", 390.0, 710.0, 3),
        monster("walker", 400.0, 710.0, 3),
        monster("walker", 410.0, 710.0, 3),
    ]);
    level.player_spawn = Some(Point { x: 400.0, y: 690.0 });
    let mut stage = stage(&level);
    let mut rng = rng();

    stage.step(&Controls::default(), &mut rng);

    assert_eq!(stage.player.health, 99);
    let hits = cues(&mut stage).into_iter().filter(|c| *c == Cue::PlayerHit).count();
    assert_eq!(hits, 1);
}

#[test]
fn contact_knocks_the_player_away_from_the_monster() {
    let mut level = level(vec![monster("walker", 420.0, 710.0, 3)]);
    level.player_spawn = Some(Point { x: 400.0, y: 690.0 });
    let mut stage = stage(&level);

    stage.step(&Controls::default(), &mut rng());
    assert_eq!(stage.player.body.pos.x, 380.0);
}

#[test]
fn piercing_bullet_passes_through_and_hits_each_monster_once() {
    let mut stage = stage(&level(vec![
        monster("walker", 400.0, 710.0, 3),
        monster("walker", 600.0, 710.0, 1),
    ]));
    let mut rng = rng();
    stage.projectiles.push(bullet_at(380.0, true));

    let mut score = 0;
    for _ in 0..30 {
        score += stage.step(&Controls::default(), &mut rng).score;
    }
    assert_eq!(score, KILL_SCORE);
    assert_eq!(stage.monsters.len(), 1);
    assert_eq!(stage.monsters[0].base.health, 2);
    assert_eq!(stage.projectiles.len(), 1);
}

#[test]
fn cleared_level_spawns_a_spore_that_opens_the_portal() {
    let mut stage = stage(&level(Vec::new()));
    let mut rng = rng();

    let step = stage.step(&Controls::default(), &mut rng);
    assert!(!step.spore_collected);
    assert!(stage.spore_spawned);
    assert!(!stage.portal.active);
    assert_eq!(stage.spore.as_ref().map(|s| s.pos), Some(Vec2::new(600.0, 400.0)));
    assert!(cues(&mut stage).contains(&Cue::SporeSpawn));

    stage.player.body.pos = Vec2::new(580.0, 370.0);
    let step = stage.step(&Controls::default(), &mut rng);
    assert!(step.spore_collected);
    assert!(stage.portal.active);
    assert!(cues(&mut stage).contains(&Cue::SporeCollect));

    // Only one spore per level.
    let step = stage.step(&Controls::default(), &mut rng);
    assert!(!step.spore_collected);
    assert!(!cues(&mut stage).contains(&Cue::SporeSpawn));

    stage.player.body.pos = stage.portal.pos;
    let step = stage.step(&Controls::default(), &mut rng);
    assert!(step.portal_entered);
}

#[test]
fn inactive_portal_cannot_be_entered() {
    let mut stage = stage(&level(vec![monster("walker", 900.0, 710.0, 3)]));
    stage.player.body.pos = stage.portal.pos;
    let step = stage.step(&Controls::default(), &mut rng());
    assert!(!step.portal_entered);
}

#[test]
fn magnet_draws_the_spore_towards_the_player() {
    let mut stage = stage(&level(Vec::new()));
    let mut rng = rng();
    stage.step(&Controls::default(), &mut rng);

    stage.player.modifiers.magnet = true;
    stage.player.body.pos = Vec2::new(380.0, 400.0);
    let before = stage.spore.as_ref().map(|s| s.pos.x).unwrap_or_default();
    stage.step(&Controls::default(), &mut rng);
    let after = stage.spore.as_ref().map(|s| s.pos.x).unwrap_or_default();
    assert!(after < before);
}

#[test]
fn shop_purchases_spend_spores_and_apply_effects() {
    let mut level = level(vec![monster("walker", 900.0, 710.0, 3)]);
    level.is_shop = true;
    level.shop_items = vec![
        ShopItemData {
            name: "Extra Life".into(),
            kind: "life".into(),
            cost: 3,
            description: String::new(),
            x: 120.0,
            y: 710.0,
        },
        ShopItemData {
            name: "Missile".into(),
            kind: "weapon_missile".into(),
            cost: 10,
            description: String::new(),
            x: 600.0,
            y: 710.0,
        },
    ];
    let mut stage = stage(&level);
    let mut rng = rng();
    assert!(stage.portal.active);

    stage.step(&Controls::default(), &mut rng);
    assert!(stage.spore.is_none(), "shops never spawn a spore");
    assert_eq!(stage.monsters[0].base.body.pos, Vec2::new(900.0, 710.0));
    assert!(stage.shop_items[0].hover);
    cues(&mut stage);

    let mut spores = 5;
    assert_eq!(stage.purchase(&mut spores), Purchase::Bought { cost: 3, lives: 1 });
    assert_eq!(spores, 2);
    assert_eq!(cues(&mut stage), vec![Cue::ShopBuy, Cue::ExtraLife]);
    assert_eq!(stage.purchase(&mut spores), Purchase::Nothing);

    stage.player.body.pos = Vec2::new(580.0, 690.0);
    stage.step(&Controls::default(), &mut rng);
    assert_eq!(stage.purchase(&mut spores), Purchase::TooExpensive);
    assert_eq!(spores, 2);
    assert!(!stage.player.unlocks.missile);
    assert!(cues(&mut stage).contains(&Cue::ShopError));

    spores = 10;
    assert_eq!(stage.purchase(&mut spores), Purchase::Bought { cost: 10, lives: 0 });
    assert!(stage.player.unlocks.missile);
}

#[test]
fn wrapped_snake_bites_without_contact_damage() {
    let mut level = level(vec![monster("snake", 420.0, 710.0, 3)]);
    level.player_spawn = Some(Point { x: 400.0, y: 690.0 });
    let mut stage = stage(&level);
    if let Behavior::Snake(s) = &mut stage.monsters[0].behavior {
        s.aggroed = true;
        s.mode = SnakeMode::Wrapped { angle: 0.0, timer: 50, bite_cooldown: 1 };
    }

    stage.step(&Controls::default(), &mut rng());
    assert_eq!(stage.player.health, 99);
    let cues = cues(&mut stage);
    assert!(cues.contains(&Cue::Bite));
    assert!(!cues.contains(&Cue::PlayerHit));
}

#[test]
fn bite_and_contact_in_the_same_tick_hurt_once() {
    let mut level = level(vec![monster("snake", 420.0, 710.0, 3), monster("walker", 390.0, 710.0, 3)]);
    level.player_spawn = Some(Point { x: 400.0, y: 690.0 });
    let mut stage = stage(&level);
    if let Behavior::Snake(s) = &mut stage.monsters[0].behavior {
        s.aggroed = true;
        s.mode = SnakeMode::Wrapped { angle: 0.0, timer: 50, bite_cooldown: 1 };
    }

    stage.step(&Controls::default(), &mut rng());
    assert_eq!(stage.player.health, 99);
    let cues = cues(&mut stage);
    assert!(cues.contains(&Cue::Bite));
    assert!(!cues.contains(&Cue::PlayerHit));
}

#[test]
fn respawn_calms_every_monster() {
    let mut stage = stage(&level(vec![
        monster("shriek", 600.0, 200.0, 3),
        monster("razorback", 800.0, 705.0, 3),
    ]));
    for m in &mut stage.monsters {
        m.take_damage(1);
    }
    assert!(stage.monsters.iter().any(|m| m.is_aggressive()));

    stage.player.body.vel = Vec2::new(5.0, 12.0);
    stage.respawn_player(Vec2::new(100.0, 650.0));
    assert_eq!(stage.player.body.pos, Vec2::new(100.0, 650.0));
    assert_eq!(stage.player.body.vel, Vec2::ZERO);
    assert!(stage.monsters.iter().all(|m| !m.is_aggressive()));
}

#[test]
fn monsters_falling_out_are_removed_for_partial_score() {
    let mut level = level(vec![monster("walker", 600.0, 790.0, 3)]);
    level.platforms.clear();
    let mut stage = stage(&level);
    stage.player.body.pos = Vec2::new(100.0, 0.0);
    let mut rng = rng();

    let mut score = 0;
    for _ in 0..10 {
        score += stage.step(&Controls::default(), &mut rng).score;
    }
    assert_eq!(score, FALL_SCORE);
    assert!(stage.monsters.is_empty());
}

#[test]
fn crumbling_platform_reports_its_collapse() {
    let mut level = level(Vec::new());
    level.platforms = vec![PlatformData { unstable: true, ..floor() }];
    let mut stage = stage(&level);
    let mut rng = rng();

    for _ in 0..200 {
        stage.step(&Controls::default(), &mut rng);
    }
    assert!(cues(&mut stage).contains(&Cue::Crumble));
    assert!(!stage.platforms[0].is_solid());
}

#[test]
fn shots_leave_from_the_pre_move_position() {
    let mut stage = stage(&level(vec![monster("walker", 1100.0, 710.0, 3)]));
    let mut rng = rng();
    let controls = Controls { right: true, shoot: true, ..Controls::default() };

    stage.step(&controls, &mut rng);
    let bullet = &stage.projectiles[0];
    // Fired from x=140 before the player moved, then travelled one tick.
    assert_eq!(bullet.pos.x, 152.0);
    assert_eq!(stage.player.body.pos.x, 105.0);
}

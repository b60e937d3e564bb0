//! Gizmo renderer (render-only).
//!
//! The simulation works in screen pixels with y growing downwards and the
//! origin at the top-left corner. The 2D camera sits at the origin with y up,
//! so every position goes through [`to_world`] before it is drawn.
//!
//! ```text
//! Update: Run(Session) -> ClearColor (stage background)
//!                      -> gizmos (platforms, portal, spore, shop, monsters,
//!                                 projectiles, player, health bar)
//! ```

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::world::Run;
use crate::sim::Playfield;
use crate::sim::geom::Rect;
use crate::sim::monsters::{Behavior, MonsterKind};
use crate::sim::platform::{Platform, PlatformKind};
use crate::sim::stage::Stage;

/// Blink period while the player waits to respawn, in fixed ticks.
const RESPAWN_BLINK: u32 = 10;
const TONGUE_LENGTH: f32 = 12.0;
const HEALTH_BAR: Vec2 = Vec2::new(200.0, 14.0);

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            sync_clear_color,
            draw_stage.run_if(not(in_state(GameState::GameOver))),
        ),
    );
}

/// Screen point (y down, origin top-left) to world point (y up, centred).
#[inline]
pub fn to_world(p: Vec2, field: Playfield) -> Vec2 {
    Vec2::new(p.x - field.width * 0.5, field.height * 0.5 - p.y)
}

/// World-space centre of a screen-space rectangle.
#[inline]
pub fn rect_center(r: &Rect, field: Playfield) -> Vec2 {
    to_world(r.center(), field)
}

#[inline]
fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

fn monster_color(kind: MonsterKind) -> Color {
    match kind {
        MonsterKind::Walker => Color::srgb_u8(200, 70, 60),
        MonsterKind::Flyer => Color::srgb_u8(170, 90, 220),
        MonsterKind::Spider => Color::srgb_u8(90, 60, 40),
        MonsterKind::Blob => Color::srgb_u8(110, 200, 90),
        MonsterKind::Taterbug => Color::srgb_u8(120, 120, 140),
        MonsterKind::Razorback => Color::srgb_u8(220, 140, 40),
        MonsterKind::Chompy => Color::srgb_u8(230, 200, 60),
        MonsterKind::Snake => Color::srgb_u8(60, 160, 80),
        MonsterKind::Shriek => Color::srgb_u8(240, 240, 240),
    }
}

/// Drawn rectangle of a platform: unstable ones shake, springs squash and
/// crumbled ones vanish.
pub fn platform_visual(platform: &Platform, shake_phase: f32) -> Option<Rect> {
    let mut r = platform.rect;
    match &platform.kind {
        PlatformKind::Normal => {}
        PlatformKind::Bouncy(spring) => {
            let squash = spring.squash * r.h * 0.3;
            r.y += squash;
            r.h -= squash;
        }
        PlatformKind::Unstable(crumble) => {
            if crumble.crumbled {
                return None;
            }
            r.x += shake_phase.sin() * crumble.shake_amplitude();
        }
    }
    Some(r)
}

fn sync_clear_color(run: Option<Res<Run>>, mut clear: ResMut<ClearColor>) {
    let Some(run) = run else {
        return;
    };
    let color = rgb(run.0.stage.background);
    if clear.0 != color {
        clear.0 = color;
    }
}

fn draw_stage(run: Option<Res<Run>>, time: Res<Time>, mut gizmos: Gizmos) {
    let Some(run) = run else {
        return;
    };
    let session = &run.0;
    let stage = &session.stage;
    let field = stage.field;
    let shake_phase = time.elapsed_secs() * 60.0;

    for platform in &stage.platforms {
        if let Some(r) = platform_visual(platform, shake_phase) {
            gizmos.rect_2d(rect_center(&r, field), Vec2::new(r.w, r.h), rgb(platform.color));
        }
    }

    draw_portal(&mut gizmos, stage);

    if let Some(spore) = stage.spore.as_ref().filter(|s| !s.collected) {
        gizmos.circle_2d(to_world(spore.center(), field), spore.radius, Color::srgb_u8(250, 220, 90));
    }

    for item in &stage.shop_items {
        let color = match (item.purchased, item.hover) {
            (true, _) => Color::srgb_u8(80, 80, 80),
            (false, true) => Color::srgb_u8(255, 230, 120),
            (false, false) => Color::srgb_u8(180, 160, 90),
        };
        let r = item.rect();
        gizmos.rect_2d(rect_center(&r, field), Vec2::new(r.w, r.h), color);
    }

    for monster in &stage.monsters {
        let color = monster_color(monster.kind());
        match &monster.behavior {
            Behavior::Blob(blob) => {
                let back = to_world(Vec2::new(blob.back_x, blob.pool_y), field);
                let front = to_world(Vec2::new(blob.front_x, blob.pool_y), field);
                gizmos.circle_2d(back, blob.radius * blob.back_mass.max(0.2).sqrt(), color);
                if blob.front_mass > 0.0 {
                    gizmos.circle_2d(front, blob.radius * blob.front_mass.sqrt(), color);
                    gizmos.line_2d(back, front, color);
                }
                for trail in &blob.trails {
                    gizmos.circle_2d(to_world(trail.pos, field), 3.0, color.with_alpha(0.4));
                }
            }
            Behavior::Snake(snake) => {
                let points: Vec<Vec2> = snake.segments().into_iter().map(|p| to_world(p, field)).collect();
                gizmos.linestrip_2d(points.iter().copied(), color);
                if let Some(&head) = points.first().filter(|_| snake.tongue_out()) {
                    let tip = head + Vec2::new(monster.base.direction * TONGUE_LENGTH, 0.0);
                    gizmos.line_2d(head, tip, Color::srgb_u8(230, 60, 80));
                }
                for p in points {
                    gizmos.circle_2d(p, 6.0, color);
                }
            }
            _ => {
                let r = monster.visual_rect();
                gizmos.rect_2d(rect_center(&r, field), Vec2::new(r.w, r.h), color);
            }
        }
    }

    for projectile in &stage.projectiles {
        let r = projectile.rect();
        let color = if projectile.is_missile() {
            Color::srgb_u8(255, 120, 60)
        } else {
            Color::srgb_u8(255, 255, 160)
        };
        gizmos.rect_2d(rect_center(&r, field), Vec2::new(r.w, r.h), color);
    }

    let visible = !session.is_respawning() || (session.respawn_timer / RESPAWN_BLINK) % 2 == 0;
    if visible {
        let r = stage.player.rect();
        gizmos.rect_2d(rect_center(&r, field), Vec2::new(r.w, r.h), Color::srgb_u8(80, 170, 255));
    }

    draw_health_bar(&mut gizmos, stage);
}

fn draw_portal(gizmos: &mut Gizmos, stage: &Stage) {
    let portal = &stage.portal;
    let r = portal.rect();
    let center = rect_center(&r, stage.field);
    if portal.active {
        let pulse = 1.0 + portal.anim_phase.sin() * 0.1;
        gizmos.ellipse_2d(center, Vec2::new(r.w, r.h) * 0.5 * pulse, Color::srgb_u8(140, 90, 255));
    } else {
        gizmos.ellipse_2d(center, Vec2::new(r.w, r.h) * 0.5, Color::srgb_u8(70, 70, 90));
    }
}

fn draw_health_bar(gizmos: &mut Gizmos, stage: &Stage) {
    let player = &stage.player;
    let fraction = (player.health as f32 / player.max_health.max(1) as f32).clamp(0.0, 1.0);
    let outline = Rect::new(20.0, 20.0, HEALTH_BAR.x, HEALTH_BAR.y);
    gizmos.rect_2d(rect_center(&outline, stage.field), HEALTH_BAR, Color::WHITE);

    if fraction > 0.0 {
        let fill = Rect::new(20.0, 20.0, HEALTH_BAR.x * fraction, HEALTH_BAR.y);
        let color = if player.modifiers.shield {
            Color::srgb_u8(120, 200, 255)
        } else {
            Color::srgb_u8(90, 220, 110)
        };
        gizmos.rect_2d(rect_center(&fill, stage.field), Vec2::new(fill.w, fill.h), color);
    }
}

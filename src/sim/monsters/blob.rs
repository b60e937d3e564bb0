use bevy::math::Vec2;
use rand::Rng;

use super::{Damage, MonsterBase, Surroundings};
use crate::sim::geom::Rect;
use crate::sim::physics;
use crate::sim::platform::Platform;

pub const BASE_RADIUS: f32 = 18.0;
pub const FEAR_DURATION: u32 = 300;
pub const DETECTION_RANGE: f32 = 150.0;
pub const SLIME_DURATION: u32 = 180;
const SLOSH_SPEED: f32 = 0.012;
const SCARED_SLOSH_FACTOR: f32 = 1.2;
const SLOSH_DISTANCE: f32 = 32.0;
/// Pools never leave this margin from the side walls.
const EDGE_MARGIN: f32 = 60.0;
const SCARED_SPREAD: f32 = 0.5;
const TRAIL_INTERVAL: u32 = 6;
const GROUND_PROBE_HALF: f32 = 5.0;

/// Fading goo left behind while sloshing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlimeTrail {
    pub pos: Vec2,
    pub ttl: u32,
}

/// Moves by sloshing its mass between a back and a front pool:
///
/// ```text
/// phase 0.00..0.25  tendril extends towards the front pool
/// phase 0.25..0.65  mass transfers through the neck
/// phase 0.65..1.00  back pool merges into the front
/// phase 1.00        reset: back = front
/// ```
///
/// Proximity or damage scares it: it flees, flattens and sloshes faster.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    pub radius: f32,
    pub slosh_distance: f32,
    pub slosh_phase: f32,
    pub mid_slosh: bool,
    pub back_x: f32,
    pub front_x: f32,
    /// Where the back pool started this cycle.
    slosh_origin: f32,
    /// Heading checked by `can_slosh` when this cycle started.
    slosh_dir: f32,
    /// Baseline of both pools.
    pub pool_y: f32,
    pub back_mass: f32,
    pub front_mass: f32,
    pub neck: f32,
    pub trails: Vec<SlimeTrail>,
    slime_timer: u32,
    pub wobble: f32,
    pub tremble: f32,
    pub eye_dart: f32,
    eye_timer: u32,
    pub scared: bool,
    pub fear_timer: u32,
    /// 0 when relaxed, towards 0.5 when flattened by fear.
    pub spread: f32,
}

impl Blob {
    pub fn new(base: &mut MonsterBase, size: f32) -> Self {
        let radius = BASE_RADIUS * size;
        let x = base.spawn.x + radius;
        let blob = Self {
            radius,
            slosh_distance: SLOSH_DISTANCE * size,
            slosh_phase: 0.0,
            mid_slosh: false,
            back_x: x,
            front_x: x,
            slosh_origin: x,
            slosh_dir: base.direction,
            pool_y: base.spawn.y,
            back_mass: 1.0,
            front_mass: 0.0,
            neck: 0.0,
            trails: Vec::new(),
            slime_timer: 0,
            wobble: 0.0,
            tremble: 0.0,
            eye_dart: 0.0,
            eye_timer: 0,
            scared: false,
            fear_timer: 0,
            spread: 0.0,
        };
        blob.sync(base);
        blob
    }

    /// Collision box spanning both pools; squat when flattened by fear.
    pub fn rect(&self) -> Rect {
        let r = self.radius;
        let h = if self.scared && self.spread > 0.2 { r * 1.5 } else { r * 2.8 };
        Rect::new(
            self.back_x.min(self.front_x) - r,
            self.pool_y + r * 1.5 - h,
            (self.front_x - self.back_x).abs() + r * 2.0,
            h,
        )
    }

    pub fn take_damage(&mut self, base: &mut MonsterBase, amount: i32) -> Damage {
        self.scare(FEAR_DURATION);
        base.hurt(amount)
    }

    pub fn reset_aggro(&mut self) {
        self.scared = false;
        self.fear_timer = 0;
    }

    pub(super) fn shift(&mut self, delta: Vec2) {
        self.back_x += delta.x;
        self.front_x += delta.x;
        self.slosh_origin += delta.x;
        self.pool_y += delta.y;
    }

    fn scare(&mut self, ticks: u32) {
        self.scared = true;
        self.fear_timer = ticks;
    }

    fn sync(&self, base: &mut MonsterBase) {
        let r = self.rect();
        base.body.pos = Vec2::new(r.x, r.y);
        base.body.size = Vec2::new(r.w, r.h);
    }

    /// Ground right under a pool centred on `x`.
    fn ground_at(&self, x: f32, platforms: &[Platform]) -> bool {
        let probe = Rect::new(
            x - GROUND_PROBE_HALF,
            self.pool_y + self.radius + 5.0,
            GROUND_PROBE_HALF * 2.0,
            20.0,
        );
        physics::any_solid_hit(&probe, platforms)
    }

    fn can_slosh(&self, direction: f32, world: &Surroundings) -> bool {
        let target = self.back_x + self.slosh_distance * direction;
        if target < EDGE_MARGIN || target > world.field.width - EDGE_MARGIN {
            return false;
        }
        if self.ground_at(target, world.platforms) {
            return true;
        }
        // Same column as the ground probe, so the pool's own platform
        // cannot show up as a landing.
        physics::has_landing_below(
            target - GROUND_PROBE_HALF,
            GROUND_PROBE_HALF * 2.0,
            self.pool_y + 50.0,
            world.platforms,
            world.field.height,
        )
    }

    fn drop_trail(&mut self) {
        self.trails.push(SlimeTrail {
            pos: Vec2::new(self.back_x, self.pool_y + self.radius * 1.5),
            ttl: SLIME_DURATION,
        });
    }

    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings, rng: &mut impl Rng) {
        self.wobble += 0.1;
        self.tremble += 0.5;
        self.eye_timer += 1;
        if self.eye_timer > 12 {
            self.eye_timer = 0;
            if self.scared {
                self.eye_dart = rng.gen_range(-2.0..2.0);
            }
        }

        let player = world.player.pos;
        if player.distance(base.body.pos) < DETECTION_RANGE {
            if !self.scared {
                self.scare(FEAR_DURATION);
            }
            self.fear_timer = self.fear_timer.max(FEAR_DURATION / 2);
        }
        if self.scared {
            self.fear_timer = self.fear_timer.saturating_sub(1);
            if self.fear_timer == 0 {
                self.scared = false;
            }
        }

        if self.scared {
            self.spread += (SCARED_SPREAD - self.spread) * 0.15;
            base.direction = if player.x > base.body.pos.x { -1.0 } else { 1.0 };
        } else {
            self.spread -= self.spread * 0.08;
            if self.spread < 0.02 {
                self.spread = 0.0;
            }
        }

        base.body.fall(base.gravity);

        self.trails.retain_mut(|t| {
            t.ttl -= 1;
            t.ttl > 0
        });

        let mut stuck = false;
        if !self.mid_slosh && !self.can_slosh(base.direction, world) {
            base.direction = -base.direction;
            stuck = !self.can_slosh(base.direction, world);
        }
        if !stuck {
            self.advance_slosh(base);
        }

        let lo = EDGE_MARGIN;
        let hi = world.field.width - EDGE_MARGIN;
        self.back_x = self.back_x.clamp(lo, hi);
        self.front_x = self.front_x.clamp(lo, hi);
        let pinned = (self.back_x <= lo && base.direction < 0.0) || (self.back_x >= hi && base.direction > 0.0);
        if pinned {
            base.direction = -base.direction;
            self.mid_slosh = false;
            self.slosh_phase = 0.0;
            self.front_x = self.back_x;
        }

        self.pool_y += base.body.vel.y;
        let r = self.radius;
        let feet = Rect::new(self.back_x - r, self.pool_y + r, r * 2.0, 10.0);
        if base.body.vel.y > 0.0 {
            if let Some(top) = world
                .platforms
                .iter()
                .map(|p| p.solid_rect())
                .find(|p| feet.intersects(p))
                .map(|p| p.top())
            {
                self.pool_y = top - r * 1.5;
                base.body.vel.y = 0.0;
            }
        }

        self.sync(base);
    }

    fn advance_slosh(&mut self, base: &mut MonsterBase) {
        let rate = if self.scared { SLOSH_SPEED * SCARED_SLOSH_FACTOR } else { SLOSH_SPEED };
        self.slosh_phase += rate;
        if !self.mid_slosh {
            self.slosh_origin = self.back_x;
            self.slosh_dir = base.direction;
        }
        // Fleeing re-aims every tick; the cycle keeps the side it checked.
        let reach = self.slosh_distance * self.slosh_dir;

        if self.slosh_phase < 0.25 {
            let extend = (self.slosh_phase / 0.25).powf(0.4);
            self.front_x = self.back_x + reach * extend;
            self.front_mass = 0.02 + extend * 0.08;
            self.neck = 0.2 + extend * 0.25;
            self.mid_slosh = true;
        } else if self.slosh_phase < 0.65 {
            let transfer = ((self.slosh_phase - 0.25) / 0.4).powf(0.6);
            self.front_x = self.back_x + reach;
            self.front_mass = 0.10 + transfer * 0.70;
            self.neck = 0.45 + transfer * 0.25;
            self.slime_timer += 1;
            if self.slime_timer > TRAIL_INTERVAL {
                self.drop_trail();
                self.slime_timer = 0;
            }
        } else if self.slosh_phase < 1.0 {
            let merge = ((self.slosh_phase - 0.65) / 0.35).powf(1.5);
            self.back_x = self.slosh_origin + (self.front_x - self.slosh_origin) * merge;
            self.front_mass = 0.80 + merge * 0.20;
            self.neck = 0.70 * (1.0 - merge);
        } else {
            self.slosh_phase = 0.0;
            self.back_x = self.front_x;
            self.front_mass = 0.5;
            self.neck = 0.0;
            self.mid_slosh = false;
            self.drop_trail();
            if !self.scared {
                if self.back_x > base.spawn.x + base.patrol_range {
                    base.direction = -1.0;
                } else if self.back_x < base.spawn.x - base.patrol_range {
                    base.direction = 1.0;
                }
            }
        }
        self.back_mass = 1.0 - self.front_mass;
    }
}

//! Monster roster: one shared base plus a closed set of behaviours.
//!
//! Every variant is driven through the same contract on [`Monster`]:
//! `update`, `take_damage`, `reset_aggro`, `separate_from`, `rect` and
//! `visual_rect`. Per-variant state lives in the variant's own struct.

mod blob;
mod chompy;
mod flyer;
mod razorback;
mod shriek;
mod snake;
mod spider;
mod taterbug;
mod walker;

pub use blob::{Blob, SlimeTrail};
pub use chompy::Chompy;
pub use flyer::Flyer;
pub use razorback::{Razorback, RazorbackState};
pub use shriek::Shriek;
pub use snake::{Snake, SnakeMode, SnakeState};
pub use spider::{Spider, SpiderState};
pub use taterbug::Taterbug;
pub use walker::Walker;

use bevy::math::Vec2;
use rand::Rng;

use crate::sim::Playfield;
use crate::sim::geom::Rect;
use crate::sim::physics::{self, Body, Contact, GRAVITY};
use crate::sim::platform::Platform;

pub const MONSTER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
/// Ledge probes never look closer than this past the leading edge.
const MIN_PROBE_DISTANCE: f32 = 10.0;

/// Stable handle for a monster within one stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonsterId(pub u32);

/// Result of [`Monster::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    /// Invulnerable right now; health untouched.
    Ignored,
    Hurt,
    Killed,
}

impl Damage {
    #[inline]
    pub fn is_dead(self) -> bool {
        self == Damage::Killed
    }
}

/// A grapple bite landed on the player this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bite {
    pub damage: i32,
}

/// The player as monsters see it: already moved this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
}

impl PlayerView {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Read-only context for one monster step.
#[derive(Clone, Copy, Debug)]
pub struct Surroundings<'a> {
    pub platforms: &'a [Platform],
    pub player: PlayerView,
    pub field: Playfield,
}

/// State every monster carries regardless of behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct MonsterBase {
    pub id: MonsterId,
    pub spawn: Vec2,
    pub body: Body,
    pub patrol_range: f32,
    pub speed: f32,
    pub health: i32,
    /// -1.0 or 1.0.
    pub direction: f32,
    pub gravity: f32,
}

impl MonsterBase {
    pub fn new(id: MonsterId, spawn: Vec2, patrol_range: f32, speed: f32, health: i32) -> Self {
        Self {
            id,
            spawn,
            body: Body::new(spawn, MONSTER_SIZE),
            patrol_range,
            speed,
            health,
            direction: 1.0,
            gravity: GRAVITY,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Resting on a solid platform right now.
    pub fn is_supported(&self, platforms: &[Platform]) -> bool {
        let r = self.rect();
        physics::any_solid_hit(&Rect::new(r.x, r.bottom(), r.w, 1.0), platforms)
    }

    /// Ledge check for a step of `step` pixels in the current direction.
    pub fn ground_ahead(&self, step: f32, world: &Surroundings) -> bool {
        self.ground_ahead_towards(self.direction, step, world)
    }

    pub fn ground_ahead_towards(&self, direction: f32, step: f32, world: &Surroundings) -> bool {
        physics::has_ground_ahead(
            &self.rect(),
            direction,
            step.abs().max(MIN_PROBE_DISTANCE),
            world.platforms,
            world.field.height,
        )
    }

    /// Walk `dx` and turn around on a wall. Returns the wall hit, if any.
    pub fn walk(&mut self, dx: f32, platforms: &[Platform]) -> Option<usize> {
        let hit = self.body.move_x(dx, platforms);
        if hit.is_some() {
            self.direction = -self.direction;
        }
        hit
    }

    /// Turn back once outside `spawn.x ± patrol_range`.
    pub fn keep_to_patrol(&mut self) {
        if self.body.pos.x > self.spawn.x + self.patrol_range {
            self.direction = -1.0;
        } else if self.body.pos.x < self.spawn.x - self.patrol_range {
            self.direction = 1.0;
        }
    }

    /// Plain damage: subtract and report.
    pub fn hurt(&mut self, amount: i32) -> Damage {
        self.health -= amount;
        if self.health <= 0 { Damage::Killed } else { Damage::Hurt }
    }

    /// Move vertically by the current velocity against the platforms.
    pub fn settle(&mut self, platforms: &[Platform]) -> Option<Contact> {
        self.body.move_y(platforms)
    }

    /// The patrol step shared by the simple walkers: reverse at a ledge,
    /// walk, reverse at a wall or the patrol bounds, then fall. A monster
    /// with a drop on both sides stays put.
    pub fn patrol_step(&mut self, step: f32, world: &Surroundings) {
        self.body.fall(self.gravity);
        let mut step = step;
        if self.is_supported(world.platforms) && !self.ground_ahead(step, world) {
            self.direction = -self.direction;
            // Stranded: both ways are a drop.
            if !self.ground_ahead(step, world) {
                step = 0.0;
            }
        }
        self.walk(step * self.direction, world.platforms);
        self.keep_to_patrol();
        self.settle(world.platforms);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    Walker(Walker),
    Flyer(Flyer),
    Spider(Spider),
    Blob(Blob),
    Taterbug(Taterbug),
    Razorback(Razorback),
    Chompy(Chompy),
    Snake(Snake),
    Shriek(Shriek),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Walker,
    Flyer,
    Spider,
    Blob,
    Taterbug,
    Razorback,
    Chompy,
    Snake,
    Shriek,
}

impl MonsterKind {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "walker" => MonsterKind::Walker,
            "flyer" => MonsterKind::Flyer,
            "spider" => MonsterKind::Spider,
            "blob" => MonsterKind::Blob,
            "taterbug" => MonsterKind::Taterbug,
            "razorback" => MonsterKind::Razorback,
            "chompy" => MonsterKind::Chompy,
            "snake" => MonsterKind::Snake,
            "shriek" => MonsterKind::Shriek,
            _ => return None,
        })
    }
}

/// Spawn parameters for one monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawn {
    pub kind: MonsterKind,
    pub pos: Vec2,
    pub patrol_range: f32,
    pub speed: f32,
    pub health: i32,
    pub aggro_duration: u32,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub base: MonsterBase,
    pub behavior: Behavior,
}

impl Monster {
    pub fn spawn(id: MonsterId, s: &Spawn) -> Self {
        let mut base = MonsterBase::new(id, s.pos, s.patrol_range, s.speed, s.health);
        let behavior = match s.kind {
            MonsterKind::Walker => Behavior::Walker(Walker),
            MonsterKind::Flyer => Behavior::Flyer(Flyer::default()),
            MonsterKind::Spider => Behavior::Spider(Spider::default()),
            MonsterKind::Blob => Behavior::Blob(Blob::new(&mut base, s.size)),
            MonsterKind::Taterbug => Behavior::Taterbug(Taterbug::default()),
            MonsterKind::Razorback => Behavior::Razorback(Razorback::new(&mut base)),
            MonsterKind::Chompy => Behavior::Chompy(Chompy::default()),
            MonsterKind::Snake => Behavior::Snake(Snake::new(&base, s.aggro_duration)),
            MonsterKind::Shriek => Behavior::Shriek(Shriek::new(s.aggro_duration)),
        };
        Self { base, behavior }
    }

    #[inline]
    pub fn id(&self) -> MonsterId {
        self.base.id
    }

    pub fn kind(&self) -> MonsterKind {
        match &self.behavior {
            Behavior::Walker(_) => MonsterKind::Walker,
            Behavior::Flyer(_) => MonsterKind::Flyer,
            Behavior::Spider(_) => MonsterKind::Spider,
            Behavior::Blob(_) => MonsterKind::Blob,
            Behavior::Taterbug(_) => MonsterKind::Taterbug,
            Behavior::Razorback(_) => MonsterKind::Razorback,
            Behavior::Chompy(_) => MonsterKind::Chompy,
            Behavior::Snake(_) => MonsterKind::Snake,
            Behavior::Shriek(_) => MonsterKind::Shriek,
        }
    }

    /// Collision box.
    pub fn rect(&self) -> Rect {
        match &self.behavior {
            Behavior::Blob(b) => b.rect(),
            _ => self.base.rect(),
        }
    }

    /// Where the monster is drawn. Differs from [`Monster::rect`] only for
    /// the bobbing Flyer.
    pub fn visual_rect(&self) -> Rect {
        match &self.behavior {
            Behavior::Flyer(f) => {
                let r = self.base.rect();
                Rect::new(r.x, r.y + f.bob(), r.w, r.h)
            }
            _ => self.rect(),
        }
    }

    pub fn update(&mut self, world: &Surroundings, rng: &mut impl Rng) -> Option<Bite> {
        let base = &mut self.base;
        match &mut self.behavior {
            Behavior::Walker(w) => w.update(base, world),
            Behavior::Flyer(f) => f.update(base),
            Behavior::Spider(s) => s.update(base, world),
            Behavior::Blob(b) => b.update(base, world, rng),
            Behavior::Taterbug(t) => t.update(base, world),
            Behavior::Razorback(r) => r.update(base, world, rng),
            Behavior::Chompy(c) => c.update(base, world),
            Behavior::Snake(s) => return s.update(base, world, rng),
            Behavior::Shriek(s) => s.update(base, world),
        }
        None
    }

    /// Callers must not assume health changed: rolled armour ignores hits.
    pub fn take_damage(&mut self, amount: i32) -> Damage {
        let base = &mut self.base;
        match &mut self.behavior {
            Behavior::Blob(b) => b.take_damage(base, amount),
            Behavior::Taterbug(t) => t.take_damage(base, amount),
            Behavior::Razorback(r) => r.take_damage(base, amount),
            Behavior::Snake(s) => s.take_damage(base, amount),
            Behavior::Shriek(s) => s.take_damage(base, amount),
            Behavior::Walker(_) | Behavior::Flyer(_) | Behavior::Spider(_) | Behavior::Chompy(_) => {
                base.hurt(amount)
            }
        }
    }

    /// Drop any hostile lock, e.g. when the player respawns.
    pub fn reset_aggro(&mut self) {
        match &mut self.behavior {
            Behavior::Blob(b) => b.reset_aggro(),
            Behavior::Razorback(r) => r.reset_aggro(),
            Behavior::Snake(s) => s.reset_aggro(),
            Behavior::Shriek(s) => s.reset_aggro(),
            Behavior::Walker(_)
            | Behavior::Flyer(_)
            | Behavior::Spider(_)
            | Behavior::Taterbug(_)
            | Behavior::Chompy(_) => {}
        }
    }

    /// Whether touching the player hurts them this tick.
    pub fn deals_contact_damage(&self) -> bool {
        !matches!(&self.behavior, Behavior::Snake(s) if s.is_wrapped())
    }

    pub fn is_aggressive(&self) -> bool {
        match &self.behavior {
            Behavior::Blob(b) => b.scared,
            Behavior::Razorback(r) => r.aggro,
            Behavior::Snake(s) => s.aggroed || s.is_wrapped(),
            Behavior::Shriek(s) => s.agitated,
            Behavior::Chompy(c) => c.charging,
            _ => false,
        }
    }

    /// Shift the monster without any collision response.
    pub fn nudge(&mut self, delta: Vec2) {
        self.base.body.pos += delta;
        if let Behavior::Blob(b) = &mut self.behavior {
            b.shift(delta);
        }
    }

    /// Push this monster and `other` apart by half the overlap each.
    pub fn separate_from(&mut self, other: &mut Monster) -> bool {
        let Some(delta) = physics::separation(&self.rect(), &other.rect()) else {
            return false;
        };
        self.nudge(delta);
        other.nudge(-delta);
        true
    }

    pub fn is_below(&self, field: &Playfield) -> bool {
        self.rect().y > field.height
    }
}

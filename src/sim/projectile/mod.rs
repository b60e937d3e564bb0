//! Player projectiles: straight bullets (with optional vertical drift for
//! spread shots) and homing missiles.

use bevy::math::Vec2;

use crate::sim::Playfield;
use crate::sim::geom::Rect;
use crate::sim::monsters::MonsterId;

pub const BULLET_SIZE: Vec2 = Vec2::new(10.0, 6.0);
pub const MISSILE_SIZE: Vec2 = Vec2::new(14.0, 8.0);
pub const MISSILE_SPEED: f32 = 9.0;
pub const MISSILE_TURN_RATE: f32 = 0.15;
/// Missiles only lock onto monsters closer than this.
pub const MISSILE_LOCK_RANGE: f32 = 400.0;

#[derive(Clone, Debug, PartialEq)]
pub enum ProjectileKind {
    Bullet,
    Missile { turn_rate: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub direction: f32,
    /// Vertical drift per unit of speed. Zero except for spread side shots.
    pub angle: f32,
    pub damage: i32,
    pub pierce: bool,
    pub kind: ProjectileKind,
    /// Monsters a piercing projectile already damaged.
    hits: Vec<MonsterId>,
}

impl Projectile {
    pub fn bullet(pos: Vec2, direction: f32, speed: f32, angle: f32, damage: i32, pierce: bool) -> Self {
        Self {
            pos,
            size: BULLET_SIZE,
            vel: Vec2::new(speed * direction, speed * angle),
            speed,
            direction,
            angle,
            damage,
            pierce,
            kind: ProjectileKind::Bullet,
            hits: Vec::new(),
        }
    }

    pub fn missile(pos: Vec2, direction: f32, damage: i32, pierce: bool) -> Self {
        Self {
            pos,
            size: MISSILE_SIZE,
            vel: Vec2::new(MISSILE_SPEED * direction, 0.0),
            speed: MISSILE_SPEED,
            direction,
            angle: 0.0,
            damage,
            pierce,
            kind: ProjectileKind::Missile { turn_rate: MISSILE_TURN_RATE },
            hits: Vec::new(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn is_missile(&self) -> bool {
        matches!(self.kind, ProjectileKind::Missile { .. })
    }

    /// Advance one tick. `targets` are the centres of every live monster;
    /// bullets ignore them.
    pub fn update(&mut self, targets: &[Vec2]) {
        if let ProjectileKind::Missile { turn_rate } = self.kind {
            let center = self.rect().center();
            let nearest = targets
                .iter()
                .copied()
                .map(|t| (t, t.distance(center)))
                .filter(|(_, d)| *d < MISSILE_LOCK_RANGE)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((target, _)) = nearest {
                let desired = (target - center).normalize_or_zero() * self.speed;
                self.vel += (desired - self.vel) * turn_rate;
            }
            if self.vel.x != 0.0 {
                self.direction = self.vel.x.signum();
            }
        }
        self.pos += self.vel;
    }

    pub fn is_off_screen(&self, field: &Playfield) -> bool {
        self.pos.x < 0.0 || self.pos.x > field.width || self.pos.y < 0.0 || self.pos.y > field.height
    }

    /// Record a hit on `id`. Returns `false` if this projectile already
    /// damaged that monster.
    pub fn register_hit(&mut self, id: MonsterId) -> bool {
        if self.hits.contains(&id) {
            return false;
        }
        self.hits.push(id);
        true
    }
}

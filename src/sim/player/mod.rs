//! The player-controlled ant.

use bevy::math::Vec2;

use crate::sim::Playfield;
use crate::sim::cues::{Cue, CueSink};
use crate::sim::geom::Rect;
use crate::sim::physics::{Body, Contact, GRAVITY};
use crate::sim::platform::Platform;
use crate::sim::projectile::Projectile;

pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 60.0);
pub const MOVE_SPEED: f32 = 5.0;
pub const SPEED_BOOST_FACTOR: f32 = 1.5;
pub const JUMP_POWER: f32 = -15.0;
pub const MAX_HEALTH: i32 = 100;
pub const BASE_MAX_JUMPS: u32 = 2;

pub const MISSILE_COOLDOWN: u32 = 45;
pub const MISSILE_DAMAGE: i32 = 3;
/// Vertical spacing and drift of the two outer spread bullets.
pub const SPREAD_OFFSET: f32 = 15.0;
pub const SPREAD_ANGLE: f32 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weapon {
    #[default]
    Normal,
    Rapid,
    Spread,
    Missile,
}

impl Weapon {
    /// Bullet speed and cooldown of the straight-shooting weapons.
    fn ballistics(self) -> (f32, u32) {
        match self {
            Weapon::Normal => (12.0, 15),
            Weapon::Rapid => (16.0, 8),
            Weapon::Spread => (10.0, 20),
            Weapon::Missile => (0.0, MISSILE_COOLDOWN),
        }
    }

    fn cue(self) -> Cue {
        match self {
            Weapon::Normal => Cue::Shoot,
            Weapon::Rapid => Cue::ShootRapid,
            Weapon::Spread => Cue::ShootSpread,
            Weapon::Missile => Cue::ShootMissile,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unlocks {
    pub rapid: bool,
    pub spread: bool,
    pub missile: bool,
}

impl Unlocks {
    pub fn allows(&self, weapon: Weapon) -> bool {
        match weapon {
            Weapon::Normal => true,
            Weapon::Rapid => self.rapid,
            Weapon::Spread => self.spread,
            Weapon::Missile => self.missile,
        }
    }
}

/// Additive power-up toggles. None of them exclude another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub damage_boost: bool,
    pub speed_boost: bool,
    pub magnet: bool,
    pub pierce: bool,
    pub shield: bool,
    pub extra_jump: bool,
}

/// What survives a level transition. A new [`Player`] is built from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carry {
    pub weapon: Weapon,
    pub unlocks: Unlocks,
    pub modifiers: Modifiers,
}

/// One tick of player intent. `left`/`right` are held; the rest are edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub select: Option<Weapon>,
    pub buy: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub on_ground: bool,
    pub facing_right: bool,
    pub jump_count: u32,
    pub weapon: Weapon,
    pub unlocks: Unlocks,
    pub modifiers: Modifiers,
    pub shoot_cooldown: u32,
    pub missile_cooldown: u32,
    /// Half a health point owed from a shielded hit.
    wound: i32,
}

impl Player {
    pub fn new(spawn: Vec2, carry: &Carry) -> Self {
        let weapon = if carry.unlocks.allows(carry.weapon) {
            carry.weapon
        } else {
            Weapon::Normal
        };
        Self {
            body: Body::new(spawn, PLAYER_SIZE),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            on_ground: false,
            facing_right: true,
            jump_count: 0,
            weapon,
            unlocks: carry.unlocks,
            modifiers: carry.modifiers,
            shoot_cooldown: 0,
            missile_cooldown: 0,
            wound: 0,
        }
    }

    pub fn carry(&self) -> Carry {
        Carry { weapon: self.weapon, unlocks: self.unlocks, modifiers: self.modifiers }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Thin strip along the bottom edge, used by crumbling platforms.
    pub fn feet_rect(&self) -> Rect {
        let r = self.rect();
        Rect::new(r.x, r.bottom() - 1.0, r.w, 2.0)
    }

    pub fn max_jumps(&self) -> u32 {
        if self.modifiers.extra_jump {
            BASE_MAX_JUMPS + 1
        } else {
            BASE_MAX_JUMPS
        }
    }

    pub fn speed(&self) -> f32 {
        if self.modifiers.speed_boost {
            MOVE_SPEED * SPEED_BOOST_FACTOR
        } else {
            MOVE_SPEED
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Horizontal intent and weapon selection. Locked weapons are ignored.
    pub fn handle_input(&mut self, controls: &Controls) {
        self.body.vel.x = 0.0;
        if controls.left {
            self.body.vel.x = -self.speed();
            self.facing_right = false;
        }
        if controls.right {
            self.body.vel.x = self.speed();
            self.facing_right = true;
        }
        if let Some(weapon) = controls.select {
            if self.unlocks.allows(weapon) {
                self.weapon = weapon;
            }
        }
    }

    pub fn jump(&mut self, cues: &mut impl CueSink) -> bool {
        if self.jump_count >= self.max_jumps() {
            return false;
        }
        self.body.vel.y = JUMP_POWER;
        cues.cue(if self.jump_count == 0 { Cue::Jump } else { Cue::DoubleJump });
        self.jump_count += 1;
        self.on_ground = false;
        true
    }

    /// Fire the current weapon if its cooldown allows.
    pub fn shoot(&mut self, out: &mut Vec<Projectile>, cues: &mut impl CueSink) -> bool {
        let direction = if self.facing_right { 1.0 } else { -1.0 };
        let r = self.rect();
        let origin = Vec2::new(
            if self.facing_right { r.right() } else { r.x - 10.0 },
            r.y + (r.h / 2.0).floor() - 5.0,
        );
        let pierce = self.modifiers.pierce;
        let boost = if self.modifiers.damage_boost { 2 } else { 1 };
        let (speed, cooldown) = self.weapon.ballistics();

        if self.weapon == Weapon::Missile {
            if self.missile_cooldown > 0 {
                return false;
            }
            out.push(Projectile::missile(origin, direction, MISSILE_DAMAGE * boost, pierce));
            self.missile_cooldown = cooldown;
        } else {
            if self.shoot_cooldown > 0 {
                return false;
            }
            out.push(Projectile::bullet(origin, direction, speed, 0.0, boost, pierce));
            if self.weapon == Weapon::Spread {
                let up = origin - Vec2::new(0.0, SPREAD_OFFSET);
                let down = origin + Vec2::new(0.0, SPREAD_OFFSET);
                out.push(Projectile::bullet(up, direction, speed, -SPREAD_ANGLE, boost, pierce));
                out.push(Projectile::bullet(down, direction, speed, SPREAD_ANGLE, boost, pierce));
            }
            self.shoot_cooldown = cooldown;
        }
        cues.cue(self.weapon.cue());
        true
    }

    /// Gravity, movement and platform resolution for one tick.
    pub fn update(&mut self, platforms: &mut [Platform], cues: &mut impl CueSink) {
        self.body.fall(GRAVITY);
        self.body.move_x(self.body.vel.x, platforms);

        self.on_ground = false;
        if let Some(Contact::Floor(i)) = self.body.move_y(platforms) {
            let platform = &mut platforms[i];
            match platform.bounce_power() {
                Some(power) => {
                    self.body.vel.y = power;
                    self.jump_count = 1;
                    platform.on_landed();
                    cues.cue(Cue::Bounce);
                }
                None => {
                    self.on_ground = true;
                    self.jump_count = 0;
                }
            }
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.missile_cooldown = self.missile_cooldown.saturating_sub(1);
    }

    /// Keep the player inside the side walls; falling out the bottom is lethal.
    pub fn confine(&mut self, field: &Playfield) {
        self.body.pos.x = self.body.pos.x.clamp(0.0, field.width - self.body.size.x);
        if self.body.pos.y > field.height {
            self.health = 0;
        }
    }

    /// Second correction pass after an external shove such as knockback.
    pub fn resolve_pushed_collision(&mut self, platforms: &[Platform]) {
        self.body.push_out(platforms);
    }

    /// Apply `amount` points of damage. A shield halves it; the odd half
    /// point is carried until the next hit.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let halves = if self.modifiers.shield { amount } else { amount * 2 };
        let total = halves + self.wound;
        let lost = total / 2;
        self.wound = total % 2;
        self.health -= lost;
        lost
    }

    /// Back to the spawn point with zero velocity, e.g. after a death.
    pub fn reposition(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.body.vel = Vec2::ZERO;
        self.jump_count = 0;
        self.on_ground = false;
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
        self.wound = 0;
    }
}

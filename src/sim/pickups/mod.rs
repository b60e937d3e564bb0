//! Level exit, currency pickup and shop stands.

use bevy::math::Vec2;

use crate::sim::geom::Rect;
use crate::sim::player::Player;

pub const PORTAL_SIZE: Vec2 = Vec2::new(80.0, 60.0);
pub const SPORE_RADIUS: f32 = 15.0;
const SPORE_FLOAT: f32 = 8.0;
pub const MAGNET_RANGE: f32 = 300.0;
pub const MAGNET_SPEED: f32 = 6.0;
pub const SHOP_ITEM_SIZE: Vec2 = Vec2::new(120.0, 80.0);

/// Level exit. Inert until activated; never deactivates within a level.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub anim_phase: f32,
}

impl Portal {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, size: PORTAL_SIZE, active: false, anim_phase: 0.0 }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn update(&mut self) {
        self.anim_phase += 0.1;
    }
}

/// Currency pickup, spawned once the level is cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct Spore {
    /// Centre of the resting position; the pickup floats around it.
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
    pub float_phase: f32,
}

impl Spore {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, radius: SPORE_RADIUS, collected: false, float_phase: 0.0 }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.float_phase.sin() * SPORE_FLOAT)
    }

    pub fn rect(&self) -> Rect {
        let c = self.center();
        Rect::new(c.x - self.radius, c.y - self.radius, self.radius * 2.0, self.radius * 2.0)
    }

    pub fn update(&mut self) {
        self.float_phase += 0.05;
    }

    /// Magnet pull: drift towards `target` while within range.
    pub fn attract(&mut self, target: Vec2) {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance < MAGNET_RANGE && distance > 0.0 {
            self.pos += delta / distance * MAGNET_SPEED.min(distance);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShopItemKind {
    Life,
    LifeBundle,
    WeaponRapid,
    WeaponSpread,
    WeaponMissile,
    DamageBoost,
    SpeedBoost,
    Magnet,
    Pierce,
    Shield,
    ExtraJump,
}

impl ShopItemKind {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "life" => ShopItemKind::Life,
            "life_bundle" => ShopItemKind::LifeBundle,
            "weapon_rapid" => ShopItemKind::WeaponRapid,
            "weapon_spread" => ShopItemKind::WeaponSpread,
            "weapon_missile" => ShopItemKind::WeaponMissile,
            "damage_boost" => ShopItemKind::DamageBoost,
            "speed_boost" => ShopItemKind::SpeedBoost,
            "magnet" => ShopItemKind::Magnet,
            "pierce" => ShopItemKind::Pierce,
            "shield" => ShopItemKind::Shield,
            "extra_jump" => ShopItemKind::ExtraJump,
            _ => return None,
        })
    }

    /// Apply the purchase to the player. Returns the number of lives gained.
    pub fn apply(self, player: &mut Player) -> u32 {
        let mods = &mut player.modifiers;
        match self {
            ShopItemKind::Life => return 1,
            ShopItemKind::LifeBundle => return 3,
            ShopItemKind::WeaponRapid => player.unlocks.rapid = true,
            ShopItemKind::WeaponSpread => player.unlocks.spread = true,
            ShopItemKind::WeaponMissile => player.unlocks.missile = true,
            ShopItemKind::DamageBoost => mods.damage_boost = true,
            ShopItemKind::SpeedBoost => mods.speed_boost = true,
            ShopItemKind::Magnet => mods.magnet = true,
            ShopItemKind::Pierce => mods.pierce = true,
            ShopItemKind::Shield => mods.shield = true,
            ShopItemKind::ExtraJump => mods.extra_jump = true,
        }
        0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShopItem {
    pub name: String,
    pub kind: ShopItemKind,
    pub cost: u32,
    pub description: String,
    /// Centre of the stand.
    pub pos: Vec2,
    pub purchased: bool,
    pub hover: bool,
}

impl ShopItem {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos - SHOP_ITEM_SIZE * 0.5, SHOP_ITEM_SIZE)
    }

    pub fn check_hover(&mut self, player: &Rect) -> bool {
        self.hover = self.rect().intersects(player);
        self.hover
    }
}

#[cfg(test)]
mod tests;

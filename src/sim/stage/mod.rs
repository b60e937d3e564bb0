//! One loaded level and the per-tick update order for everything in it.
//!
//! [`Stage::step`] advances the world by exactly one fixed tick:
//!
//! 1. player intent (weapon select, jump, shoot from the pre-move position)
//! 2. player physics, special platforms, side walls and the kill floor
//! 3. projectiles: motion, off-screen removal, first monster hit
//! 4. monsters (skipped in shops): AI against the moved player, pairwise
//!    separation, fall-out removal, then at most one bite or contact hit
//! 5. spore spawn and pickup, shop hover, portal animation and entry
//!
//! Lives, score totals, death and level transitions belong to the session.

use bevy::log::debug;
use bevy::math::Vec2;
use rand::Rng;

use crate::sim::Playfield;
use crate::sim::cues::{Cue, CueSink, StageEvent};
use crate::sim::level::{LevelData, LevelError};
use crate::sim::monsters::{Monster, PlayerView, Surroundings};
use crate::sim::pickups::{Portal, ShopItem, Spore};
use crate::sim::platform::{Platform, PlatformChange};
use crate::sim::player::{Carry, Controls, Player};
use crate::sim::projectile::Projectile;

pub const KILL_SCORE: u32 = 100;
pub const FALL_SCORE: u32 = 50;
pub const CONTACT_DAMAGE: i32 = 1;
pub const KNOCKBACK: f32 = 20.0;

/// What happened during one [`Stage::step`] that the session cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub score: u32,
    pub spore_collected: bool,
    pub portal_entered: bool,
}

/// Outcome of pressing the buy key in a shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purchase {
    /// Not standing at an unsold stand.
    Nothing,
    Bought { cost: u32, lives: u32 },
    TooExpensive,
}

#[derive(Clone, Debug)]
pub struct Stage {
    pub name: String,
    pub field: Playfield,
    pub spawn: Vec2,
    pub background: [u8; 3],
    pub is_shop: bool,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub monsters: Vec<Monster>,
    pub projectiles: Vec<Projectile>,
    pub portal: Portal,
    pub spore: Option<Spore>,
    pub spore_spawned: bool,
    pub shop_items: Vec<ShopItem>,
    /// Monster entries dropped at load for naming an unknown type.
    pub skipped_monsters: usize,
    events: Vec<StageEvent>,
}

impl Stage {
    pub fn load(level: &LevelData, field: Playfield, carry: &Carry) -> Result<Self, LevelError> {
        let spawn = level.spawn()?;
        let (monsters, skipped_monsters) = level.build_monsters(0);
        let portal_pos = level
            .portal_position
            .map(Vec2::from)
            .unwrap_or(Vec2::new(field.width / 2.0 - 40.0, 10.0));

        let mut portal = Portal::new(portal_pos);
        if level.is_shop {
            portal.activate();
        }

        Ok(Self {
            name: level.name.clone(),
            field,
            spawn,
            background: level.background_color,
            is_shop: level.is_shop,
            player: Player::new(spawn, carry),
            platforms: level.build_platforms(),
            monsters,
            projectiles: Vec::new(),
            portal,
            spore: None,
            spore_spawned: false,
            shop_items: if level.is_shop { level.build_shop_items() } else { Vec::new() },
            skipped_monsters,
            events: Vec::new(),
        })
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn step(&mut self, controls: &Controls, rng: &mut impl Rng) -> Step {
        let mut step = Step::default();

        self.player.handle_input(controls);
        if controls.jump {
            self.player.jump(&mut self.events);
        }
        if controls.shoot {
            self.player.shoot(&mut self.projectiles, &mut self.events);
        }

        self.player.update(&mut self.platforms, &mut self.events);
        self.update_platforms();
        self.player.confine(&self.field);

        step.score += self.update_projectiles();

        if !self.is_shop {
            step.score += self.update_monsters(rng);
        }

        if !self.is_shop && self.monsters.is_empty() && !self.spore_spawned {
            self.spore = Some(Spore::new(Vec2::new(self.field.width / 2.0, self.field.height / 2.0)));
            self.spore_spawned = true;
            self.events.cue(Cue::SporeSpawn);
        }

        step.spore_collected = self.update_spore();

        if self.is_shop {
            let player_rect = self.player.rect();
            for item in &mut self.shop_items {
                item.check_hover(&player_rect);
            }
        }

        self.portal.update();
        step.portal_entered = self.portal.active && self.player.rect().intersects(&self.portal.rect());
        step
    }

    fn update_platforms(&mut self) {
        let feet = self.player.feet_rect();
        for (i, platform) in self.platforms.iter_mut().enumerate() {
            match platform.update(Some(&feet)) {
                Some(PlatformChange::Crumbled) => {
                    debug!("platform {i} crumbled");
                    self.events.cue(Cue::Crumble);
                }
                Some(PlatformChange::Restored) => debug!("platform {i} restored"),
                None => {}
            }
        }
    }

    fn update_projectiles(&mut self) -> u32 {
        let mut score = 0;
        let targets: Vec<Vec2> = self.monsters.iter().map(|m| m.rect().center()).collect();

        let mut i = 0;
        while i < self.projectiles.len() {
            let projectile = &mut self.projectiles[i];
            projectile.update(&targets);
            if projectile.is_off_screen(&self.field) {
                self.projectiles.remove(i);
                continue;
            }

            let rect = projectile.rect();
            let mut spent = false;
            for m in 0..self.monsters.len() {
                if !rect.intersects(&self.monsters[m].rect()) {
                    continue;
                }
                if projectile.pierce && !projectile.register_hit(self.monsters[m].id()) {
                    continue;
                }
                if self.monsters[m].take_damage(projectile.damage).is_dead() {
                    self.monsters.remove(m);
                    score += KILL_SCORE;
                    self.events.cue(Cue::EnemyDeath);
                } else {
                    self.events.cue(Cue::EnemyHit);
                }
                spent = !projectile.pierce;
                break;
            }

            if spent {
                self.projectiles.remove(i);
            } else {
                i += 1;
            }
        }
        score
    }

    fn update_monsters(&mut self, rng: &mut impl Rng) -> u32 {
        let view = PlayerView { pos: self.player.body.pos, size: self.player.body.size };
        let world = Surroundings { platforms: &self.platforms, player: view, field: self.field };
        let mut bite = None;
        for monster in &mut self.monsters {
            if let Some(b) = monster.update(&world, rng) {
                bite.get_or_insert(b);
            }
        }

        for i in 0..self.monsters.len() {
            let (head, tail) = self.monsters.split_at_mut(i + 1);
            for other in tail {
                head[i].separate_from(other);
            }
        }

        // A bite and a contact hit share the one damage application per tick.
        let mut hit_this_tick = false;
        if let Some(bite) = bite {
            self.player.take_damage(bite.damage);
            self.events.cue(Cue::Bite);
            hit_this_tick = true;
        }

        let mut score = 0;
        let field = self.field;
        let player = &mut self.player;
        let platforms = &self.platforms;
        let events = &mut self.events;
        self.monsters.retain(|monster| {
            if monster.is_below(&field) {
                score += FALL_SCORE;
                return false;
            }
            let rect = monster.rect();
            if !hit_this_tick && monster.deals_contact_damage() && player.rect().intersects(&rect) {
                player.take_damage(CONTACT_DAMAGE);
                events.cue(Cue::PlayerHit);
                hit_this_tick = true;
                player.body.pos.x += if player.body.pos.x < rect.x { -KNOCKBACK } else { KNOCKBACK };
                player.resolve_pushed_collision(platforms);
            }
            true
        });
        score
    }

    fn update_spore(&mut self) -> bool {
        let Some(spore) = self.spore.as_mut().filter(|s| !s.collected) else {
            return false;
        };
        spore.update();
        if self.player.modifiers.magnet {
            spore.attract(self.player.rect().center());
        }
        if !self.player.rect().intersects(&spore.rect()) {
            return false;
        }
        spore.collected = true;
        self.portal.activate();
        self.events.cue(Cue::SporeCollect);
        true
    }

    /// Buy whatever stand the player is hovering, paying from `spores`.
    pub fn purchase(&mut self, spores: &mut u32) -> Purchase {
        if !self.is_shop {
            return Purchase::Nothing;
        }
        let Some(item) = self.shop_items.iter_mut().find(|i| i.hover && !i.purchased) else {
            return Purchase::Nothing;
        };
        if *spores < item.cost {
            self.events.cue(Cue::ShopError);
            return Purchase::TooExpensive;
        }
        *spores -= item.cost;
        item.purchased = true;
        self.events.cue(Cue::ShopBuy);
        let lives = item.kind.apply(&mut self.player);
        if lives > 0 {
            self.events.cue(Cue::ExtraLife);
        }
        Purchase::Bought { cost: item.cost, lives }
    }

    /// Put the player back at the spawn point and calm every monster.
    pub fn respawn_player(&mut self, at: Vec2) {
        self.player.reposition(at);
        for monster in &mut self.monsters {
            monster.reset_aggro();
        }
    }
}

#[cfg(test)]
mod tests;

use bevy::math::Vec2;

use super::{Damage, MonsterBase, Surroundings};

pub const AGITATION_RANGE: f32 = 150.0;
const CHASE_FACTOR: f32 = 2.5;
const ROAM_SPIN: f32 = 0.02;
const ROAM_EASE: f32 = 0.05;
const SCREECH_INTERVAL: u32 = 60;

/// Territorial bat. Roams a figure-eight around its roost; when agitated it
/// flies straight at the player, ignoring platforms.
#[derive(Clone, Debug, PartialEq)]
pub struct Shriek {
    pub agitated: bool,
    pub agitation_timer: u32,
    pub agitation_duration: u32,
    pub roam_angle: f32,
    pub wing_phase: f32,
    pub screech_cooldown: u32,
}

impl Shriek {
    pub fn new(agitation_duration: u32) -> Self {
        Self {
            agitated: false,
            agitation_timer: 0,
            agitation_duration,
            roam_angle: 0.0,
            wing_phase: 0.0,
            screech_cooldown: 0,
        }
    }

    fn agitate(&mut self) {
        self.agitated = true;
        self.agitation_timer = self.agitation_duration;
    }

    pub fn take_damage(&mut self, base: &mut MonsterBase, amount: i32) -> Damage {
        self.agitate();
        base.hurt(amount)
    }

    pub fn reset_aggro(&mut self) {
        self.agitated = false;
        self.agitation_timer = 0;
    }

    /// Point on the roaming figure-eight for the current angle.
    pub fn roam_target(&self, base: &MonsterBase) -> Vec2 {
        let range = base.patrol_range;
        base.spawn
            + Vec2::new(
                self.roam_angle.sin() * range,
                (self.roam_angle * 2.0).sin() * range * 0.5,
            )
    }

    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        self.wing_phase += 0.4;
        let player = world.player.pos;
        if player.distance(base.body.pos) < AGITATION_RANGE {
            self.agitate();
        }

        if self.agitated {
            self.agitation_timer = self.agitation_timer.saturating_sub(1);
            if self.agitation_timer == 0 {
                self.agitated = false;
            }
            let delta = player - base.body.pos;
            let distance = delta.length().max(1.0);
            base.body.pos += delta / distance * base.speed * CHASE_FACTOR;
            base.direction = if delta.x > 0.0 { 1.0 } else { -1.0 };
            self.screech_cooldown = match self.screech_cooldown {
                0 => SCREECH_INTERVAL,
                n => n - 1,
            };
        } else {
            self.roam_angle += ROAM_SPIN;
            let delta = self.roam_target(base) - base.body.pos;
            base.body.pos += delta * ROAM_EASE;
            if delta.x.abs() > 0.5 {
                base.direction = delta.x.signum();
            }
        }
    }
}

use super::{MonsterBase, Surroundings};

pub const CHARGE_SPEED: f32 = 8.0;
/// "Same floor" band and horizontal reach of the charge trigger.
const SIGHT_Y: f32 = 50.0;
const SIGHT_X: f32 = 300.0;

/// Patrols until the player is level with it, then charges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chompy {
    pub charging: bool,
    pub anim: u32,
}

impl Chompy {
    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        self.anim = self.anim.wrapping_add(1);
        let player = world.player.pos;
        let pos = base.body.pos;
        let in_sight = (player.y - pos.y).abs() < SIGHT_Y && (player.x - pos.x).abs() < SIGHT_X;

        if !in_sight {
            self.charging = false;
            base.patrol_step(base.speed, world);
            return;
        }

        self.charging = true;
        base.body.fall(base.gravity);
        base.direction = if player.x > pos.x { 1.0 } else { -1.0 };
        let supported = base.is_supported(world.platforms);
        if !supported || base.ground_ahead(CHARGE_SPEED, world) {
            // A wall stops the charge dead; no bounce.
            base.body.move_x(CHARGE_SPEED * base.direction, world.platforms);
        }
        base.settle(world.platforms);
    }
}

use super::{Damage, MonsterBase, Surroundings};

pub const ROLL_DURATION: u32 = 120;
const ROLL_SPEED_FACTOR: f32 = 3.0;

/// Armoured bug: a hit that does not kill curls it into an invulnerable,
/// fast-rolling ball for [`ROLL_DURATION`] ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Taterbug {
    pub rolled: bool,
    pub roll_timer: u32,
}

impl Taterbug {
    pub fn take_damage(&mut self, base: &mut MonsterBase, amount: i32) -> Damage {
        if self.rolled {
            return Damage::Ignored;
        }
        let outcome = base.hurt(amount);
        if outcome == Damage::Hurt {
            self.rolled = true;
            self.roll_timer = ROLL_DURATION;
        }
        outcome
    }

    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        let step = if self.rolled {
            self.roll_timer = self.roll_timer.saturating_sub(1);
            if self.roll_timer == 0 {
                self.rolled = false;
            }
            base.speed * ROLL_SPEED_FACTOR
        } else {
            base.speed
        };
        base.patrol_step(step, world);
    }
}

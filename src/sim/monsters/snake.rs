use std::collections::VecDeque;

use bevy::math::Vec2;
use rand::Rng;

use super::{Bite, Damage, MonsterBase, Surroundings};
use crate::sim::geom::Rect;
use crate::sim::physics;
use crate::sim::platform::Platform;

pub const SEGMENTS: usize = 12;
pub const SEGMENT_SPACING: usize = 5;
pub const HISTORY_LEN: usize = SEGMENTS * SEGMENT_SPACING;
pub const DETECTION_RANGE: f32 = 120.0;
pub const LUNGE_RANGE: f32 = 200.0;
pub const LUNGE_POWER: f32 = 12.0;
pub const LUNGE_LIFT: f32 = -8.0;
/// Lunges arc under a lighter gravity than walking.
const LUNGE_GRAVITY_FACTOR: f32 = 0.8;
const LUNGE_SIM_STEPS: u32 = 120;
const LUNGE_REACH: f32 = 40.0;
/// A lunge that drops this far below the spawn is abandoned.
const LUNGE_MAX_DROP: f32 = 200.0;
pub const WRAP_RANGE: f32 = 30.0;
pub const WRAP_DURATION: u32 = 90;
pub const WRAP_RADIUS: f32 = 25.0;
const WRAP_SPIN: f32 = 0.15;
pub const BITE_DAMAGE: i32 = 1;
pub const BITE_COOLDOWN_MIN: u32 = 60;
pub const BITE_COOLDOWN_MAX: u32 = 120;
const RELEASE_LIFT: f32 = -6.0;
const RELEASE_PUSH: f32 = 30.0;
const CHASE_FACTOR: f32 = 2.0;
const PATROL_FACTOR: f32 = 1.2;
const HISTORY_STEP: f32 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SnakeMode {
    #[default]
    Slither,
    Lunging {
        vel: Vec2,
    },
    Wrapped {
        angle: f32,
        timer: u32,
        bite_cooldown: u32,
    },
}

/// The four externally visible states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeState {
    Patrol,
    Aggroed,
    Lunging,
    Wrapped,
}

/// Slithers on patrol; when provoked it lunges at the player, wraps around
/// them and bites until it lets go.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    pub mode: SnakeMode,
    pub aggroed: bool,
    pub aggro_timer: u32,
    pub aggro_duration: u32,
    pub slither_phase: f32,
    pub tongue_flick: u32,
    /// Head positions, newest first. The body is sampled from it.
    pub history: VecDeque<Vec2>,
}

impl Snake {
    pub fn new(base: &MonsterBase, aggro_duration: u32) -> Self {
        let head = base.body.pos + Vec2::new(20.0, 30.0);
        Self {
            mode: SnakeMode::Slither,
            aggroed: false,
            aggro_timer: 0,
            aggro_duration,
            slither_phase: 0.0,
            tongue_flick: 0,
            history: std::iter::repeat_n(head, HISTORY_LEN).collect(),
        }
    }

    pub fn state(&self) -> SnakeState {
        match self.mode {
            SnakeMode::Wrapped { .. } => SnakeState::Wrapped,
            SnakeMode::Lunging { .. } => SnakeState::Lunging,
            SnakeMode::Slither if self.aggroed => SnakeState::Aggroed,
            SnakeMode::Slither => SnakeState::Patrol,
        }
    }

    #[inline]
    pub fn is_wrapped(&self) -> bool {
        matches!(self.mode, SnakeMode::Wrapped { .. })
    }

    pub fn tongue_out(&self) -> bool {
        self.tongue_flick < 15
    }

    pub fn take_damage(&mut self, base: &mut MonsterBase, amount: i32) -> Damage {
        if !self.is_wrapped() {
            self.provoke();
        }
        base.hurt(amount)
    }

    pub fn reset_aggro(&mut self) {
        self.aggroed = false;
        self.aggro_timer = 0;
        self.mode = SnakeMode::Slither;
    }

    fn provoke(&mut self) {
        self.aggroed = true;
        self.aggro_timer = self.aggro_duration;
    }

    /// Body segment centres, head first, with a travelling wave.
    pub fn segments(&self) -> Vec<Vec2> {
        let fallback = self.history.back().copied().unwrap_or_default();
        (0..SEGMENTS)
            .map(|i| match self.history.get(i * SEGMENT_SPACING) {
                Some(p) => {
                    let wave = (self.slither_phase - i as f32 * 0.5).sin() * (4.0 + i as f32 * 0.3);
                    Vec2::new(p.x + wave * 0.3, p.y)
                }
                None => fallback,
            })
            .collect()
    }

    pub fn update(
        &mut self,
        base: &mut MonsterBase,
        world: &Surroundings,
        rng: &mut impl Rng,
    ) -> Option<Bite> {
        self.slither_phase += 0.25;
        self.tongue_flick += 1;
        let flick_rate = if self.aggroed { 40 } else { 80 };
        if self.tongue_flick > flick_rate {
            self.tongue_flick = 0;
        }

        if let SnakeMode::Wrapped { angle, timer, bite_cooldown } = self.mode {
            return self.update_wrapped(base, world, rng, angle, timer, bite_cooldown);
        }

        let player = world.player.pos;
        let distance = player.distance(base.body.pos);
        if distance < DETECTION_RANGE && !self.aggroed {
            self.provoke();
        }
        if self.aggroed {
            self.aggro_timer = self.aggro_timer.saturating_sub(1);
            if self.aggro_timer == 0 {
                self.aggroed = false;
                self.mode = SnakeMode::Slither;
            }
        }

        if let SnakeMode::Lunging { vel } = self.mode {
            self.update_lunge(base, world, rng, vel);
            return None;
        }

        let supported = base.is_supported(world.platforms);
        if self.aggroed
            && supported
            && distance < LUNGE_RANGE
            && can_lunge_safely(base, player, world.platforms, world.field.height)
        {
            let vel = lunge_velocity(base.body.pos, player);
            base.direction = if vel.x > 0.0 { 1.0 } else { -1.0 };
            self.mode = SnakeMode::Lunging { vel };
            return None;
        }

        base.body.fall(base.gravity);
        let step = if self.aggroed {
            base.direction = if player.x > base.body.pos.x { 1.0 } else { -1.0 };
            let step = base.speed * CHASE_FACTOR;
            // No safe footing towards the player: hold and face them.
            if supported && !base.ground_ahead(step, world) { 0.0 } else { step }
        } else {
            let step = base.speed * PATROL_FACTOR;
            if supported && !base.ground_ahead(step, world) {
                base.direction = -base.direction;
            }
            step
        };

        if self.aggroed {
            base.body.move_x(step * base.direction, world.platforms);
        } else {
            base.walk(step * base.direction, world.platforms);
            base.keep_to_patrol();
        }
        base.settle(world.platforms);
        self.record_head(base);
        None
    }

    fn update_lunge(&mut self, base: &mut MonsterBase, world: &Surroundings, rng: &mut impl Rng, mut vel: Vec2) {
        vel.y += base.gravity * LUNGE_GRAVITY_FACTOR;
        base.body.pos += vel;

        let player = world.player.pos;
        if player.distance(base.body.pos) < WRAP_RANGE {
            let offset = base.body.pos - player;
            self.mode = SnakeMode::Wrapped {
                angle: offset.y.atan2(offset.x),
                timer: WRAP_DURATION,
                bite_cooldown: rng.gen_range(BITE_COOLDOWN_MIN..=BITE_COOLDOWN_MAX),
            };
            return;
        }

        for p in world.platforms {
            let solid = p.solid_rect();
            if !base.rect().intersects(&solid) {
                continue;
            }
            if vel.y > 0.0 {
                base.body.pos.y = solid.top() - base.body.size.y;
                base.body.vel = Vec2::ZERO;
                self.mode = SnakeMode::Slither;
                self.record_head(base);
                return;
            } else if vel.y < 0.0 {
                base.body.pos.y = solid.bottom();
                vel.y = 0.0;
            }
        }

        self.mode = if base.body.pos.y > base.spawn.y + LUNGE_MAX_DROP {
            // Give up and fall under normal gravity.
            base.body.vel = Vec2::new(0.0, vel.y.max(0.0));
            SnakeMode::Slither
        } else {
            SnakeMode::Lunging { vel }
        };
        self.record_head(base);
    }

    fn update_wrapped(
        &mut self,
        base: &mut MonsterBase,
        world: &Surroundings,
        rng: &mut impl Rng,
        angle: f32,
        timer: u32,
        bite_cooldown: u32,
    ) -> Option<Bite> {
        let timer = timer.saturating_sub(1);
        let angle = angle + WRAP_SPIN;
        let player = world.player;
        base.body.pos = player.pos + Vec2::new(angle.cos(), angle.sin()) * WRAP_RADIUS - Vec2::splat(20.0);

        let mut bite = None;
        let mut bite_cooldown = bite_cooldown.saturating_sub(1);
        if bite_cooldown == 0 {
            bite = Some(Bite { damage: BITE_DAMAGE });
            bite_cooldown = rng.gen_range(BITE_COOLDOWN_MIN..=BITE_COOLDOWN_MAX);
            self.tongue_flick = 0;
        }

        // Coil the body around the player in a slight outward spiral.
        let center = player.center();
        let spacing = SEGMENT_SPACING as f32;
        for (i, p) in self.history.iter_mut().enumerate() {
            let a = angle - i as f32 * (0.25 / spacing);
            let radius = WRAP_RADIUS + i as f32 * (0.5 / spacing);
            *p = center + Vec2::new(a.cos(), a.sin()) * radius;
        }

        if timer == 0 {
            self.mode = SnakeMode::Slither;
            base.body.vel = Vec2::new(0.0, RELEASE_LIFT);
            base.body.pos.x += base.direction * RELEASE_PUSH;
            self.aggro_timer = self.aggro_duration / 2;
        } else {
            self.mode = SnakeMode::Wrapped { angle, timer, bite_cooldown };
        }
        bite
    }

    fn record_head(&mut self, base: &MonsterBase) {
        let wave = self.slither_phase.sin() * 6.0;
        let head = base.body.pos + Vec2::new(20.0, 30.0 + wave);
        let last = self.history.front().copied().unwrap_or(head);
        let distance = last.distance(head);

        if distance > HISTORY_STEP {
            // Interpolate so fast moves keep the segments evenly spaced.
            let steps = ((distance / HISTORY_STEP) as usize).max(1);
            for i in 1..=steps {
                let t = i as f32 / steps as f32;
                self.history.push_front(last.lerp(head, t));
            }
        } else {
            self.history.push_front(head);
        }
        self.history.truncate(HISTORY_LEN);
    }
}

fn lunge_velocity(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let distance = delta.length().max(1.0);
    Vec2::new(delta.x / distance * LUNGE_POWER, LUNGE_LIFT)
}

/// Dry-run the lunge arc: safe if it reaches the player or comes down on a
/// platform before leaving the playfield.
pub fn can_lunge_safely(base: &MonsterBase, player: Vec2, platforms: &[Platform], field_height: f32) -> bool {
    let mut vel = lunge_velocity(base.body.pos, player);
    let gravity = base.gravity * LUNGE_GRAVITY_FACTOR;
    let mut pos = base.body.pos;

    for _ in 0..LUNGE_SIM_STEPS {
        vel.y += gravity;
        pos += vel;
        if pos.distance(player) < LUNGE_REACH {
            return true;
        }
        if vel.y > 0.0 && physics::any_solid_hit(&Rect::from_pos_size(pos, base.body.size), platforms) {
            return true;
        }
        if pos.y > field_height {
            return false;
        }
    }
    false
}

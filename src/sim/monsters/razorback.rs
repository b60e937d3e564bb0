use rand::Rng;

use super::{Damage, MonsterBase, Surroundings};

pub const RAZORBACK_HEIGHT: f32 = 45.0;
pub const AGGRO_RANGE: f32 = 300.0;
/// Aggro is only dropped past this distance.
pub const LEASH_RANGE: f32 = AGGRO_RANGE * 1.5;
pub const ROLL_SPEED: f32 = 8.0;
pub const BACKUP_DURATION: u32 = 30;
pub const DEFENSIVE_ROLL_DURATION: u32 = 45;
const BACKUP_FACTOR: f32 = 1.5;
const ATTACK_COOLDOWN_MIN: u32 = 30;
const ATTACK_COOLDOWN_MAX: u32 = 90;
const AFTER_DEFENSIVE_COOLDOWN: u32 = 20;
const AFTER_RESET_COOLDOWN: u32 = 60;
/// A charge counts as arrived within this distance of the target...
const ARRIVE_DISTANCE: f32 = 30.0;
/// ...or once it has overshot the target by this much.
const OVERSHOOT: f32 = 20.0;
const MAX_SPIKE: u32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RazorbackState {
    #[default]
    Walking,
    /// Rolling at the last known player position.
    Charging,
    /// Retreating after a charge so contact cannot lock on.
    BackingOff { timer: u32 },
    /// Curled up after taking a hit.
    DefensiveRoll { timer: u32 },
}

/// Aggressive taterbug: charges the player in a spiked roll with a jittered
/// cooldown, then backs off before re-arming.
#[derive(Clone, Debug, PartialEq)]
pub struct Razorback {
    pub state: RazorbackState,
    pub aggro: bool,
    pub target_x: f32,
    pub attack_cooldown: u32,
    pub roll_angle: f32,
    pub spike_length: u32,
}

impl Razorback {
    pub fn new(base: &mut MonsterBase) -> Self {
        base.body.size.y = RAZORBACK_HEIGHT;
        Self {
            state: RazorbackState::Walking,
            aggro: false,
            target_x: 0.0,
            attack_cooldown: 0,
            roll_angle: 0.0,
            spike_length: 0,
        }
    }

    /// Every rolling state is armoured.
    pub fn is_rolling(&self) -> bool {
        !matches!(self.state, RazorbackState::Walking)
    }

    pub fn take_damage(&mut self, base: &mut MonsterBase, amount: i32) -> Damage {
        if self.is_rolling() {
            return Damage::Ignored;
        }
        let outcome = base.hurt(amount);
        if outcome == Damage::Hurt {
            self.state = RazorbackState::DefensiveRoll { timer: DEFENSIVE_ROLL_DURATION };
        }
        outcome
    }

    pub fn reset_aggro(&mut self) {
        self.aggro = false;
        self.state = RazorbackState::Walking;
        self.attack_cooldown = AFTER_RESET_COOLDOWN;
    }

    fn rearm(&mut self, rng: &mut impl Rng) {
        self.state = RazorbackState::Walking;
        self.attack_cooldown = rng.gen_range(ATTACK_COOLDOWN_MIN..=ATTACK_COOLDOWN_MAX);
    }

    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings, rng: &mut impl Rng) {
        base.body.fall(base.gravity);

        let player_cx = world.player.center().x;
        let my_cx = base.body.center().x;
        let distance = (player_cx - my_cx).abs();
        if distance < AGGRO_RANGE {
            self.aggro = true;
            self.target_x = player_cx;
        } else if distance > LEASH_RANGE {
            self.aggro = false;
            self.state = RazorbackState::Walking;
        }

        self.spike_length = if self.state == RazorbackState::Charging {
            (self.spike_length + 1).min(MAX_SPIKE)
        } else {
            self.spike_length.saturating_sub(1)
        };
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        let supported = base.is_supported(world.platforms);

        match self.state {
            RazorbackState::BackingOff { timer } => {
                let away = if self.target_x > my_cx { -1.0 } else { 1.0 };
                let step = base.speed * BACKUP_FACTOR;
                let mut timer = timer.saturating_sub(1);
                if supported && !base.ground_ahead_towards(away, step, world) {
                    timer = 0;
                } else {
                    base.body.move_x(step * away, world.platforms);
                }
                if timer == 0 {
                    self.rearm(rng);
                } else {
                    self.state = RazorbackState::BackingOff { timer };
                }
            }
            RazorbackState::DefensiveRoll { timer } => {
                self.roll_angle += 0.1;
                let timer = timer.saturating_sub(1);
                if timer == 0 {
                    self.state = RazorbackState::Walking;
                    self.attack_cooldown = AFTER_DEFENSIVE_COOLDOWN;
                } else {
                    self.state = RazorbackState::DefensiveRoll { timer };
                }
            }
            RazorbackState::Charging if self.aggro => {
                let dir = if self.target_x > my_cx { 1.0 } else { -1.0 };
                base.direction = dir;
                if supported && !base.ground_ahead(ROLL_SPEED, world) {
                    self.rearm(rng);
                } else {
                    let wall = base.body.move_x(ROLL_SPEED * dir, world.platforms);
                    self.roll_angle += ROLL_SPEED * dir / 18.0;
                    let cx = base.body.center().x;
                    let arrived = (self.target_x - cx).abs() < ARRIVE_DISTANCE
                        || (dir > 0.0 && cx > self.target_x + OVERSHOOT)
                        || (dir < 0.0 && cx < self.target_x - OVERSHOOT);
                    if arrived || wall.is_some() {
                        self.state = RazorbackState::BackingOff { timer: BACKUP_DURATION };
                    }
                }
            }
            RazorbackState::Walking | RazorbackState::Charging => {
                if self.aggro && self.attack_cooldown == 0 {
                    self.state = RazorbackState::Charging;
                    self.target_x = player_cx;
                } else {
                    self.state = RazorbackState::Walking;
                    if supported && !base.ground_ahead(base.speed, world) {
                        base.direction = -base.direction;
                    }
                    base.walk(base.speed * base.direction, world.platforms);
                    base.keep_to_patrol();
                }
            }
        }

        base.settle(world.platforms);
    }
}

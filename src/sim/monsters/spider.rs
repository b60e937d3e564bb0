use super::{MonsterBase, Surroundings};

const CHASE_RANGE: f32 = 250.0;
const CHASE_FACTOR: f32 = 1.5;
const CLIMB_FACTOR: f32 = 1.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpiderState {
    #[default]
    Ground,
    /// Scaling the face of `wall`. `side` is +1 when the wall is to the right.
    Climbing { wall: usize, side: f32 },
}

/// Chases along the ground and climbs any wall it walks into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spider {
    pub state: SpiderState,
    pub leg_anim: f32,
}

impl Spider {
    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        self.leg_anim += 0.4;
        match self.state {
            SpiderState::Climbing { wall, side } => self.climb(base, world, wall, side),
            SpiderState::Ground => self.crawl(base, world),
        }
    }

    fn climb(&mut self, base: &mut MonsterBase, world: &Surroundings, wall: usize, side: f32) {
        base.body.vel.y = 0.0;
        let face = match world.platforms.get(wall).map(|p| p.solid_rect()) {
            Some(r) if !r.is_degenerate() => r,
            // The wall crumbled away underneath us.
            _ => {
                self.state = SpiderState::Ground;
                return;
            }
        };

        base.body.pos.y -= base.speed * CLIMB_FACTOR;
        let top = face.top() - base.body.size.y;
        if base.body.pos.y <= top {
            base.body.pos.y = top;
            base.body.pos.x = if side > 0.0 {
                face.left()
            } else {
                face.right() - base.body.size.x
            };
            // Step onto the top facing away from the face just climbed.
            base.direction = -side;
            self.state = SpiderState::Ground;
        }
    }

    fn crawl(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        base.body.fall(base.gravity);
        let supported = base.is_supported(world.platforms);
        let player_x = world.player.pos.x;

        let chasing = (player_x - base.body.pos.x).abs() < CHASE_RANGE;

        let dx = if chasing {
            base.direction = if player_x > base.body.pos.x { 1.0 } else { -1.0 };
            let step = base.speed * CHASE_FACTOR;
            if !supported || base.ground_ahead(step, world) {
                step * base.direction
            } else {
                0.0
            }
        } else {
            if supported && !base.ground_ahead(base.speed, world) {
                base.direction = -base.direction;
            }
            base.speed * base.direction
        };

        let hit = base.body.move_x(dx, world.platforms);
        if !chasing {
            base.keep_to_patrol();
        }
        match hit {
            Some(wall) if supported => {
                self.state = SpiderState::Climbing { wall, side: dx.signum() };
            }
            _ => {
                base.settle(world.platforms);
            }
        }
    }
}

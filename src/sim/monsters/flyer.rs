use super::MonsterBase;

const FLOAT_SPEED: f32 = 0.1;
const BOB_AMPLITUDE: f32 = 20.0;

/// Floats along its patrol line. Collision stays on the baseline; only the
/// drawn position bobs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flyer {
    pub float_offset: f32,
}

impl Flyer {
    /// Vertical draw offset from the collision baseline.
    pub fn bob(&self) -> f32 {
        self.float_offset.sin() * BOB_AMPLITUDE
    }

    pub fn update(&mut self, base: &mut MonsterBase) {
        self.float_offset += FLOAT_SPEED;
        base.body.pos.x += base.speed * base.direction;
        base.keep_to_patrol();
    }
}

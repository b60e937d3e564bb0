use super::{MonsterBase, Surroundings};

/// Patrols back and forth, turning at walls, ledges and its patrol bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Walker;

impl Walker {
    pub fn update(&mut self, base: &mut MonsterBase, world: &Surroundings) {
        base.patrol_step(base.speed, world);
    }
}

//! Platforms: static rectangles plus two special variants with their own
//! micro state machines.
//!
//! ```text
//! Bouncy:    Idle (spring animation only)
//! Unstable:  Solid --stand_timer >= CRUMBLE_TIME--> Crumbled
//!            Crumbled --respawn_timer >= RESPAWN_TIME--> Solid (stand_timer = 0)
//! ```
//!
//! While crumbled the collision rect is degenerate, so nothing can land on it.

use crate::sim::geom::Rect;

/// Ticks of continuous standing before an unstable platform gives way.
pub const CRUMBLE_TIME: u32 = 180;
/// Ticks a crumbled platform stays gone.
pub const RESPAWN_TIME: u32 = 300;
/// Upward impulse applied to a player landing on a bouncy platform.
pub const BOUNCE_POWER: f32 = -18.0;

const MAX_SHAKE: f32 = 4.0;
/// Half height of the band around a platform top that counts as "standing".
const STAND_TOLERANCE: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    pub power: f32,
    pub phase: f32,
    /// 1.0 right after a bounce, decays back to rest.
    pub squash: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Crumble {
    pub stand_timer: f32,
    pub crumbled: bool,
    pub respawn_timer: u32,
}

impl Crumble {
    /// Visual shake grows with how close the platform is to giving way.
    pub fn shake_amplitude(&self) -> f32 {
        if self.crumbled {
            return 0.0;
        }
        (self.stand_timer / CRUMBLE_TIME as f32).clamp(0.0, 1.0) * MAX_SHAKE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlatformKind {
    Normal,
    Bouncy(Spring),
    Unstable(Crumble),
}

/// Transition reported by [`Platform::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformChange {
    Crumbled,
    Restored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    /// Full geometry, kept even while crumbled.
    pub rect: Rect,
    pub color: [u8; 3],
    pub kind: PlatformKind,
}

impl Platform {
    pub fn normal(rect: Rect, color: [u8; 3]) -> Self {
        Self { rect, color, kind: PlatformKind::Normal }
    }

    pub fn bouncy(rect: Rect, color: [u8; 3]) -> Self {
        Self {
            rect,
            color,
            kind: PlatformKind::Bouncy(Spring { power: BOUNCE_POWER, phase: 0.0, squash: 0.0 }),
        }
    }

    pub fn unstable(rect: Rect, color: [u8; 3]) -> Self {
        Self { rect, color, kind: PlatformKind::Unstable(Crumble::default()) }
    }

    /// The rect used for every collision query.
    #[inline]
    pub fn solid_rect(&self) -> Rect {
        match &self.kind {
            PlatformKind::Unstable(c) if c.crumbled => Rect::new(self.rect.x, self.rect.y, 0.0, 0.0),
            _ => self.rect,
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.solid_rect().is_degenerate()
    }

    #[inline]
    pub fn bounce_power(&self) -> Option<f32> {
        match &self.kind {
            PlatformKind::Bouncy(s) => Some(s.power),
            _ => None,
        }
    }

    /// Called when the player lands on this platform.
    pub fn on_landed(&mut self) {
        if let PlatformKind::Bouncy(s) = &mut self.kind {
            s.squash = 1.0;
        }
    }

    /// Whether a feet rect rests on the top edge, within a tight band.
    pub fn is_stood_on(&self, feet: &Rect) -> bool {
        let band = Rect::new(
            self.rect.x,
            self.rect.y - STAND_TOLERANCE,
            self.rect.w,
            STAND_TOLERANCE * 2.0,
        );
        self.is_solid() && feet.intersects(&band)
    }

    /// Advance the platform's own state by one tick.
    ///
    /// `feet` is the player's feet rect, or `None` when the player is not in
    /// play (respawning).
    pub fn update(&mut self, feet: Option<&Rect>) -> Option<PlatformChange> {
        let standing = feet.is_some_and(|f| self.is_stood_on(f));

        match &mut self.kind {
            PlatformKind::Normal => None,
            PlatformKind::Bouncy(s) => {
                s.phase += 0.1;
                s.squash = (s.squash - 0.08).max(0.0);
                None
            }
            PlatformKind::Unstable(c) => {
                if c.crumbled {
                    c.respawn_timer += 1;
                    if c.respawn_timer >= RESPAWN_TIME {
                        c.crumbled = false;
                        c.respawn_timer = 0;
                        c.stand_timer = 0.0;
                        return Some(PlatformChange::Restored);
                    }
                    return None;
                }

                if standing {
                    c.stand_timer += 1.0;
                    if c.stand_timer >= CRUMBLE_TIME as f32 {
                        c.crumbled = true;
                        c.respawn_timer = 0;
                        return Some(PlatformChange::Crumbled);
                    }
                } else {
                    // Partial credit: decay at half the accrual rate.
                    c.stand_timer = (c.stand_timer - 0.5).max(0.0);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;

//! Axis-separated AABB resolution shared by the player and every grounded
//! monster.
//!
//! One tick of movement is always: fall, move x, resolve x, move y, resolve y.
//! Callers that need extra behaviour at a contact (bounce, climb, stop a
//! charge) get the index of the platform that was hit.

use bevy::math::Vec2;

use crate::sim::geom::Rect;
use crate::sim::platform::Platform;

pub const GRAVITY: f32 = 0.8;
pub const MAX_FALL_SPEED: f32 = 20.0;

/// Vertical step of the deep landing scan.
const SCAN_STEP: f32 = 20.0;
/// The scan gives up this far above the bottom of the playfield.
const SCAN_FLOOR_MARGIN: f32 = 50.0;
/// Monsters overlapping by more than this vertically are left stacked.
const MAX_VERTICAL_SEPARATION: f32 = 20.0;

/// Which side of a platform a vertical move ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Moving down onto the top edge.
    Floor(usize),
    /// Moving up into the underside.
    Ceiling(usize),
}

/// Position, size and velocity of a moving box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size, vel: Vec2::ZERO }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Integrate gravity into `vel.y`, clamped to the terminal fall speed.
    #[inline]
    pub fn fall(&mut self, gravity: f32) {
        self.vel.y = (self.vel.y + gravity).min(MAX_FALL_SPEED);
    }

    /// Move horizontally by `dx` and push back out of any platform entered.
    ///
    /// Returns the last platform hit. A zero `dx` never resolves.
    pub fn move_x(&mut self, dx: f32, platforms: &[Platform]) -> Option<usize> {
        self.pos.x += dx;
        let mut hit = None;
        for (i, p) in platforms.iter().enumerate() {
            let solid = p.solid_rect();
            if !self.rect().intersects(&solid) {
                continue;
            }
            if dx > 0.0 {
                self.pos.x = solid.left() - self.size.x;
                hit = Some(i);
            } else if dx < 0.0 {
                self.pos.x = solid.right();
                hit = Some(i);
            }
        }
        hit
    }

    /// Move vertically by `vel.y`, snapping onto tops or under bottoms.
    pub fn move_y(&mut self, platforms: &[Platform]) -> Option<Contact> {
        self.pos.y += self.vel.y;
        let mut contact = None;
        for (i, p) in platforms.iter().enumerate() {
            let solid = p.solid_rect();
            if !self.rect().intersects(&solid) {
                continue;
            }
            if self.vel.y > 0.0 {
                self.pos.y = solid.top() - self.size.y;
                self.vel.y = 0.0;
                contact = Some(Contact::Floor(i));
            } else if self.vel.y < 0.0 {
                self.pos.y = solid.bottom();
                self.vel.y = 0.0;
                contact = Some(Contact::Ceiling(i));
            }
        }
        contact
    }

    /// Correct an externally applied displacement along the single axis of
    /// least penetration, per overlapping platform.
    pub fn push_out(&mut self, platforms: &[Platform]) {
        for p in platforms {
            let solid = p.solid_rect();
            let r = self.rect();
            if !r.intersects(&solid) {
                continue;
            }
            let from_left = r.right() - solid.left();
            let from_right = solid.right() - r.left();
            let from_top = r.bottom() - solid.top();
            let from_bottom = solid.bottom() - r.top();
            let min = from_left.min(from_right).min(from_top).min(from_bottom);

            if min == from_left {
                self.pos.x = solid.left() - self.size.x;
            } else if min == from_right {
                self.pos.x = solid.right();
            } else if min == from_top {
                self.pos.y = solid.top() - self.size.y;
                self.vel.y = 0.0;
            } else {
                self.pos.y = solid.bottom();
                self.vel.y = 0.0;
            }
        }
    }
}

#[inline]
pub fn any_solid_hit(probe: &Rect, platforms: &[Platform]) -> bool {
    platforms.iter().any(|p| probe.intersects(&p.solid_rect()))
}

/// Two-tier ledge check for a box walking in `direction`.
///
/// First a short probe `distance` beyond the leading edge at foot level; if it
/// finds nothing, a column of the box's own width beyond the probe's near
/// edge is scanned downwards for any landing above the bottom of the playfield.
pub fn has_ground_ahead(
    rect: &Rect,
    direction: f32,
    distance: f32,
    platforms: &[Platform],
    field_height: f32,
) -> bool {
    let probe_x = if direction > 0.0 {
        rect.right() + distance
    } else {
        rect.left() - distance - 5.0
    };
    let probe = Rect::new(probe_x, rect.bottom() + 5.0, 5.0, 10.0);
    if any_solid_hit(&probe, platforms) {
        return true;
    }

    // The column starts at the probe's near edge so the platform underfoot
    // can never count as a landing.
    let column_x = if direction > 0.0 {
        probe_x
    } else {
        probe_x + 5.0 - rect.w
    };
    has_landing_below(column_x, rect.w, rect.bottom(), platforms, field_height)
}

/// Scan a vertical column starting at `start_y` in fixed steps for any solid
/// platform above the kill margin.
pub fn has_landing_below(
    x: f32,
    width: f32,
    start_y: f32,
    platforms: &[Platform],
    field_height: f32,
) -> bool {
    let limit = field_height - SCAN_FLOOR_MARGIN;
    let mut y = start_y;
    while y <= limit {
        if any_solid_hit(&Rect::new(x, y, width, SCAN_STEP), platforms) {
            return true;
        }
        y += SCAN_STEP;
    }
    false
}

/// Displacement that pushes `a` out of `b` by half the overlap along the axis
/// of least penetration. `b` should move by the negation.
///
/// `None` when the boxes do not overlap or are stacked too deep to separate.
pub fn separation(a: &Rect, b: &Rect) -> Option<Vec2> {
    if !a.intersects(b) {
        return None;
    }
    let left = a.right() - b.left();
    let right = b.right() - a.left();
    let top = a.bottom() - b.top();
    let bottom = b.bottom() - a.top();

    let h = if left < right { -left } else { right };
    let v = if top < bottom { -top } else { bottom };

    if h.abs() < v.abs() {
        Some(Vec2::new(h * 0.5, 0.0))
    } else if v.abs() < MAX_VERTICAL_SEPARATION {
        Some(Vec2::new(0.0, v * 0.5))
    } else {
        None
    }
}

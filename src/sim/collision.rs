//! Collision detection and response for axis-aligned boxes
//!
//! Every entity on the playfield is a rectangle anchored at its top-left
//! corner. Contacts report the normal pointing toward the first box so a ball
//! can reflect off whatever it touched.

use glam::Vec2;

/// Contact between two overlapping boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the second box toward the first
    pub normal: Vec2,
    /// Overlap along the normal
    pub penetration: f32,
}

impl Contact {
    /// The same contact seen from the other box
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Check overlap between box `a` and box `b`
///
/// The normal is taken along the axis of least penetration. Boxes that only
/// touch along an edge do not collide.
pub fn box_contact(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> Option<Contact> {
    let a_max = a_pos + a_size;
    let b_max = b_pos + b_size;

    let overlap_x = a_max.x.min(b_max.x) - a_pos.x.max(b_pos.x);
    let overlap_y = a_max.y.min(b_max.y) - a_pos.y.max(b_pos.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let delta = (a_pos + a_size * 0.5) - (b_pos + b_size * 0.5);
    if overlap_x < overlap_y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        Some(Contact {
            normal: Vec2::new(sign, 0.0),
            penetration: overlap_x,
        })
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        Some(Contact {
            normal: Vec2::new(0.0, sign),
            penetration: overlap_y,
        })
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

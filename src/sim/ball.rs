//! Ball behaviour: reflection and the turbo sub-state

use glam::Vec2;

use super::collision::reflect_velocity;
use super::entity::Body;
use crate::platform::{SoundHandle, VisualHandle};

/// Distinguishes the main ball from pucks spawned by bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallTag {
    Main,
    Puck,
}

/// Active turbo boost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turbo {
    /// Collisions since the boost started
    pub collisions: u32,
    /// Visual to restore when the boost ends
    pub original_visual: VisualHandle,
}

/// A ball-class entity (main ball or puck)
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub tag: BallTag,
    pub sound: SoundHandle,
    turbo: Option<Turbo>,
}

impl Ball {
    pub fn new(tag: BallTag, sound: SoundHandle) -> Self {
        Self {
            tag,
            sound,
            turbo: None,
        }
    }

    pub fn is_puck(&self) -> bool {
        self.tag == BallTag::Puck
    }

    pub fn is_turbo(&self) -> bool {
        self.turbo.is_some()
    }

    /// Collisions counted in the current boost (0 when not boosted)
    pub fn turbo_collisions(&self) -> u32 {
        self.turbo.map_or(0, |t| t.collisions)
    }

    /// Start a turbo boost
    ///
    /// Pucks and already-boosted balls are left alone. Returns true if the
    /// boost started.
    pub fn activate_turbo(&mut self, body: &mut Body, factor: f32, turbo_visual: VisualHandle) -> bool {
        if self.is_puck() || self.is_turbo() {
            return false;
        }
        body.vel *= factor;
        self.turbo = Some(Turbo {
            collisions: 0,
            original_visual: body.visual,
        });
        body.visual = turbo_visual;
        true
    }

    /// End the boost immediately, undoing the speed and visual change
    pub fn cancel_turbo(&mut self, body: &mut Body, factor: f32) -> bool {
        let Some(turbo) = self.turbo.take() else {
            return false;
        };
        body.vel /= factor;
        body.visual = turbo.original_visual;
        true
    }

    /// React to a collision: bounce, then count it against an active boost
    ///
    /// `normal` points from the surface toward the ball. Returns true if this
    /// collision ended the boost.
    pub fn on_collision_enter(
        &mut self,
        body: &mut Body,
        normal: Vec2,
        factor: f32,
        max_turbo_collisions: u32,
    ) -> bool {
        // Only bounce when moving into the surface
        if body.vel.dot(normal) < 0.0 {
            body.vel = reflect_velocity(body.vel, normal);
        }

        let Some(turbo) = self.turbo.as_mut() else {
            return false;
        };
        turbo.collisions += 1;
        if turbo.collisions <= max_turbo_collisions {
            return false;
        }
        self.cancel_turbo(body, factor)
    }
}

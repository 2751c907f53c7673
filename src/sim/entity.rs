//! Entities on the playfield
//!
//! An entity is a [`Body`] (the movable, collidable rectangle every object
//! shares) plus an [`EntityKind`] carrying the behaviour components that make
//! it a ball, paddle, brick and so on.

use glam::Vec2;

use super::ball::Ball;
use super::paddle::Paddle;
use super::strategy::CollisionStrategy;
use crate::platform::VisualHandle;

/// Registry-assigned identifier, never reused within a game
pub type EntityId = u32;

/// Position, size, velocity and look of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub visual: VisualHandle,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, visual: VisualHandle) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            visual,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size * 0.5;
    }

    /// Integrate velocity over one timestep
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// A brick and the effect it triggers when hit
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    /// Drawn once when the board is built
    pub strategy: CollisionStrategy,
}

/// What an entity is, with its behaviour state
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Wall,
    Brick(Brick),
    Ball(Ball),
    Paddle(Paddle),
    /// Falling pickup that grants a life when a paddle catches it
    Heart,
    /// Life indicator in the HUD (never collides)
    LifeIcon,
}

impl EntityKind {
    pub fn is_brick(&self) -> bool {
        matches!(self, EntityKind::Brick(_))
    }

    pub fn is_ball(&self) -> bool {
        matches!(self, EntityKind::Ball(_))
    }

    pub fn is_paddle(&self) -> bool {
        matches!(self, EntityKind::Paddle(_))
    }

    /// Whether this kind wants to collide with `other`
    fn accepts(&self, other: &EntityKind) -> bool {
        match self {
            EntityKind::Wall => other.is_ball(),
            EntityKind::Brick(_) => other.is_ball() || other.is_paddle(),
            EntityKind::Ball(_) => matches!(other, EntityKind::Wall) || other.is_brick() || other.is_paddle(),
            EntityKind::Paddle(_) => other.is_ball() || other.is_brick() || matches!(other, EntityKind::Heart),
            EntityKind::Heart => other.is_paddle(),
            EntityKind::LifeIcon => false,
        }
    }
}

/// A registered object on the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    /// Collision eligibility; both sides must agree
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.id != other.id && self.kind.accepts(&other.kind) && other.kind.accepts(&self.kind)
    }
}

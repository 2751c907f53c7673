//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Only the platform traits, never a concrete backend

pub mod ball;
pub mod collision;
pub mod context;
pub mod entity;
pub mod factory;
pub mod lives;
pub mod paddle;
pub mod phase;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod tick;

pub use ball::{Ball, BallTag};
pub use collision::{Contact, box_contact};
pub use context::{GameContext, Visuals};
pub use entity::{Body, Brick, Entity, EntityId, EntityKind};
pub use factory::{Roll, StrategyFactory};
pub use lives::{LifeColor, LifeCounter, Lives};
pub use paddle::{HitCounter, HorizontalMover, Paddle};
pub use phase::{GamePhase, Outcome, evaluate, resolve_replay_choice};
pub use registry::EntityRegistry;
pub use state::{GameEvent, GameState};
pub use strategy::{CollisionStrategy, DoubleStrategy, StrategyKind};
pub use tick::{TickInput, tick};

//! Brick collision strategies
//!
//! Every brick carries one strategy, drawn when the board is built. On the
//! brick's first collision the strategy removes the brick and applies its
//! effect against the shared game state. Strategies are plain values and never
//! change after construction.

use glam::Vec2;

use super::entity::EntityId;
use super::state::GameState;

/// Strategy buckets of the draw table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    Basic,
    Puck,
    ExtraPaddle,
    Turbo,
    ExtraLife,
    Double,
}

/// Effect applied when a brick is hit
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionStrategy {
    /// Just break the brick
    Basic,
    /// Drop a heart from `heart_pos`
    ExtraLife { heart_pos: Vec2 },
    /// Spawn the extra paddle if none is active
    ExtraPaddle,
    /// Release two pucks from `spawn_pos`
    Puck { spawn_pos: Vec2 },
    /// Boost the main ball that hit the brick
    Turbo,
    /// Apply several strategies in order
    Double(DoubleStrategy),
}

/// Two or three non-composite strategies applied in sequence
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleStrategy {
    children: Vec<CollisionStrategy>,
}

impl DoubleStrategy {
    pub(crate) fn new(children: Vec<CollisionStrategy>) -> Self {
        debug_assert!((2..=3).contains(&children.len()));
        debug_assert!(children.iter().all(|c| c.kind() != StrategyKind::Double));
        Self { children }
    }

    pub fn children(&self) -> &[CollisionStrategy] {
        &self.children
    }
}

impl CollisionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            CollisionStrategy::Basic => StrategyKind::Basic,
            CollisionStrategy::ExtraLife { .. } => StrategyKind::ExtraLife,
            CollisionStrategy::ExtraPaddle => StrategyKind::ExtraPaddle,
            CollisionStrategy::Puck { .. } => StrategyKind::Puck,
            CollisionStrategy::Turbo => StrategyKind::Turbo,
            CollisionStrategy::Double(_) => StrategyKind::Double,
        }
    }

    /// Nesting depth: 0 for a plain strategy, 1 for a composite of plain ones
    pub fn depth(&self) -> usize {
        match self {
            CollisionStrategy::Double(double) => {
                1 + double.children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Apply the effect of `brick` being hit by `other`
    pub fn on_collision(&self, state: &mut GameState, brick: EntityId, other: EntityId) {
        match self {
            CollisionStrategy::Basic => {
                state.remove_brick(brick);
            }
            CollisionStrategy::ExtraLife { heart_pos } => {
                state.remove_brick(brick);
                state.spawn_falling_heart(*heart_pos);
            }
            CollisionStrategy::ExtraPaddle => {
                state.remove_brick(brick);
                if state.registry.extra_paddle().is_none() {
                    state.spawn_extra_paddle();
                }
            }
            CollisionStrategy::Puck { spawn_pos } => {
                state.remove_brick(brick);
                for _ in 0..2 {
                    state.spawn_puck(*spawn_pos);
                }
            }
            CollisionStrategy::Turbo => {
                state.remove_brick(brick);
                state.activate_turbo(other);
            }
            CollisionStrategy::Double(double) => {
                for child in &double.children {
                    child.on_collision(state, brick, other);
                }
            }
        }
    }
}

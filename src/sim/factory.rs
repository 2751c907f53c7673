//! Random brick strategy selection
//!
//! A uniform roll in `[0, table_size)` is mapped through a fixed table:
//!
//! | roll | strategy    |
//! |------|-------------|
//! | 0-4  | Basic       |
//! | 5    | Puck        |
//! | 6    | ExtraPaddle |
//! | 7    | Turbo       |
//! | 8    | ExtraLife   |
//! | 9    | Double      |
//!
//! Rolling with the restricted size (9) can never yield Double. A composite
//! draws its two children from the full table, except that a Double first
//! child forces the second roll onto the restricted table. Whichever child came
//! up Double is then rerolled on the restricted table and a third child is
//! appended, so composites never nest more than one level.

use glam::Vec2;
use rand::Rng;

use super::strategy::{CollisionStrategy, DoubleStrategy, StrategyKind};
use crate::consts::STRATEGY_TABLE_SIZE;

/// Table size that excludes the Double bucket
pub const RESTRICTED_TABLE_SIZE: u32 = STRATEGY_TABLE_SIZE - 1;

/// Source of uniform rolls for strategy draws
pub trait Roll {
    /// Uniform integer in `[0, upper)`
    fn roll(&mut self, upper: u32) -> u32;
}

impl<R: Rng> Roll for R {
    fn roll(&mut self, upper: u32) -> u32 {
        self.random_range(0..upper)
    }
}

/// Builds brick strategies for one board layout
#[derive(Debug, Clone, Copy)]
pub struct StrategyFactory {
    brick_length: f32,
}

impl StrategyFactory {
    pub fn new(brick_length: f32) -> Self {
        Self { brick_length }
    }

    /// Map a table index to its strategy bucket
    pub fn kind_for(index: u32) -> StrategyKind {
        match index {
            0..=4 => StrategyKind::Basic,
            5 => StrategyKind::Puck,
            6 => StrategyKind::ExtraPaddle,
            7 => StrategyKind::Turbo,
            8 => StrategyKind::ExtraLife,
            _ => StrategyKind::Double,
        }
    }

    /// Draw a strategy for the brick whose top-left corner is `brick_pos`
    pub fn draw<R: Roll + ?Sized>(
        &self,
        rolls: &mut R,
        table_size: u32,
        brick_pos: Vec2,
    ) -> CollisionStrategy {
        let kind = Self::draw_kind(rolls, table_size);
        self.build(rolls, kind, brick_pos)
    }

    fn draw_kind<R: Roll + ?Sized>(rolls: &mut R, table_size: u32) -> StrategyKind {
        debug_assert!(table_size > 0 && table_size <= STRATEGY_TABLE_SIZE);
        Self::kind_for(rolls.roll(table_size))
    }

    fn build<R: Roll + ?Sized>(&self, rolls: &mut R, kind: StrategyKind, brick_pos: Vec2) -> CollisionStrategy {
        // Hearts and pucks appear above the middle of the brick
        let drop_pos = Vec2::new(brick_pos.x + 0.5 * self.brick_length, brick_pos.y);
        match kind {
            StrategyKind::Basic => CollisionStrategy::Basic,
            StrategyKind::Puck => CollisionStrategy::Puck { spawn_pos: drop_pos },
            StrategyKind::ExtraPaddle => CollisionStrategy::ExtraPaddle,
            StrategyKind::Turbo => CollisionStrategy::Turbo,
            StrategyKind::ExtraLife => CollisionStrategy::ExtraLife { heart_pos: drop_pos },
            StrategyKind::Double => CollisionStrategy::Double(self.compose_double(rolls, brick_pos)),
        }
    }

    fn compose_double<R: Roll + ?Sized>(&self, rolls: &mut R, brick_pos: Vec2) -> DoubleStrategy {
        let first = Self::draw_kind(rolls, STRATEGY_TABLE_SIZE);
        let second = if first == StrategyKind::Double {
            Self::draw_kind(rolls, RESTRICTED_TABLE_SIZE)
        } else {
            Self::draw_kind(rolls, STRATEGY_TABLE_SIZE)
        };

        let mut kinds = vec![first, second];
        if let Some(slot) = kinds.iter().position(|k| *k == StrategyKind::Double) {
            kinds[slot] = Self::draw_kind(rolls, RESTRICTED_TABLE_SIZE);
            kinds.push(Self::draw_kind(rolls, RESTRICTED_TABLE_SIZE));
        }

        let children = kinds
            .into_iter()
            .map(|kind| self.build(rolls, kind, brick_pos))
            .collect();
        DoubleStrategy::new(children)
    }
}

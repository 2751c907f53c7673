//! Bricker - rule engine of a breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, brick strategies, game state)
//! - `platform`: Asset/input/window abstraction plus a headless host
//! - `config`: Board dimensions from the command line
//! - `tuning`: Data-driven game balance

pub mod config;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, GameConfig};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 700.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;
    pub const WALL_WIDTH: f32 = 10.0;

    /// Board defaults
    pub const DEFAULT_BRICK_ROWS: u32 = 7;
    pub const DEFAULT_BRICKS_PER_ROW: u32 = 8;
    pub const BRICK_HEIGHT: f32 = 15.0;
    /// Gap between neighbouring bricks and between bricks and walls
    pub const BRICK_GAP: f32 = 1.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis launch speed of the main ball
    pub const BALL_SPEED: f32 = 100.0;
    pub const PUCK_SIZE: f32 = 15.0;
    pub const PUCK_SPEED: f32 = 100.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the playfield bottom to the main paddle's top edge
    pub const PADDLE_FLOOR_OFFSET: f32 = 30.0;
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Power-up defaults
    pub const HEART_SIZE: f32 = 20.0;
    pub const HEART_FALL_SPEED: f32 = 20.0;
    pub const TURBO_FACTOR: f32 = 1.4;
    pub const TURBO_MAX_COLLISIONS: u32 = 6;
    pub const EXTRA_PADDLE_MAX_HITS: u32 = 4;

    /// Lives
    pub const INITIAL_LIVES: u8 = 3;
    pub const HEART_CAP: u8 = 4;
    pub const LIFE_COUNTER_SIZE: f32 = 20.0;

    /// Number of buckets in the brick strategy table
    pub const STRATEGY_TABLE_SIZE: u32 = 10;
}

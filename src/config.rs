//! Startup configuration
//!
//! Board dimensions come from two optional positional arguments. Fewer than
//! two selects the default board; a bad value is fatal.

use std::path::PathBuf;

use thiserror::Error;

use crate::consts::*;

/// Errors that abort startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a whole number, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("{bricks_per_row} bricks do not fit in one row of a {width}-unit playfield")]
    BoardTooWide { bricks_per_row: u32, width: f32 },

    #[error("cannot read tuning file {path}: {source}")]
    TuningFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    TuningJson(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Board layout chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub brick_rows: u32,
    pub bricks_per_row: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            brick_rows: DEFAULT_BRICK_ROWS,
            bricks_per_row: DEFAULT_BRICKS_PER_ROW,
        }
    }
}

impl GameConfig {
    /// Build a config from the raw positional arguments
    ///
    /// Both counts are needed; with fewer the default board is used.
    pub fn from_args(rows: Option<&str>, bricks_per_row: Option<&str>) -> Result<Self, ConfigError> {
        match (rows, bricks_per_row) {
            (Some(rows), Some(per_row)) => Self::new(
                parse_count("brick rows", rows)?,
                parse_count("bricks per row", per_row)?,
            ),
            (None, None) => Ok(Self::default()),
            _ => {
                log::warn!("Board needs both rows and bricks per row, using the default board");
                Ok(Self::default())
            }
        }
    }

    /// Validate explicit dimensions against the fixed playfield
    pub fn new(brick_rows: u32, bricks_per_row: u32) -> Result<Self, ConfigError> {
        if brick_rows == 0 {
            return Err(ConfigError::Zero("brick rows"));
        }
        if bricks_per_row == 0 {
            return Err(ConfigError::Zero("bricks per row"));
        }
        let config = Self {
            brick_rows,
            bricks_per_row,
        };
        if config.brick_length(PLAYFIELD_WIDTH) < 1.0 {
            return Err(ConfigError::BoardTooWide {
                bricks_per_row,
                width: PLAYFIELD_WIDTH,
            });
        }
        Ok(config)
    }

    /// Total bricks on a fresh board
    pub fn brick_count(&self) -> u32 {
        self.brick_rows * self.bricks_per_row
    }

    /// Whole-unit brick length so a row fits between the side walls with
    /// one-unit gaps
    pub fn brick_length(&self, playfield_width: f32) -> f32 {
        let per_row = self.bricks_per_row as f32;
        ((playfield_width - 2.0 * WALL_WIDTH - (per_row + 1.0) * BRICK_GAP) / per_row).floor()
    }
}

fn parse_count(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        name,
        value: value.to_string(),
    })
}

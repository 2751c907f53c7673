//! Data-driven game balance
//!
//! Every field defaults to the constant in [`crate::consts`]; a JSON file can
//! override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::*;

/// Gameplay speeds, factors and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Main ball speed per axis (units/s)
    pub ball_speed: f32,
    /// Puck speed magnitude (units/s)
    pub puck_speed: f32,
    /// Paddle horizontal speed (units/s)
    pub paddle_speed: f32,
    /// Falling heart speed (units/s)
    pub heart_fall_speed: f32,
    /// Velocity multiplier applied while a ball is in turbo
    pub turbo_factor: f32,
    /// Collisions a turbo ball survives before reverting
    pub turbo_max_collisions: u32,
    /// Ball hits the extra paddle absorbs before it disappears
    pub extra_paddle_max_hits: u32,
    /// Lives at the start of a game
    pub initial_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,
            puck_speed: PUCK_SPEED,
            paddle_speed: PADDLE_SPEED,
            heart_fall_speed: HEART_FALL_SPEED,
            turbo_factor: TURBO_FACTOR,
            turbo_max_collisions: TURBO_MAX_COLLISIONS,
            extra_paddle_max_hits: EXTRA_PADDLE_MAX_HITS,
            initial_lives: INITIAL_LIVES,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(e) = tuning.validate() {
            log::warn!("Rejected tuning overrides: {e}");
            return Err(e);
        }
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::TuningFile {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the rule engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            ("ball_speed", self.ball_speed),
            ("puck_speed", self.puck_speed),
            ("paddle_speed", self.paddle_speed),
            ("heart_fall_speed", self.heart_fall_speed),
            ("turbo_factor", self.turbo_factor),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.extra_paddle_max_hits == 0 {
            return Err(ConfigError::InvalidTuning(
                "extra_paddle_max_hits must be at least 1".to_string(),
            ));
        }
        if self.initial_lives == 0 || self.initial_lives > HEART_CAP {
            return Err(ConfigError::InvalidTuning(format!(
                "initial_lives must be within 1..={HEART_CAP}, got {}",
                self.initial_lives
            )));
        }
        Ok(())
    }
}

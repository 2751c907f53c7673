//! Values every part of the simulation reads but never changes
//!
//! Built once at startup and handed to the game state; replaces any
//! process-wide globals for window size, tuning or asset handles.

use glam::Vec2;

use crate::platform::{AssetSource, SoundHandle, VisualHandle};
use crate::tuning::Tuning;

pub const BALL_VISUAL_PATH: &str = "assets/ball.png";
pub const PUCK_VISUAL_PATH: &str = "assets/mockBall.png";
pub const TURBO_VISUAL_PATH: &str = "assets/redball.png";
pub const PADDLE_VISUAL_PATH: &str = "assets/paddle.png";
pub const BRICK_VISUAL_PATH: &str = "assets/brick.png";
pub const HEART_VISUAL_PATH: &str = "assets/heart.png";
pub const COLLISION_SOUND_PATH: &str = "assets/blop.wav";

/// Handles for everything the rule engine spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visuals {
    pub ball: VisualHandle,
    pub puck: VisualHandle,
    pub turbo_ball: VisualHandle,
    pub paddle: VisualHandle,
    pub brick: VisualHandle,
    pub heart: VisualHandle,
    pub collision_sound: SoundHandle,
}

impl Visuals {
    pub fn load<A: AssetSource + ?Sized>(assets: &mut A) -> Self {
        Self {
            ball: assets.load_visual(BALL_VISUAL_PATH),
            puck: assets.load_visual(PUCK_VISUAL_PATH),
            turbo_ball: assets.load_visual(TURBO_VISUAL_PATH),
            paddle: assets.load_visual(PADDLE_VISUAL_PATH),
            brick: assets.load_visual(BRICK_VISUAL_PATH),
            heart: assets.load_visual(HEART_VISUAL_PATH),
            collision_sound: assets.load_sound(COLLISION_SOUND_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameContext {
    pub playfield: Vec2,
    pub tuning: Tuning,
    pub visuals: Visuals,
}

impl GameContext {
    pub fn new<A: AssetSource + ?Sized>(playfield: Vec2, tuning: Tuning, assets: &mut A) -> Self {
        Self {
            playfield,
            tuning,
            visuals: Visuals::load(assets),
        }
    }
}

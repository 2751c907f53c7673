//! Paddle behaviour components
//!
//! A paddle is a bounded horizontal mover; the extra paddle also carries a
//! hit counter that retires it after a fixed number of ball hits.

use super::entity::Body;
use crate::consts::PADDLE_WIDTH;
use crate::platform::{InputSource, Key};

/// Keyboard-driven horizontal movement clamped to the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalMover {
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl HorizontalMover {
    /// Mover for a paddle of the standard width on a playfield of `width`
    pub fn for_playfield(width: f32, speed: f32) -> Self {
        Self {
            speed,
            min_x: 0.0,
            max_x: width - PADDLE_WIDTH,
        }
    }

    /// Set horizontal velocity from the keys held this frame
    pub fn steer<I: InputSource + ?Sized>(&self, body: &mut Body, input: &I) {
        let mut dir = 0.0;
        if input.is_key_down(Key::Left) {
            dir -= 1.0;
        }
        if input.is_key_down(Key::Right) {
            dir += 1.0;
        }
        body.vel.x = dir * self.speed;
        body.vel.y = 0.0;
    }

    /// Keep the paddle inside its bounds
    pub fn clamp(&self, body: &mut Body) {
        body.pos.x = body.pos.x.clamp(self.min_x, self.max_x);
    }
}

/// Counts ball hits up to a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCounter {
    hits: u32,
    limit: u32,
}

impl HitCounter {
    pub fn new(limit: u32) -> Self {
        Self { hits: 0, limit }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Record one hit; true once the limit is reached
    pub fn record(&mut self) -> bool {
        if self.hits < self.limit {
            self.hits += 1;
        }
        self.hits >= self.limit
    }
}

/// A player-controlled paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub mover: HorizontalMover,
    /// Present only on the extra paddle
    pub hit_limit: Option<HitCounter>,
}

impl Paddle {
    pub fn main(playfield_width: f32, speed: f32) -> Self {
        Self {
            mover: HorizontalMover::for_playfield(playfield_width, speed),
            hit_limit: None,
        }
    }

    pub fn extra(playfield_width: f32, speed: f32, max_hits: u32) -> Self {
        Self {
            mover: HorizontalMover::for_playfield(playfield_width, speed),
            hit_limit: Some(HitCounter::new(max_hits)),
        }
    }

    pub fn is_extra(&self) -> bool {
        self.hit_limit.is_some()
    }

    /// Ball hits recorded so far (always 0 for the main paddle)
    pub fn ball_hits(&self) -> u32 {
        self.hit_limit.map_or(0, |c| c.hits())
    }

    /// Record a ball hit; true if the paddle is now used up
    pub fn on_ball_hit(&mut self) -> bool {
        self.hit_limit.as_mut().is_some_and(|c| c.record())
    }
}

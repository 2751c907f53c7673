//! Platform abstraction layer
//!
//! The rule engine never touches disk, keyboard, window or audio directly.
//! Hosts provide:
//! - Asset handles (visuals and sounds are opaque to the core)
//! - Per-frame key state
//! - The window shell (playfield size, yes/no prompt, reset/close)

pub mod headless;

use glam::Vec2;

pub use headless::{Autopilot, HandleTable, TerminalShell};

/// Opaque handle to something the renderer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualHandle(pub u32);

/// Opaque handle to a sound the host can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoundHandle(pub u32);

/// Keys the paddles react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

/// Loads visuals and sounds by path
pub trait AssetSource {
    fn load_visual(&mut self, path: &str) -> VisualHandle;
    fn load_sound(&mut self, path: &str) -> SoundHandle;
}

/// Keyboard state, polled once per frame
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// The window hosting the playfield
pub trait WindowShell {
    /// Fixed playfield dimensions
    fn dimensions(&self) -> Vec2;
    /// Blocking modal yes/no question
    fn prompt_yes_no(&mut self, message: &str) -> bool;
    /// Notify the host that the game restarted from scratch
    fn reset_game(&mut self);
    /// Close the window; the process ends after this
    fn close_window(&mut self);
}

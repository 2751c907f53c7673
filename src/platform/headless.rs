//! Headless host: no window, no renderer, no audio device
//!
//! Used by the binary and by tests. Assets resolve to interned handles, the
//! replay prompt goes to the terminal and the paddles are driven by a simple
//! autopilot.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use glam::Vec2;

use super::{AssetSource, SoundHandle, VisualHandle, WindowShell};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::{EntityKind, GameState, TickInput};

/// Hands out one stable handle per distinct asset path
#[derive(Debug, Clone, Default)]
pub struct HandleTable {
    handles: HashMap<String, u32>,
}

impl HandleTable {
    fn intern(&mut self, path: &str) -> u32 {
        let next = self.handles.len() as u32;
        *self.handles.entry(path.to_string()).or_insert_with(|| {
            log::debug!("Asset {path} -> handle {next}");
            next
        })
    }

    /// Number of distinct paths loaded so far
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl AssetSource for HandleTable {
    fn load_visual(&mut self, path: &str) -> VisualHandle {
        VisualHandle(self.intern(path))
    }

    fn load_sound(&mut self, path: &str) -> SoundHandle {
        SoundHandle(self.intern(path))
    }
}

/// Window shell that asks its yes/no questions on a text stream
///
/// End of input or a read error counts as "no".
pub struct TerminalShell<R = io::StdinLock<'static>, W = io::Stdout> {
    reader: R,
    writer: W,
    dimensions: Vec2,
    resets: u32,
    closed: bool,
}

impl TerminalShell {
    /// Shell on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalShell<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            dimensions: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            resets: 0,
            closed: false,
        }
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ask(&mut self, message: &str) -> io::Result<bool> {
        write!(self.writer, "{message} [y/N] ")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            log::info!("No answer on input, treating as no");
            return Ok(false);
        }
        let answer = line.trim().to_ascii_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> WindowShell for TerminalShell<R, W> {
    fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    fn prompt_yes_no(&mut self, message: &str) -> bool {
        match self.ask(message) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Prompt failed: {e}");
                false
            }
        }
    }

    fn reset_game(&mut self) {
        self.resets += 1;
        log::info!("Game reset ({} so far)", self.resets);
    }

    fn close_window(&mut self) {
        self.closed = true;
        log::info!("Window closed");
    }
}

/// Computer player for the headless host
///
/// Chases the lowest ball that is falling; with nothing falling it goes for
/// the lowest heart, then idles under the main ball.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Horizontal distance at which the paddle stops moving
    pub deadzone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { deadzone: 8.0 }
    }
}

impl Autopilot {
    pub fn steer(&self, state: &GameState) -> TickInput {
        let Some(paddle) = state.registry.get(state.main_paddle) else {
            return TickInput::default();
        };
        let Some(target_x) = Self::target_x(state) else {
            return TickInput::default();
        };

        let offset = target_x - paddle.body.center().x;
        TickInput {
            left: offset < -self.deadzone,
            right: offset > self.deadzone,
        }
    }

    fn target_x(state: &GameState) -> Option<f32> {
        let lowest = |a: &Vec2, b: &Vec2| a.y.total_cmp(&b.y);

        let falling_ball = state
            .registry
            .iter()
            .filter(|e| e.kind.is_ball() && e.body.vel.y > 0.0)
            .map(|e| e.body.center())
            .max_by(lowest);
        let heart = || {
            state
                .registry
                .iter()
                .filter(|e| e.kind == EntityKind::Heart)
                .map(|e| e.body.center())
                .max_by(lowest)
        };
        let main_ball = || state.registry.get(state.main_ball).map(|e| e.body.center());

        falling_ball.or_else(heart).or_else(main_ball).map(|p| p.x)
    }
}

//! Game phase transitions
//!
//! Evaluated once per tick after physics and collisions. A cleared board wins
//! even if the ball fell out in the same tick: the win check runs first.

use super::state::{GameEvent, GameState};
use crate::platform::WindowShell;

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Question put to the player
    pub fn prompt(&self) -> &'static str {
        match self {
            Outcome::Won => "You win! Play again?",
            Outcome::Lost => "You lose! Play again?",
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game over, waiting for the player to replay or quit
    AwaitingReplayChoice(Outcome),
    /// Player chose to quit
    Terminated,
}

/// Apply end-of-tick transitions
pub fn evaluate(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.bricks_remaining == 0 {
        log::info!("All bricks cleared");
        state.phase = GamePhase::AwaitingReplayChoice(Outcome::Won);
        state.events.push(GameEvent::GameWon);
    } else if state.main_ball_fell_out() {
        if state.lives.left() > 1 {
            state.lose_life();
        } else {
            log::info!("Last life lost");
            state.phase = GamePhase::AwaitingReplayChoice(Outcome::Lost);
            state.events.push(GameEvent::GameLost);
        }
    }
}

/// Ask the player whether to play again and act on the answer
///
/// Blocks on the shell's prompt. Does nothing unless a game just ended.
pub fn resolve_replay_choice<S: WindowShell + ?Sized>(state: &mut GameState, shell: &mut S) {
    let GamePhase::AwaitingReplayChoice(outcome) = state.phase else {
        return;
    };

    if shell.prompt_yes_no(outcome.prompt()) {
        state.restart();
        shell.reset_game();
    } else {
        log::info!("Player quit after {outcome:?}");
        state.phase = GamePhase::Terminated;
        shell.close_window();
    }
}

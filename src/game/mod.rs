//! Core game logic: the two-player `Game` trait and the rule engines that
//! implement it (checkers, tic-tac-toe).

pub mod checkers;
pub mod tic_tac_toe;

pub use checkers::CheckersBoard;
pub use tic_tac_toe::TicTacToeBoard;

use std::fmt;
use std::hash::Hash;

/// One of the two players. `First` is the side that opens a standard game:
/// Black in checkers, X in tic-tac-toe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Terminal result of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

/// A two-player, alternating-turn board game driven by successor-state
/// enumeration. Boards are immutable values: `successors` hands out freshly
/// owned boards and never touches `self`.
pub trait Game: Clone + Eq + Hash + fmt::Display {
    /// Display name of the game ("Checkers", "Tic-Tac-Toe").
    const NAME: &'static str;

    /// The starting board.
    fn initial() -> Self;

    /// Every board reachable by `side` in one ply, in deterministic order.
    /// An empty result is not an error: it is the blocked-mover signal
    /// resolved through [`Game::blocked_outcome`].
    fn successors(&self, side: Side) -> Vec<Self>;

    /// Full-board terminal scan, independent of successor generation.
    /// Callers run this after every ply; `None` means the game is ongoing.
    fn goal_test(&self) -> Option<GameOutcome>;

    /// Outcome when `side` is to move but has no successors. A blocked
    /// checkers player forfeits; a blocked tic-tac-toe player draws.
    fn blocked_outcome(side: Side) -> GameOutcome;

    /// Display name for a side ("Black"/"White", "X"/"O").
    fn side_name(side: Side) -> &'static str;
}

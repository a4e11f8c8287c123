use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Game, GameOutcome, Side};

pub const SIZE: usize = 3;

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
    Empty,
}

impl Mark {
    fn for_side(side: Side) -> Mark {
        match side {
            Side::First => Mark::X,
            Side::Second => Mark::O,
        }
    }

    fn ordinal(self) -> i32 {
        match self {
            Mark::X => 0,
            Mark::O => 1,
            Mark::Empty => 2,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Mark::X => "[ X ]",
            Mark::O => "[ O ]",
            Mark::Empty => "[ - ]",
        }
    }
}

/// A 3×3 marking-game position. Same successor-driven interface as checkers,
/// without capture chains: a ply places one mark on an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    cells: [[Mark; SIZE]; SIZE],
}

impl TicTacToeBoard {
    /// Board with no marks; populate with [`TicTacToeBoard::place`].
    pub fn empty() -> Self {
        TicTacToeBoard {
            cells: [[Mark::Empty; SIZE]; SIZE],
        }
    }

    /// This board with `mark` written at (row, col).
    pub fn place(mut self, row: usize, col: usize, mark: Mark) -> Self {
        self.cells[row][col] = mark;
        self
    }

    pub fn get(&self, row: usize, col: usize) -> Mark {
        self.cells[row][col]
    }

    fn line_win(&self, mark: Mark) -> bool {
        for i in 0..SIZE {
            if (0..SIZE).all(|j| self.cells[i][j] == mark)
                || (0..SIZE).all(|j| self.cells[j][i] == mark)
            {
                return true;
            }
        }
        (0..SIZE).all(|i| self.cells[i][i] == mark)
            || (0..SIZE).all(|i| self.cells[i][SIZE - 1 - i] == mark)
    }
}

impl Game for TicTacToeBoard {
    const NAME: &'static str = "Tic-Tac-Toe";

    fn initial() -> Self {
        Self::empty()
    }

    fn successors(&self, side: Side) -> Vec<Self> {
        let mark = Mark::for_side(side);
        let mut successors = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == Mark::Empty {
                    successors.push(self.place(row, col, mark));
                }
            }
        }
        successors
    }

    fn goal_test(&self) -> Option<GameOutcome> {
        if self.line_win(Mark::X) {
            Some(GameOutcome::Winner(Side::First))
        } else if self.line_win(Mark::O) {
            Some(GameOutcome::Winner(Side::Second))
        } else {
            None
        }
    }

    /// A full board with no winner is the cat's game.
    fn blocked_outcome(_side: Side) -> GameOutcome {
        GameOutcome::Draw
    }

    fn side_name(side: Side) -> &'static str {
        match side {
            Side::First => "X",
            Side::Second => "O",
        }
    }
}

/// Nine squares at two bits each pack the whole board into the low 18 bits,
/// so distinct positions always hash distinctly.
impl Hash for TicTacToeBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut h: i32 = 0;
        for (idx, cell) in self.cells.iter().flatten().enumerate() {
            h |= cell.ordinal() << (2 * idx);
        }
        state.write_i32(h);
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

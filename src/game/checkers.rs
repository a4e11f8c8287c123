use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Game, GameOutcome, Side};

pub const SIZE: usize = 8;

// Hash accumulation primes, see `Hash for CheckersBoard`.
const HASH_SEED: i32 = 486_187_739;
const HASH_STEP: i32 = 715_225_739;

/// Contents of one square. Black men start on rows 0..3 and advance down the
/// board; White men start on rows 5..8 and advance up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Black,
    BlackKing,
    White,
    WhiteKing,
}

impl Cell {
    fn belongs_to(self, side: Side) -> bool {
        match side {
            Side::First => matches!(self, Cell::Black | Cell::BlackKing),
            Side::Second => matches!(self, Cell::White | Cell::WhiteKing),
        }
    }

    fn is_king(self) -> bool {
        matches!(self, Cell::BlackKing | Cell::WhiteKing)
    }

    /// Stable ordinal fed into the board hash.
    fn ordinal(self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::BlackKing => 2,
            Cell::White => 3,
            Cell::WhiteKing => 4,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Cell::Empty => "[ - ]",
            Cell::Black => "[ b ]",
            Cell::BlackKing => "[ B ]",
            Cell::White => "[ w ]",
            Cell::WhiteKing => "[ W ]",
        }
    }
}

/// An 8×8 checkers position. Immutable once produced: successor generation
/// works on freshly copied cell grids, never on shared storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersBoard {
    cells: [[Cell; SIZE]; SIZE],
}

impl CheckersBoard {
    /// Board with no pieces; populate with [`CheckersBoard::place`].
    pub fn empty() -> Self {
        CheckersBoard {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// This board with `cell` written at (row, col).
    pub fn place(mut self, row: usize, col: usize, cell: Cell) -> Self {
        self.cells[row][col] = cell;
        self
    }

    /// Get the cell at a specific position. Row 0 is the Black back rank.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Total pieces of both sides on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c != Cell::Empty)
            .count()
    }

    /// Row direction `side`'s men advance in.
    fn advance(side: Side) -> isize {
        match side {
            Side::First => 1,
            Side::Second => -1,
        }
    }

    /// Diagonal step directions available to a piece: forward-left,
    /// forward-right, and for kings the two backward diagonals.
    fn directions(side: Side, king: bool) -> Vec<(isize, isize)> {
        let fwd = Self::advance(side);
        let mut dirs = vec![(fwd, -1), (fwd, 1)];
        if king {
            dirs.push((-fwd, -1));
            dirs.push((-fwd, 1));
        }
        dirs
    }

    fn offset(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row as isize + dr;
        let c = col as isize + dc;
        if (0..SIZE as isize).contains(&r) && (0..SIZE as isize).contains(&c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    /// Copy the grid, move the piece, clear the jumped square if any, and
    /// crown a man that reached its farthest row. Returns the new board.
    fn apply(&self, from: (usize, usize), to: (usize, usize), is_jump: bool) -> CheckersBoard {
        let mut cells = self.cells;
        let piece = cells[from.0][from.1];
        cells[from.0][from.1] = Cell::Empty;
        cells[to.0][to.1] = piece;

        if is_jump {
            cells[(from.0 + to.0) / 2][(from.1 + to.1) / 2] = Cell::Empty;
        }

        match cells[to.0][to.1] {
            Cell::Black if to.0 == SIZE - 1 => cells[to.0][to.1] = Cell::BlackKing,
            Cell::White if to.0 == 0 => cells[to.0][to.1] = Cell::WhiteKing,
            _ => {}
        }

        CheckersBoard { cells }
    }

    /// Landing square of a jump from (row, col) in direction (dr, dc), if the
    /// adjacent square holds an enemy piece and the square beyond it is empty
    /// and in bounds.
    fn jump_target(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        side: Side,
    ) -> Option<(usize, usize)> {
        let mid = Self::offset(row, col, dr, dc)?;
        let to = Self::offset(row, col, 2 * dr, 2 * dc)?;
        if self.cells[mid.0][mid.1].belongs_to(side.other()) && self.cells[to.0][to.1] == Cell::Empty
        {
            Some(to)
        } else {
            None
        }
    }

    /// Single-step diagonal moves for the piece at (row, col).
    fn collect_moves(&self, row: usize, col: usize, side: Side, out: &mut Vec<CheckersBoard>) {
        let piece = self.cells[row][col];
        for (dr, dc) in Self::directions(side, piece.is_king()) {
            if let Some(to) = Self::offset(row, col, dr, dc) {
                if self.cells[to.0][to.1] == Cell::Empty {
                    out.push(self.apply((row, col), to, false));
                }
            }
        }
    }

    /// Depth-first capture-chain search from (row, col). Each completed chain
    /// pushes its terminal board onto `out`. Returns whether at least one
    /// jump was available from this square.
    ///
    /// House rule: a jump that crowns the piece ends the chain immediately,
    /// even when the new king would have another jump available.
    fn chain_jumps(&self, row: usize, col: usize, side: Side, out: &mut Vec<CheckersBoard>) -> bool {
        let piece = self.cells[row][col];
        let mut jumped = false;

        for (dr, dc) in Self::directions(side, piece.is_king()) {
            if let Some(to) = self.jump_target(row, col, dr, dc, side) {
                jumped = true;
                let next = self.apply((row, col), to, true);
                let crowned = !piece.is_king() && next.cells[to.0][to.1].is_king();
                if crowned || !next.chain_jumps(to.0, to.1, side, out) {
                    out.push(next);
                }
            }
        }

        jumped
    }
}

impl Game for CheckersBoard {
    const NAME: &'static str = "Checkers";

    fn initial() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        for row in 0..3 {
            for col in 0..SIZE {
                if (row + col) % 2 == 1 {
                    cells[row][col] = Cell::Black;
                }
            }
        }
        for row in 5..SIZE {
            for col in 0..SIZE {
                if (row + col) % 2 == 1 {
                    cells[row][col] = Cell::White;
                }
            }
        }
        CheckersBoard { cells }
    }

    fn successors(&self, side: Side) -> Vec<Self> {
        let mut simple = Vec::new();
        let mut captures = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col].belongs_to(side) {
                    self.chain_jumps(row, col, side, &mut captures);
                    self.collect_moves(row, col, side, &mut simple);
                }
            }
        }

        // A side with any capture available must take one.
        if captures.is_empty() {
            simple
        } else {
            captures
        }
    }

    fn goal_test(&self) -> Option<GameOutcome> {
        let mut blacks_remain = false;
        let mut whites_remain = false;

        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Black | Cell::BlackKing => blacks_remain = true,
                    Cell::White | Cell::WhiteKing => whites_remain = true,
                    Cell::Empty => {}
                }
                if blacks_remain && whites_remain {
                    return None;
                }
            }
        }

        if !whites_remain {
            Some(GameOutcome::Winner(Side::First))
        } else {
            Some(GameOutcome::Winner(Side::Second))
        }
    }

    /// A blocked side forfeits.
    fn blocked_outcome(side: Side) -> GameOutcome {
        GameOutcome::Winner(side.other())
    }

    fn side_name(side: Side) -> &'static str {
        match side {
            Side::First => "Black",
            Side::Second => "White",
        }
    }
}

/// Hash depends only on final cell contents: a seeded polynomial accumulation
/// over the grid in row-major order, with wrapping arithmetic. Collisions are
/// possible; map lookups fall back to cell-wise equality.
impl Hash for CheckersBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut h = HASH_SEED;
        for row in &self.cells {
            for cell in row {
                h = h.wrapping_mul(HASH_STEP).wrapping_add(cell.ordinal());
            }
        }
        state.write_i32(h);
    }
}

impl fmt::Display for CheckersBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts = [0usize; 4];
        writeln!(f, "              (Black Side)")?;
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Black => counts[0] += 1,
                    Cell::BlackKing => counts[1] += 1,
                    Cell::White => counts[2] += 1,
                    Cell::WhiteKing => counts[3] += 1,
                    Cell::Empty => {}
                }
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "              (White Side)")?;
        writeln!(f)?;
        writeln!(
            f,
            "W: {}\tWK: {}\tB: {}\tBK: {}",
            counts[2], counts[3], counts[0], counts[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(board: &CheckersBoard) -> u64 {
        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_initial_setup() {
        let board = CheckersBoard::initial();
        assert_eq!(board.piece_count(), 24);
        assert_eq!(board.get(0, 1), Cell::Black);
        assert_eq!(board.get(2, 7), Cell::Black);
        assert_eq!(board.get(5, 0), Cell::White);
        assert_eq!(board.get(7, 6), Cell::White);
        assert_eq!(board.get(3, 3), Cell::Empty);
        assert_eq!(board.get(4, 4), Cell::Empty);
    }

    #[test]
    fn test_opening_moves_for_black() {
        let board = CheckersBoard::initial();
        let successors = board.successors(Side::First);

        // Row 2 men at cols 1, 3, 5, 7: two diagonals each except the edge
        // piece at col 7.
        assert_eq!(successors.len(), 7);
        for s in &successors {
            assert_eq!(s.piece_count(), 24, "opening moves must not capture");
        }
    }

    #[test]
    fn test_opening_moves_for_white() {
        let board = CheckersBoard::initial();
        assert_eq!(board.successors(Side::Second).len(), 7);
    }

    #[test]
    fn test_opening_successors_differ_by_one_piece_step() {
        let board = CheckersBoard::initial();
        for s in board.successors(Side::First) {
            let mut changed = 0;
            for row in 0..SIZE {
                for col in 0..SIZE {
                    if s.get(row, col) != board.get(row, col) {
                        changed += 1;
                    }
                }
            }
            // One square vacated, one occupied.
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_single_forced_capture_excludes_simple_moves() {
        // Black man at (2,2) must jump the white man at (3,3); the black man
        // at (0,0) has simple moves that are therefore illegal this turn.
        let board = CheckersBoard::empty()
            .place(0, 0, Cell::Black)
            .place(2, 2, Cell::Black)
            .place(3, 3, Cell::White);

        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 1);

        let after = &successors[0];
        assert_eq!(after.piece_count(), 2);
        assert_eq!(after.get(3, 3), Cell::Empty);
        assert_eq!(after.get(4, 4), Cell::Black);
        // The bystander piece did not move.
        assert_eq!(after.get(0, 0), Cell::Black);
    }

    #[test]
    fn test_double_jump_yields_only_the_chain_terminal() {
        let board = CheckersBoard::empty()
            .place(2, 2, Cell::Black)
            .place(3, 3, Cell::White)
            .place(5, 5, Cell::White);

        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 1);

        let after = &successors[0];
        assert_eq!(after.get(6, 6), Cell::Black);
        assert_eq!(after.get(3, 3), Cell::Empty);
        assert_eq!(after.get(5, 5), Cell::Empty);
        assert_eq!(after.piece_count(), 1);
    }

    #[test]
    fn test_branching_chain_yields_one_board_per_branch() {
        // After jumping (3,3), the man on (4,4) can continue over (5,3) or
        // (5,5).
        let board = CheckersBoard::empty()
            .place(2, 2, Cell::Black)
            .place(3, 3, Cell::White)
            .place(5, 3, Cell::White)
            .place(5, 5, Cell::White);

        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 2);
        for s in &successors {
            assert_eq!(s.piece_count(), 2, "each branch captures two of the three whites");
            assert_eq!(s.get(3, 3), Cell::Empty);
        }
    }

    #[test]
    fn test_crowning_ends_the_chain() {
        // The jump from (5,2) over (6,3) lands on the back rank and crowns;
        // the white man at (6,5) would be jumpable by the new king, but the
        // chain stops at the crowning.
        let board = CheckersBoard::empty()
            .place(5, 2, Cell::Black)
            .place(6, 3, Cell::White)
            .place(6, 5, Cell::White);

        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 1);

        let after = &successors[0];
        assert_eq!(after.get(7, 4), Cell::BlackKing);
        assert_eq!(after.get(6, 5), Cell::White, "second capture must not happen");
        assert_eq!(after.piece_count(), 2);
    }

    #[test]
    fn test_king_continues_chain_through_existing_crown() {
        // Already a king: the same geometry as above chains both jumps.
        let board = CheckersBoard::empty()
            .place(5, 2, Cell::BlackKing)
            .place(6, 3, Cell::White)
            .place(6, 5, Cell::White);

        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].get(5, 6), Cell::BlackKing);
        assert_eq!(successors[0].piece_count(), 1);
    }

    #[test]
    fn test_man_cannot_jump_backward() {
        let board = CheckersBoard::empty()
            .place(4, 4, Cell::Black)
            .place(3, 3, Cell::White);

        // The enemy sits behind the black man; only simple moves remain.
        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 2);
        for s in &successors {
            assert_eq!(s.piece_count(), 2);
        }
    }

    #[test]
    fn test_king_moves_all_four_diagonals() {
        let board = CheckersBoard::empty().place(4, 4, Cell::WhiteKing);
        assert_eq!(board.successors(Side::Second).len(), 4);
    }

    #[test]
    fn test_simple_move_promotes_on_back_rank() {
        let board = CheckersBoard::empty().place(6, 1, Cell::Black);
        let successors = board.successors(Side::First);
        assert_eq!(successors.len(), 2);
        for s in &successors {
            let crowned = s.get(7, 0) == Cell::BlackKing || s.get(7, 2) == Cell::BlackKing;
            assert!(crowned);
        }
    }

    #[test]
    fn test_promotion_persists_in_descendants() {
        let board = CheckersBoard::empty()
            .place(0, 2, Cell::BlackKing)
            .place(5, 5, Cell::White);

        for s in board.successors(Side::First) {
            let kings = (0..SIZE)
                .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
                .filter(|&(r, c)| s.get(r, c) == Cell::BlackKing)
                .count();
            assert_eq!(kings, 1, "a king is never demoted");
        }
    }

    #[test]
    fn test_piece_count_monotonic_over_random_walk() {
        let mut board = CheckersBoard::initial();
        let mut side = Side::First;

        for _ in 0..40 {
            let successors = board.successors(side);
            if successors.is_empty() || board.goal_test().is_some() {
                break;
            }
            let before = board.piece_count();
            // Deterministic walk: always take the first successor.
            board = successors[0];
            assert!(board.piece_count() <= before);
            side = side.other();
        }
    }

    #[test]
    fn test_goal_test_detects_eliminated_side() {
        let all_black = CheckersBoard::empty().place(3, 3, Cell::Black);
        assert_eq!(all_black.goal_test(), Some(GameOutcome::Winner(Side::First)));

        let all_white = CheckersBoard::empty().place(4, 4, Cell::WhiteKing);
        assert_eq!(all_white.goal_test(), Some(GameOutcome::Winner(Side::Second)));

        assert_eq!(CheckersBoard::initial().goal_test(), None);
    }

    #[test]
    fn test_blocked_side_forfeits() {
        assert_eq!(
            CheckersBoard::blocked_outcome(Side::First),
            GameOutcome::Winner(Side::Second)
        );
    }

    #[test]
    fn test_identity_depends_only_on_cells() {
        // Same position assembled in different orders.
        let a = CheckersBoard::empty()
            .place(2, 2, Cell::Black)
            .place(5, 5, Cell::White);
        let b = CheckersBoard::empty()
            .place(5, 5, Cell::White)
            .place(2, 2, Cell::Black);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = b.place(0, 0, Cell::BlackKing);
        assert_ne!(a, c);
        assert_ne!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn test_successors_leave_the_source_board_untouched() {
        let board = CheckersBoard::initial();
        let copy = board;
        let _ = board.successors(Side::First);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_display_shows_counts() {
        let rendered = CheckersBoard::initial().to_string();
        assert!(rendered.contains("(Black Side)"));
        assert!(rendered.contains("W: 12\tWK: 0\tB: 12\tBK: 0"));
    }
}

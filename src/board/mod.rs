//! Board representation for tic-tac-toe and gobang variants

pub mod bitboard;
pub mod board;


use std::fmt;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Smallest supported board (tic-tac-toe)
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported board (gobang)
pub const MAX_BOARD_SIZE: usize = 19;
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 361

/// The two piece kinds. `First` moves first and maximizes in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    First,
    Second,
}

impl Piece {
    pub const ALL: [Piece; 2] = [Piece::First, Piece::Second];

    /// Get the other side
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::First => Piece::Second,
            Piece::Second => Piece::First,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Piece::First => 0,
            Piece::Second => 1,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::First => f.write_str("first"),
            Piece::Second => f.write_str("second"),
        }
    }
}

/// Position on the board (0-indexed row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major cell index on a board of the given size
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// Signed bounds check used by the directional walks
    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        let size = size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major ordering, the scan order used by the search.
impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

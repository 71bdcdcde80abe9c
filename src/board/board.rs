//! Square game board backed by one bitboard per piece

use super::bitboard::Bitboard;
use super::{Piece, Pos, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{EngineError, Result};

/// Game board.
///
/// Callers treat a `Board` as an immutable snapshot and build successors with
/// [`Board::with_move`]. The search mutates a private clone through
/// [`Board::place_stone`] / [`Board::remove_stone`] and always restores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// First player's pieces
    first: Bitboard,
    /// Second player's pieces
    second: Bitboard,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(EngineError::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self {
            size,
            first: Bitboard::new(),
            second: Bitboard::new(),
        })
    }

    /// Build a board from a row-major grid of cells.
    ///
    /// The grid must be square; ragged rows are reported as a malformed board.
    pub fn from_rows<R: AsRef<[Option<Piece>]>>(rows: &[R]) -> Result<Self> {
        let mut board = Board::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != board.size {
                return Err(EngineError::MalformedBoard(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    board.size
                )));
            }
            for (c, cell) in row.iter().enumerate() {
                if let Some(piece) = cell {
                    board.place_stone(Pos::new(r as u8, c as u8), *piece);
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check if position lies on this board
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    #[inline]
    #[track_caller]
    fn assert_on_board(&self, pos: Pos) {
        assert!(
            self.contains(pos),
            "position {} is outside a {}x{} board",
            pos,
            self.size,
            self.size
        );
    }

    /// Fail fast on a position outside the board
    pub fn check_bounds(&self, pos: Pos) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row: pos.row as usize,
                col: pos.col as usize,
                size: self.size,
            })
        }
    }

    /// Get piece at position.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the board. Use [`Board::cell`] for a checked read.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.assert_on_board(pos);
        let idx = pos.to_index(self.size);
        if self.first.get(idx) {
            Some(Piece::First)
        } else if self.second.get(idx) {
            Some(Piece::Second)
        } else {
            None
        }
    }

    /// Bounds-checked variant of [`Board::get`]
    pub fn cell(&self, pos: Pos) -> Result<Option<Piece>> {
        self.check_bounds(pos)?;
        Ok(self.get(pos))
    }

    /// Check if position is empty
    ///
    /// # Panics
    ///
    /// If `pos` is outside the board.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.assert_on_board(pos);
        let idx = pos.to_index(self.size);
        !self.first.get(idx) && !self.second.get(idx)
    }

    /// Place a piece on a working copy without an occupancy check.
    /// Use `with_move` for caller-facing moves.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the board.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, piece: Piece) {
        self.assert_on_board(pos);
        debug_assert!(self.is_empty(pos));
        let idx = pos.to_index(self.size);
        match piece {
            Piece::First => self.first.set(idx),
            Piece::Second => self.second.set(idx),
        }
    }

    /// Remove whatever piece occupies `pos`
    ///
    /// # Panics
    ///
    /// If `pos` is outside the board.
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.assert_on_board(pos);
        let idx = pos.to_index(self.size);
        self.first.clear(idx);
        self.second.clear(idx);
    }

    /// Return a new snapshot with `piece` placed at `pos`.
    pub fn with_move(&self, pos: Pos, piece: Piece) -> Result<Board> {
        self.check_bounds(pos)?;
        if !self.is_empty(pos) {
            return Err(EngineError::Occupied {
                row: pos.row as usize,
                col: pos.col as usize,
            });
        }
        let mut next = self.clone();
        next.place_stone(pos, piece);
        Ok(next)
    }

    /// Bitboard for one side
    #[inline]
    pub fn stones(&self, piece: Piece) -> &Bitboard {
        match piece {
            Piece::First => &self.first,
            Piece::Second => &self.second,
        }
    }

    /// Positions holding `piece`, row-major
    pub fn positions(&self, piece: Piece) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.stones(piece)
            .iter_ones()
            .map(move |idx| Pos::from_index(idx, size))
    }

    /// Empty cells in row-major scan order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let occupied = self.first.union(&self.second);
        let size = self.size;
        (0..self.cell_count())
            .filter(move |&idx| !occupied.get(idx))
            .map(move |idx| Pos::from_index(idx, size))
    }

    /// Total pieces on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.first.count() + self.second.count()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cell_count() - self.stone_count() as usize
    }

    /// No empty cell left
    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }

    /// Side to move under strict alternation starting with `First`
    #[inline]
    pub fn side_to_move(&self) -> Piece {
        if self.first.count() > self.second.count() {
            Piece::Second
        } else {
            Piece::First
        }
    }

    /// Row-major grid view of the board
    pub fn rows(&self) -> Vec<Vec<Option<Piece>>> {
        (0..self.size)
            .map(|r| {
                (0..self.size)
                    .map(|c| self.get(Pos::new(r as u8, c as u8)))
                    .collect()
            })
            .collect()
    }
}

//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing
//! pieces, which keeps transposition table lookups cheap during search.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Piece, Pos};
//! use gobang::search::ZobristTable;
//!
//! let zt = ZobristTable::new(3);
//! let mut board = Board::new(3).unwrap();
//!
//! let hash1 = zt.hash(&board, Piece::First);
//!
//! let pos = Pos::new(1, 1);
//! board.place_stone(pos, Piece::First);
//! let hash2 = zt.hash(&board, Piece::Second);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update_place(hash1, pos, Piece::First), hash2);
//! ```

use crate::board::{Board, Piece, Pos};

/// Zobrist hash table for one board size.
///
/// Random values for each (cell, piece) pair, plus one value XORed in when
/// the first player is to move.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    size: usize,
    /// Keys indexed by `cell * 2 + piece.index()`
    keys: Vec<u64>,
    first_to_move: u64,
}

impl ZobristTable {
    /// Create a table with deterministic pseudo-random values.
    ///
    /// A fixed-seed LCG keeps hashes reproducible across runs.
    #[must_use]
    pub fn new(size: usize) -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            // Mix high bits down; raw LCG low bits are weak
            seed ^ (seed >> 29)
        };

        let keys = (0..size * size * 2).map(|_| next_rand()).collect();

        Self {
            size,
            keys,
            first_to_move: next_rand(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn key(&self, pos: Pos, piece: Piece) -> u64 {
        self.keys[pos.to_index(self.size) * 2 + piece.index()]
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Piece) -> u64 {
        debug_assert_eq!(board.size(), self.size);
        let mut h = 0u64;

        for piece in Piece::ALL {
            for pos in board.positions(piece) {
                h ^= self.key(pos, piece);
            }
        }

        if side_to_move == Piece::First {
            h ^= self.first_to_move;
        }
        h
    }

    /// Incrementally update hash after placing a piece.
    ///
    /// Also toggles the side-to-move component.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, pos: Pos, piece: Piece) -> u64 {
        hash ^ self.key(pos, piece) ^ self.first_to_move
    }
}

//! Heuristic evaluation for depth-limited search
//!
//! Exhaustive search never calls an evaluator: it only ever scores terminal
//! positions. Once a depth limit is set, leaves that are not terminal are
//! scored here instead.

use crate::board::{Board, Piece, Pos};
use crate::rules::DIRECTIONS;
use crate::search::{LOSS_SCORE, WIN_SCORE};

use super::patterns::run_score;

/// Scores a non-terminal position for the side to move.
///
/// Implementations must be symmetric for negamax correctness:
/// `evaluate(board, A, k) == -evaluate(board, B, k)`, and must stay strictly
/// between `LOSS_SCORE` and `WIN_SCORE` so a heuristic value is never
/// mistaken for a proven result.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board, to_move: Piece, win_length: usize) -> i32;
}

/// Default evaluator: sums the scores of every maximal run on the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl Evaluator for LineEvaluator {
    fn evaluate(&self, board: &Board, to_move: Piece, win_length: usize) -> i32 {
        let mine = side_score(board, to_move, win_length);
        let theirs = side_score(board, to_move.opponent(), win_length);
        (mine - theirs).clamp(LOSS_SCORE + 1, WIN_SCORE - 1)
    }
}

/// Sum of run scores for one side.
///
/// Each maximal run is visited once, from its first cell along each axis.
fn side_score(board: &Board, piece: Piece, win_length: usize) -> i32 {
    let size = board.size();
    let mut total = 0i32;

    for pos in board.positions(piece) {
        for &(dr, dc) in &DIRECTIONS {
            let prev_r = pos.row as i32 - dr;
            let prev_c = pos.col as i32 - dc;
            let prev = cell_at(board, prev_r, prev_c);
            if prev == Cell::Own(piece) {
                continue;
            }

            let mut len = 1usize;
            let mut r = pos.row as i32 + dr;
            let mut c = pos.col as i32 + dc;
            while Pos::is_valid(r, c, size) && board.get(Pos::new(r as u8, c as u8)) == Some(piece) {
                len += 1;
                r += dr;
                c += dc;
            }

            let mut open_ends = 0u8;
            if prev == Cell::Empty {
                open_ends += 1;
            }
            if cell_at(board, r, c) == Cell::Empty {
                open_ends += 1;
            }
            total = total.saturating_add(run_score(len, open_ends, win_length));
        }
    }
    total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Own(Piece),
    Edge,
}

#[inline]
fn cell_at(board: &Board, r: i32, c: i32) -> Cell {
    if !Pos::is_valid(r, c, board.size()) {
        return Cell::Edge;
    }
    match board.get(Pos::new(r as u8, c as u8)) {
        Some(piece) => Cell::Own(piece),
        None => Cell::Empty,
    }
}

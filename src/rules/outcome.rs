//! Game outcome classification (win / draw / continue)

use crate::board::{Board, Piece, Pos};
use crate::error::Result;

use super::win::{check_win_length, find_winner, is_winning_move};

/// Verdict for a board after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Piece),
    Draw,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    #[inline]
    pub fn winner(self) -> Option<Piece> {
        match self {
            Outcome::Win(piece) => Some(piece),
            _ => None,
        }
    }
}

/// A board is drawn iff it has no empty cell and the last move did not win.
#[inline]
pub fn is_draw(board: &Board, last_move_won: bool) -> bool {
    !last_move_won && board.is_full()
}

/// Classify the board right after `piece` was placed at `last_move`.
pub fn outcome_after_move(board: &Board, last_move: Pos, piece: Piece, win_length: usize) -> Result<Outcome> {
    let won = is_winning_move(board, last_move, piece, win_length)?;
    Ok(if won {
        Outcome::Win(piece)
    } else if is_draw(board, won) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    })
}

/// Classify an arbitrary snapshot without knowing its last move.
pub fn board_outcome(board: &Board, win_length: usize) -> Result<Outcome> {
    check_win_length(win_length, board.size())?;
    Ok(match find_winner(board, win_length) {
        Some(piece) => Outcome::Win(piece),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::InProgress,
    })
}

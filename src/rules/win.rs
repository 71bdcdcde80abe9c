//! Win condition checking for k-in-a-row games
//!
//! A move wins when the run of identical pieces through it, along any of the
//! four axes, reaches the configured win length. Only the lines through the
//! last move are inspected, so a check costs O(4 * N) instead of a full-board
//! rescan.

use crate::board::{Board, Piece, Pos};
use crate::error::{EngineError, Result};

/// Direction vectors for line checking (4 axes)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Smallest win length accepted by the detector
pub const MIN_WIN_LENGTH: usize = 2;

/// Validate `win_length` against the board it will be used on.
pub fn check_win_length(win_length: usize, board_size: usize) -> Result<()> {
    if (MIN_WIN_LENGTH..=board_size).contains(&win_length) {
        Ok(())
    } else {
        Err(EngineError::InvalidWinLength {
            win_length,
            board_size,
        })
    }
}

/// Decide whether the piece already placed at `last_move` completes a line of
/// at least `win_length`.
///
/// # Errors
///
/// * `OutOfBounds` if `last_move` is off the board
/// * `InvalidWinLength` if `win_length` is outside `2..=board.size()`
/// * `PieceMismatch` if the cell at `last_move` does not hold `piece`
///
/// # Example
///
/// ```
/// use gobang::board::{Board, Piece, Pos};
/// use gobang::rules::is_winning_move;
///
/// let a = Some(Piece::First);
/// let b = Some(Piece::Second);
/// let board = Board::from_rows(&[[a, a, a], [None, b, None], [None, None, None]]).unwrap();
/// assert!(is_winning_move(&board, Pos::new(0, 2), Piece::First, 3).unwrap());
/// ```
pub fn is_winning_move(board: &Board, last_move: Pos, piece: Piece, win_length: usize) -> Result<bool> {
    board.check_bounds(last_move)?;
    check_win_length(win_length, board.size())?;
    if board.get(last_move) != Some(piece) {
        return Err(EngineError::PieceMismatch {
            row: last_move.row as usize,
            col: last_move.col as usize,
            piece,
        });
    }
    Ok(has_run_through(board, last_move, piece, win_length))
}

/// Unchecked win test used inside the search. `pos` must be on the board.
#[inline]
pub(crate) fn has_run_through(board: &Board, pos: Pos, piece: Piece, win_length: usize) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| run_length(board, pos, piece, dir) >= win_length)
}

/// Count consecutive cells holding `piece` along one axis through `pos`,
/// including `pos` itself.
#[inline]
pub fn run_length(board: &Board, pos: Pos, piece: Piece, (dr, dc): (i32, i32)) -> usize {
    1 + count_direction(board, pos, piece, dr, dc) + count_direction(board, pos, piece, -dr, -dc)
}

#[inline]
fn count_direction(board: &Board, pos: Pos, piece: Piece, dr: i32, dc: i32) -> usize {
    let size = board.size();
    let mut count = 0;
    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    while Pos::is_valid(r, c, size) && board.get(Pos::new(r as u8, c as u8)) == Some(piece) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Find the full winning line through `pos`, if any.
///
/// Returns the positions of the first qualifying axis in walking order.
pub fn winning_line(board: &Board, pos: Pos, piece: Piece, win_length: usize) -> Option<Vec<Pos>> {
    if !board.contains(pos) || board.get(pos) != Some(piece) {
        return None;
    }
    let size = board.size();

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let mut r = pos.row as i32 - dr;
        let mut c = pos.col as i32 - dc;
        while Pos::is_valid(r, c, size) && board.get(Pos::new(r as u8, c as u8)) == Some(piece) {
            line.insert(0, Pos::new(r as u8, c as u8));
            r -= dr;
            c -= dc;
        }

        // Extend in positive direction
        r = pos.row as i32 + dr;
        c = pos.col as i32 + dc;
        while Pos::is_valid(r, c, size) && board.get(Pos::new(r as u8, c as u8)) == Some(piece) {
            line.push(Pos::new(r as u8, c as u8));
            r += dr;
            c += dc;
        }

        if line.len() >= win_length {
            return Some(line);
        }
    }
    None
}

/// Scan the whole board for a completed line.
///
/// Used to classify arbitrary snapshots handed in by a collaborator; move
/// handling goes through [`is_winning_move`].
pub fn find_winner(board: &Board, win_length: usize) -> Option<Piece> {
    Piece::ALL.into_iter().find(|&piece| {
        board
            .positions(piece)
            .any(|pos| has_run_through(board, pos, piece, win_length))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const A: Option<Piece> = Some(Piece::First);
    const B: Option<Piece> = Some(Piece::Second);
    const E: Option<Piece> = None;

    fn board_with(size: usize, cells: &[(u8, u8, Piece)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c, piece) in cells {
            board.place_stone(Pos::new(r, c), piece);
        }
        board
    }

    /// Reference: does any window of `k` cells through `pos` hold only `piece`?
    fn reference_win(board: &Board, pos: Pos, piece: Piece, k: usize) -> bool {
        let n = board.size() as i32;
        let k = k as i32;
        for &(dr, dc) in &DIRECTIONS {
            for offset in 0..k {
                let start_r = pos.row as i32 - dr * offset;
                let start_c = pos.col as i32 - dc * offset;
                let all = (0..k).all(|i| {
                    let r = start_r + dr * i;
                    let c = start_c + dc * i;
                    r >= 0
                        && r < n
                        && c >= 0
                        && c < n
                        && board.get(Pos::new(r as u8, c as u8)) == Some(piece)
                });
                if all {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_horizontal_scenario() {
        let board = Board::from_rows(&[[A, A, A], [E, B, E], [E, E, E]]).unwrap();
        assert!(is_winning_move(&board, Pos::new(0, 2), Piece::First, 3).unwrap());
    }

    #[test]
    fn test_vertical() {
        let board = board_with(5, &[(1, 3, Piece::Second), (2, 3, Piece::Second), (3, 3, Piece::Second)]);
        assert!(is_winning_move(&board, Pos::new(2, 3), Piece::Second, 3).unwrap());
        assert!(!is_winning_move(&board, Pos::new(2, 3), Piece::Second, 4).unwrap());
    }

    #[test]
    fn test_diagonal_se() {
        let board = board_with(4, &[(0, 0, Piece::First), (1, 1, Piece::First), (2, 2, Piece::First), (3, 3, Piece::First)]);
        assert!(is_winning_move(&board, Pos::new(0, 0), Piece::First, 4).unwrap());
        assert!(is_winning_move(&board, Pos::new(3, 3), Piece::First, 4).unwrap());
    }

    #[test]
    fn test_diagonal_sw() {
        let board = board_with(3, &[(0, 2, Piece::Second), (1, 1, Piece::Second), (2, 0, Piece::Second)]);
        assert!(is_winning_move(&board, Pos::new(1, 1), Piece::Second, 3).unwrap());
    }

    #[test]
    fn test_gap_breaks_run() {
        let board = board_with(5, &[(2, 0, Piece::First), (2, 1, Piece::First), (2, 3, Piece::First), (2, 4, Piece::First)]);
        assert!(!is_winning_move(&board, Pos::new(2, 1), Piece::First, 3).unwrap());
    }

    #[test]
    fn test_opponent_piece_breaks_run() {
        let board = Board::from_rows(&[[A, B, A], [E, E, E], [E, E, E]]).unwrap();
        assert!(!is_winning_move(&board, Pos::new(0, 2), Piece::First, 2).unwrap());
    }

    #[test]
    fn test_overline_wins() {
        let cells: Vec<(u8, u8, Piece)> = (0..7).map(|c| (9, c, Piece::First)).collect();
        let board = board_with(19, &cells);
        assert!(is_winning_move(&board, Pos::new(9, 6), Piece::First, 5).unwrap());
    }

    #[test]
    fn test_win_length_two() {
        let board = board_with(3, &[(2, 1, Piece::Second), (1, 2, Piece::Second)]);
        assert!(is_winning_move(&board, Pos::new(2, 1), Piece::Second, 2).unwrap());
    }

    #[test]
    fn test_single_piece_no_win() {
        let board = board_with(3, &[(1, 1, Piece::First)]);
        assert!(!is_winning_move(&board, Pos::new(1, 1), Piece::First, 2).unwrap());
    }

    #[test]
    fn test_out_of_bounds_fails_fast() {
        let board = Board::new(3).unwrap();
        let err = is_winning_move(&board, Pos::new(0, 3), Piece::First, 3).unwrap_err();
        assert_eq!(err, EngineError::OutOfBounds { row: 0, col: 3, size: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_invalid_win_length() {
        let board = board_with(3, &[(0, 0, Piece::First)]);
        assert!(is_winning_move(&board, Pos::new(0, 0), Piece::First, 1).is_err());
        assert_eq!(
            is_winning_move(&board, Pos::new(0, 0), Piece::First, 4),
            Err(EngineError::InvalidWinLength { win_length: 4, board_size: 3 })
        );
    }

    #[test]
    fn test_piece_mismatch() {
        let board = board_with(3, &[(0, 0, Piece::Second)]);
        let err = is_winning_move(&board, Pos::new(0, 0), Piece::First, 3).unwrap_err();
        assert!(matches!(err, EngineError::PieceMismatch { .. }));
        assert!(is_winning_move(&board, Pos::new(1, 1), Piece::First, 3).is_err());
    }

    #[test]
    fn test_winning_line_positions() {
        let board = Board::from_rows(&[[E, E, B], [E, B, E], [B, E, A]]).unwrap();
        let line = winning_line(&board, Pos::new(1, 1), Piece::Second, 3).unwrap();
        assert_eq!(line, vec![Pos::new(0, 2), Pos::new(1, 1), Pos::new(2, 0)]);
        assert!(winning_line(&board, Pos::new(2, 2), Piece::First, 3).is_none());
    }

    #[test]
    fn test_find_winner() {
        let board = Board::from_rows(&[[A, B, E], [A, B, E], [A, E, E]]).unwrap();
        assert_eq!(find_winner(&board, 3), Some(Piece::First));
        assert_eq!(find_winner(&Board::new(3).unwrap(), 3), None);

        let board = Board::from_rows(&[[A, B, A], [A, B, B], [B, A, A]]).unwrap();
        assert_eq!(find_winner(&board, 3), None);
    }

    /// Every ternary 3x3 board, every occupied cell, win lengths 2 and 3.
    #[test]
    fn test_exhaustive_3x3_matches_reference() {
        for code in 0..3u32.pow(9) {
            let mut board = Board::new(3).unwrap();
            let mut rest = code;
            for idx in 0..9 {
                match rest % 3 {
                    1 => board.place_stone(Pos::from_index(idx, 3), Piece::First),
                    2 => board.place_stone(Pos::from_index(idx, 3), Piece::Second),
                    _ => {}
                }
                rest /= 3;
            }
            for idx in 0..9 {
                let pos = Pos::from_index(idx, 3);
                let Some(piece) = board.get(pos) else { continue };
                for k in 2..=3 {
                    assert_eq!(
                        is_winning_move(&board, pos, piece, k).unwrap(),
                        reference_win(&board, pos, piece, k),
                        "board code {code}, pos {pos}, k {k}"
                    );
                }
            }
        }
    }

    /// Every occupancy pattern of a single piece on 4x4, win lengths 2..=4.
    #[test]
    fn test_exhaustive_4x4_matches_reference() {
        for mask in 0..(1u32 << 16) {
            let mut board = Board::new(4).unwrap();
            for idx in 0..16 {
                if mask & (1 << idx) != 0 {
                    board.place_stone(Pos::from_index(idx, 4), Piece::First);
                }
            }
            for pos in board.positions(Piece::First).collect::<Vec<_>>() {
                for k in 2..=4 {
                    assert_eq!(
                        has_run_through(&board, pos, Piece::First, k),
                        reference_win(&board, pos, Piece::First, k),
                        "mask {mask:#06x}, pos {pos}, k {k}"
                    );
                }
            }
        }
    }
}

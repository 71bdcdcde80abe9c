//! Property tests for win detection and move search

use gobang::{best_move, is_winning_move, Board, GameConfig, Piece, Pos, LOSS_SCORE, WIN_SCORE};
use proptest::prelude::*;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

fn cell_strategy() -> impl Strategy<Value = Option<Piece>> {
    prop_oneof![Just(None), Just(Some(Piece::First)), Just(Some(Piece::Second))]
}

/// Random board of side `3..=max_size`, any mix of cells
fn board_strategy(max_size: usize) -> impl Strategy<Value = Vec<Vec<Option<Piece>>>> {
    (3..=max_size).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(cell_strategy(), n), n))
}

/// Brute force: some window of `k` cells containing `pos` is all `piece`
fn reference_win(rows: &[Vec<Option<Piece>>], pos: (usize, usize), piece: Piece, k: usize) -> bool {
    let n = rows.len() as i32;
    let (pr, pc) = (pos.0 as i32, pos.1 as i32);
    DIRECTIONS.iter().any(|&(dr, dc)| {
        (0..k as i32).any(|offset| {
            (0..k as i32).all(|i| {
                let r = pr + (i - offset) * dr;
                let c = pc + (i - offset) * dc;
                r >= 0 && r < n && c >= 0 && c < n && rows[r as usize][c as usize] == Some(piece)
            })
        })
    })
}

fn transform(rows: &[Vec<Option<Piece>>], f: impl Fn(usize, usize, usize) -> (usize, usize)) -> Vec<Vec<Option<Piece>>> {
    let n = rows.len();
    let mut out = vec![vec![None; n]; n];
    for (r, row) in rows.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            let (tr, tc) = f(r, c, n);
            out[tr][tc] = cell;
        }
    }
    out
}

fn rotate(r: usize, c: usize, n: usize) -> (usize, usize) {
    (c, n - 1 - r)
}

fn mirror_h(r: usize, c: usize, n: usize) -> (usize, usize) {
    (r, n - 1 - c)
}

fn mirror_v(r: usize, c: usize, n: usize) -> (usize, usize) {
    (n - 1 - r, c)
}

/// Position reached by alternating play that never completes a line.
///
/// Leaves at most nine empty cells so an exhaustive search stays cheap.
fn game_strategy() -> impl Strategy<Value = (usize, usize, Board)> {
    (3usize..=4, 0usize..2, 0usize..4, prop::collection::vec(0usize..1000, 16)).prop_map(
        |(n, k_seed, extra, picks)| {
            let k = if n == 3 { 3 } else { 3 + k_seed };
            let stones = (n * n).saturating_sub(9) + extra;
            let mut board = Board::new(n).unwrap();
            let mut to_move = Piece::First;

            for &pick in picks.iter().take(stones) {
                let empties: Vec<Pos> = board.empty_cells().collect();
                let quiet = (0..empties.len())
                    .map(|i| empties[(pick + i) % empties.len()])
                    .find(|&pos| {
                        let next = board.with_move(pos, to_move).unwrap();
                        !is_winning_move(&next, pos, to_move, k).unwrap()
                    });
                let Some(pos) = quiet else { break };
                board.place_stone(pos, to_move);
                to_move = to_move.opponent();
            }
            (n, k, board)
        },
    )
}

fn config_for(size: usize, win_length: usize) -> GameConfig {
    let mut config = GameConfig::tic_tac_toe();
    config.board_size = size;
    config.win_length = win_length;
    config
}

proptest! {
    #[test]
    fn prop_matches_reference(rows in board_strategy(6), k_seed in 0usize..100, pick in 0usize..1000) {
        let n = rows.len();
        let k = 2 + k_seed % (n - 1);
        let occupied: Vec<(usize, usize)> = (0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .filter(|&(r, c)| rows[r][c].is_some())
            .collect();
        prop_assume!(!occupied.is_empty());

        let (r, c) = occupied[pick % occupied.len()];
        let piece = rows[r][c].unwrap();
        let board = Board::from_rows(&rows).unwrap();
        let got = is_winning_move(&board, Pos::new(r as u8, c as u8), piece, k).unwrap();
        prop_assert_eq!(got, reference_win(&rows, (r, c), piece, k), "pos ({}, {}) k {}", r, c, k);
    }

    #[test]
    fn prop_symmetry(rows in board_strategy(6), k_seed in 0usize..100) {
        let n = rows.len();
        let k = 2 + k_seed % (n - 1);
        let board = Board::from_rows(&rows).unwrap();

        for f in [rotate as fn(usize, usize, usize) -> (usize, usize), mirror_h, mirror_v] {
            let moved = Board::from_rows(&transform(&rows, f)).unwrap();
            for r in 0..n {
                for c in 0..n {
                    let Some(piece) = rows[r][c] else { continue };
                    let (tr, tc) = f(r, c, n);
                    let a = is_winning_move(&board, Pos::new(r as u8, c as u8), piece, k).unwrap();
                    let b = is_winning_move(&moved, Pos::new(tr as u8, tc as u8), piece, k).unwrap();
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn prop_best_move_is_legal_and_pure((n, k, board) in game_strategy()) {
        let config = config_for(n, k);
        let to_move = board.side_to_move();
        let snapshot = board.clone();

        let first = best_move(&board, &config, to_move).unwrap();
        prop_assert_eq!(&board, &snapshot);

        match first.best_move {
            Some(pos) => prop_assert!(board.is_empty(pos)),
            None => prop_assert!(board.is_full()),
        }

        let again = best_move(&board, &config, to_move).unwrap();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn prop_immediate_win_is_found((n, k, board) in game_strategy()) {
        let to_move = board.side_to_move();
        let can_win = board.empty_cells().any(|pos| {
            let next = board.with_move(pos, to_move).unwrap();
            is_winning_move(&next, pos, to_move, k).unwrap()
        });
        prop_assume!(can_win);

        let result = best_move(&board, &config_for(n, k), to_move).unwrap();
        let expected = if to_move == Piece::First { WIN_SCORE } else { LOSS_SCORE };
        prop_assert_eq!(result.score, expected);
    }
}

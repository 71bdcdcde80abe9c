//! Alpha-Beta search over the legal-move tree
//!
//! Negamax formulation of minimax with alpha-beta pruning. The first player
//! maximizes; scores handed back to callers are always from the first
//! player's point of view.
//!
//! # Features
//!
//! - Exhaustive search by default, terminal positions scored WIN / LOSS / TIED
//! - Optional depth limit with a pluggable [`Evaluator`] for larger boards
//! - Transposition table for positions reached through different move orders
//! - Deadline and cancellation checked at every recursion entry
//! - Root split across rayon workers with a deterministic merge
//!
//! Every hypothetical placement is made on a private working copy and
//! retracted before the next candidate is tried, including on error paths.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Piece, Pos};
//! use gobang::eval::LineEvaluator;
//! use gobang::search::{SearchParams, Searcher, ZobristTable};
//!
//! let a = Some(Piece::First);
//! let b = Some(Piece::Second);
//! let board = Board::from_rows(&[[a, a, None], [None, b, None], [b, None, None]]).unwrap();
//!
//! let zobrist = ZobristTable::new(3);
//! let params = SearchParams::new(3, &LineEvaluator, &zobrist);
//! let result = Searcher::new(params).search(&board, Piece::First).unwrap();
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::board::{Board, Piece, Pos};
use crate::error::{EngineError, Result};
use crate::eval::Evaluator;
use crate::rules::has_run_through;

use super::{EntryType, TranspositionTable, ZobristTable};

/// Score of a position the first player has won
pub const WIN_SCORE: i32 = 1_000_000;
/// Score of a position the second player has won
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// Score of a drawn position
pub const TIED_SCORE: i32 = 0;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1;

/// TT depth marker for subtrees searched to the end
const EXHAUSTIVE_DEPTH: u8 = u8::MAX;

/// Candidate radius around existing pieces in depth-limited mode
const PROXIMITY_RADIUS: i32 = 2;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs
    pub beta_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    /// TT score hit rate
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining worker stats)
    fn merge(&mut self, other: &SearchStats) {
        self.beta_cutoffs += other.beta_cutoffs;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
    }
}

/// Search result containing the recommended move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Recommended move; `None` when no legal move exists
    pub best_move: Option<Pos>,
    /// Score from the first player's perspective
    pub score: i32,
    /// Placements simulated
    pub nodes: u64,
    pub stats: SearchStats,
}

impl SearchResult {
    /// Result for a board with no legal move left
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            best_move: None,
            score: TIED_SCORE,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// The search proved a forced win for `piece`
    #[must_use]
    pub fn is_forced_win_for(&self, piece: Piece) -> bool {
        match piece {
            Piece::First => self.score == WIN_SCORE,
            Piece::Second => self.score == LOSS_SCORE,
        }
    }
}

/// Shared flag a host can set to abandon a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Read-only inputs shared by every worker of one search.
#[derive(Clone, Copy)]
pub struct SearchParams<'a> {
    pub win_length: usize,
    /// `None` searches to the end of the game
    pub max_depth: Option<u8>,
    pub evaluator: &'a dyn Evaluator,
    pub zobrist: &'a ZobristTable,
    /// Transposition table size in MB; `None` disables the table
    pub tt_size_mb: Option<usize>,
    /// Absolute deadline and the limit it was derived from
    pub deadline: Option<(Instant, Duration)>,
    pub cancel: Option<&'a CancelToken>,
}

impl<'a> SearchParams<'a> {
    /// Exhaustive search with a 1 MB transposition table and no deadline.
    #[must_use]
    pub fn new(win_length: usize, evaluator: &'a dyn Evaluator, zobrist: &'a ZobristTable) -> Self {
        Self {
            win_length,
            max_depth: None,
            evaluator,
            zobrist,
            tt_size_mb: Some(1),
            deadline: None,
            cancel: None,
        }
    }
}

impl SearchParams<'_> {
    /// Board must match the Zobrist table; a depth limit must allow one ply.
    fn check(&self, board: &Board) -> Result<()> {
        if board.size() != self.zobrist.size() {
            return Err(EngineError::DimensionMismatch {
                expected: self.zobrist.size(),
                actual: board.size(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(EngineError::InvalidSearchDepth);
        }
        Ok(())
    }
}

/// Single-threaded alpha-beta searcher.
pub struct Searcher<'a> {
    params: SearchParams<'a>,
    tt: Option<TranspositionTable>,
    nodes: u64,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(params: SearchParams<'a>) -> Self {
        Self {
            params,
            tt: params.tt_size_mb.map(TranspositionTable::new),
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Search for the best move for `to_move`.
    ///
    /// The board must not already hold a winning line; the engine layer
    /// validates that before calling in.
    pub fn search(&mut self, board: &Board, to_move: Piece) -> Result<SearchResult> {
        self.params.check(board)?;
        if board.is_full() {
            return Ok(SearchResult::terminal());
        }
        self.check_interrupt()?;

        let mut work_board = board.clone();
        let hash = self.params.zobrist.hash(&work_board, to_move);

        let mut alpha = -INF;
        let beta = INF;
        let mut best_score = -INF;
        let mut best_move = None;

        for pos in self.candidates(&work_board) {
            let score = self.search_child(&mut work_board, to_move, pos, hash, 0, alpha, beta)?;
            trace!(%pos, score, "root candidate");

            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            alpha = alpha.max(score);
            if best_score >= WIN_SCORE {
                break;
            }
        }
        debug_assert_eq!(&work_board, board);

        let result = SearchResult {
            best_move,
            score: from_first_perspective(best_score, to_move),
            nodes: self.nodes,
            stats: self.stats.clone(),
        };
        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            beta_cutoffs = result.stats.beta_cutoffs,
            "search finished"
        );
        Ok(result)
    }

    /// Place `mover` at `pos`, score the resulting position for `mover`, retract.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        board: &mut Board,
        mover: Piece,
        pos: Pos,
        hash: u64,
        ply: usize,
        alpha: i32,
        beta: i32,
    ) -> Result<i32> {
        self.nodes += 1;
        board.place_stone(pos, mover);

        let result = if has_run_through(board, pos, mover, self.params.win_length) {
            Ok(WIN_SCORE)
        } else {
            let child_hash = self.params.zobrist.update_place(hash, pos, mover);
            self.alpha_beta(board, mover.opponent(), ply + 1, -beta, -alpha, child_hash)
                .map(|score| -score)
        };

        board.remove_stone(pos);
        result
    }

    /// Recursive alpha-beta search with negamax formulation.
    ///
    /// `board` has no winning line; the last placement was checked by the
    /// caller.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        color: Piece,
        ply: usize,
        mut alpha: i32,
        beta: i32,
        hash: u64,
    ) -> Result<i32> {
        self.check_interrupt()?;

        if board.is_full() {
            return Ok(TIED_SCORE);
        }

        let remaining = match self.params.max_depth {
            Some(limit) if ply >= limit as usize => {
                return Ok(self
                    .params
                    .evaluator
                    .evaluate(board, color, self.params.win_length));
            }
            Some(limit) => (limit as usize - ply) as u8,
            None => EXHAUSTIVE_DEPTH,
        };

        if let Some(tt) = &self.tt {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(hash, remaining, alpha, beta) {
                self.stats.tt_hits += 1;
                return Ok(score);
            }
        }

        let original_alpha = alpha;
        let mut best_score = -INF;

        for pos in self.candidates(board) {
            let score = self.search_child(board, color, pos, hash, ply, alpha, beta)?;

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                break;
            }
            if best_score >= WIN_SCORE {
                break;
            }
        }

        if let Some(tt) = &mut self.tt {
            let entry_type = if best_score >= beta {
                EntryType::LowerBound
            } else if best_score > original_alpha {
                EntryType::Exact
            } else {
                EntryType::UpperBound
            };
            tt.store(hash, remaining, best_score, entry_type);
        }

        Ok(best_score)
    }

    /// Candidate moves in row-major scan order.
    ///
    /// Exhaustive mode tries every empty cell. Depth-limited mode only tries
    /// cells near existing pieces (the centre on an empty board).
    fn candidates(&self, board: &Board) -> Vec<Pos> {
        if self.params.max_depth.is_none() {
            return board.empty_cells().collect();
        }
        if board.is_board_empty() {
            let mid = (board.size() / 2) as u8;
            return vec![Pos::new(mid, mid)];
        }
        board
            .empty_cells()
            .filter(|&pos| has_neighbor(board, pos, PROXIMITY_RADIUS))
            .collect()
    }

    /// Fail if the host cancelled the search or the deadline passed.
    fn check_interrupt(&self) -> Result<()> {
        if let Some(token) = self.params.cancel {
            if token.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
        }
        if let Some((deadline, limit)) = self.params.deadline {
            if Instant::now() >= deadline {
                return Err(EngineError::DeadlineExceeded(limit));
            }
        }
        Ok(())
    }
}

/// Search each root candidate on its own worker and board copy.
///
/// Every candidate gets a full window, so its score is exact; the merge takes
/// the highest score and breaks ties by scan order, which reproduces the
/// sequential result.
pub fn search_parallel(params: SearchParams<'_>, board: &Board, to_move: Piece) -> Result<SearchResult> {
    params.check(board)?;
    if board.is_full() {
        return Ok(SearchResult::terminal());
    }
    let root = Searcher::new(SearchParams { tt_size_mb: None, ..params });
    root.check_interrupt()?;
    let candidates = root.candidates(board);
    let hash = params.zobrist.hash(board, to_move);

    let scored: Vec<(Pos, Result<i32>, u64, SearchStats)> = candidates
        .par_iter()
        .map(|&pos| {
            let mut worker = Searcher::new(params);
            let mut local_board = board.clone();
            let score = worker.search_child(&mut local_board, to_move, pos, hash, 0, -INF, INF);
            (pos, score, worker.nodes, worker.stats)
        })
        .collect();

    let mut best_score = -INF;
    let mut best_move = None;
    let mut nodes = 0;
    let mut stats = SearchStats::default();

    for (pos, score, worker_nodes, worker_stats) in scored {
        let score = score?;
        trace!(%pos, score, "root candidate (parallel)");
        nodes += worker_nodes;
        stats.merge(&worker_stats);
        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
    }

    debug!(best_move = ?best_move, score = best_score, nodes, "parallel search finished");
    Ok(SearchResult {
        best_move,
        score: from_first_perspective(best_score, to_move),
        nodes,
        stats,
    })
}

#[inline]
fn from_first_perspective(score: i32, to_move: Piece) -> i32 {
    match to_move {
        Piece::First => score,
        Piece::Second => -score,
    }
}

/// Any piece within Chebyshev distance `radius` of `pos`
fn has_neighbor(board: &Board, pos: Pos, radius: i32) -> bool {
    let size = board.size();
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = pos.row as i32 + dr;
            let c = pos.col as i32 + dc;
            if Pos::is_valid(r, c, size) && !board.is_empty(Pos::new(r as u8, c as u8)) {
                return true;
            }
        }
    }
    false
}

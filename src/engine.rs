//! Move engine for the computer player
//!
//! Wraps the alpha-beta searcher with the checks a collaborator relies on:
//! the board must match the configured size, must not already be won, and a
//! full board yields "no move" instead of a search.
//!
//! # Example
//!
//! ```
//! use gobang::{best_move, Board, GameConfig, Piece, Pos, WIN_SCORE};
//!
//! let config = GameConfig::tic_tac_toe();
//! let board = config.parse_board("XX./.O./...").unwrap();
//!
//! let result = best_move(&board, &config, Piece::First).unwrap();
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! assert_eq!(result.score, WIN_SCORE);
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use crate::board::{Board, Piece};
use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::eval::{Evaluator, LineEvaluator};
use crate::rules::find_winner;
use crate::search::{search_parallel, CancelToken, SearchParams, SearchResult, Searcher, ZobristTable};

/// Exhaustive search above this many empty cells is not expected to finish.
pub const EXHAUSTIVE_CELL_LIMIT: usize = 12;

/// Move engine bound to one game configuration.
///
/// The engine keeps no state between calls apart from the Zobrist keys for
/// its board size; every search starts with a fresh transposition table.
pub struct Engine {
    config: GameConfig,
    evaluator: Box<dyn Evaluator>,
    zobrist: ZobristTable,
    cancel: Option<CancelToken>,
}

impl Engine {
    /// Create an engine for a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let zobrist = ZobristTable::new(config.board_size);
        Ok(Self {
            config,
            evaluator: Box::new(LineEvaluator),
            zobrist,
            cancel: None,
        })
    }

    /// Replace the leaf evaluator used in depth-limited mode.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Let the host abandon searches through `token`.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Recommend a move for `to_move`.
    ///
    /// Returns `best_move: None` with a tied score on a full board. Fails with
    /// [`EngineError::GameOver`] if a winning line is already on the board and
    /// with [`EngineError::DimensionMismatch`] if the board size differs from
    /// the configuration.
    #[instrument(skip(self, board), fields(game = %self.config.name))]
    pub fn best_move(&self, board: &Board, to_move: Piece) -> Result<SearchResult> {
        let start = Instant::now();
        self.config.check_board(board)?;

        if let Some(winner) = find_winner(board, self.config.win_length) {
            return Err(EngineError::GameOver { winner });
        }
        if board.is_full() {
            debug!("board is full, no move to recommend");
            return Ok(SearchResult::terminal());
        }

        let search = &self.config.search;
        let empty = board.empty_count();
        if search.is_exhaustive() && empty > EXHAUSTIVE_CELL_LIMIT {
            warn!(
                empty_cells = empty,
                limit = EXHAUSTIVE_CELL_LIMIT,
                "exhaustive search on a large board may not terminate; set max_depth"
            );
        }

        let params = SearchParams {
            win_length: self.config.win_length,
            max_depth: search.max_depth,
            evaluator: &*self.evaluator,
            zobrist: &self.zobrist,
            tt_size_mb: search.transposition.then_some(search.tt_size_mb),
            deadline: search.time_limit_ms.map(|ms| {
                let limit = Duration::from_millis(ms);
                (start + limit, limit)
            }),
            cancel: self.cancel.as_ref(),
        };

        let result = if search.parallel {
            search_parallel(params, board, to_move)?
        } else {
            Searcher::new(params).search(board, to_move)?
        };

        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            tt_hit_rate = result.stats.tt_hit_rate(),
            time_ms = start.elapsed().as_millis() as u64,
            "best move chosen"
        );
        Ok(result)
    }
}

/// One-shot search: validate `config`, then recommend a move for `to_move`.
pub fn best_move(board: &Board, config: &GameConfig, to_move: Piece) -> Result<SearchResult> {
    Engine::new(config.clone())?.best_move(board, to_move)
}

//! K-in-a-row rules and move search for tic-tac-toe and gobang
//!
//! The crate is the rules/AI core behind a board-game front-end:
//! - Square boards from 3x3 to 19x19
//! - Configurable win length (`K` in a row, overlines count)
//! - Win detection centred on the last move
//! - Minimax with alpha-beta pruning for the computer player
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection and game outcome
//! - [`eval`]: Heuristic evaluation for depth-limited search
//! - [`search`]: Alpha-beta search, transposition table, Zobrist keys
//! - [`engine`]: Validated entry point for move recommendations
//! - [`session`]: Headless game state with history and seats
//! - [`config`]: Game variants, search knobs, board notation
//!
//! # Quick Start
//!
//! ```
//! use gobang::{is_winning_move, Engine, GameConfig, Piece, Pos};
//!
//! let config = GameConfig::tic_tac_toe();
//! let engine = Engine::new(config.clone()).unwrap();
//!
//! let board = config.parse_board("X../.O./...").unwrap();
//! let result = engine.best_move(&board, Piece::First).unwrap();
//! let pos = result.best_move.unwrap();
//!
//! let board = board.with_move(pos, Piece::First).unwrap();
//! assert!(!is_winning_move(&board, pos, Piece::First, config.win_length).unwrap());
//! ```
//!
//! # Search
//!
//! By default the search is exhaustive, which is only tractable on small
//! boards. Larger variants set `search.max_depth` and score the leaves with
//! an [`Evaluator`].

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, Piece, Pos, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use config::{GameConfig, PieceSymbols, SearchConfig};
pub use engine::{best_move, Engine, EXHAUSTIVE_CELL_LIMIT};
pub use error::{ConfigError, EngineError, ErrorKind, Result};
pub use eval::{Evaluator, LineEvaluator};
pub use rules::{is_draw, is_winning_move, Outcome};
pub use search::{CancelToken, SearchResult, SearchStats, LOSS_SCORE, TIED_SCORE, WIN_SCORE};
pub use session::{Action, GameSession, Seat};

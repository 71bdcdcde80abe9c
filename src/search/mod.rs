//! Search module for the move engine
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Alpha-Beta search, sequential and root-parallel

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{
    search_parallel, CancelToken, SearchParams, SearchResult, SearchStats, Searcher, LOSS_SCORE,
    TIED_SCORE, WIN_SCORE,
};
pub use tt::{EntryType, TTEntry, TranspositionTable};
pub use zobrist::ZobristTable;

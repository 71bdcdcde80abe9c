//! Error types for the rules and search layers

use std::path::PathBuf;
use std::time::Duration;

use crate::board::Piece;

/// Broad category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value outside the accepted domain.
    InvalidArgument,
    /// The board handed in cannot be operated on (finished game, malformed grid).
    InvalidState,
    /// The search was stopped before it could produce a complete answer.
    Interrupted,
}

/// Errors raised by the board model, the win detector and the search engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("board size {size} outside supported range {min}..={max}")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    #[error("win length {win_length} outside 2..={board_size}")]
    InvalidWinLength { win_length: usize, board_size: usize },

    #[error("position ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) does not hold the {piece} piece")]
    PieceMismatch { row: usize, col: usize, piece: Piece },

    #[error("search depth limit must be at least one ply")]
    InvalidSearchDepth,

    #[error("piece symbols must be two distinct, non-empty strings")]
    InvalidSymbols,

    #[error("step {step} is beyond the {available} recorded moves")]
    InvalidStep { step: usize, available: usize },

    #[error("malformed board: {0}")]
    MalformedBoard(String),

    #[error("board is {actual}x{actual} but the configuration expects {expected}x{expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("game is already over: {winner} holds a winning line")]
    GameOver { winner: Piece },

    #[error("search cancelled before completion")]
    Cancelled,

    #[error("search exceeded its time limit of {0:?}")]
    DeadlineExceeded(Duration),
}

impl EngineError {
    /// Category used by collaborators to decide how to surface the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidBoardSize { .. }
            | EngineError::InvalidWinLength { .. }
            | EngineError::OutOfBounds { .. }
            | EngineError::Occupied { .. }
            | EngineError::PieceMismatch { .. }
            | EngineError::InvalidSymbols
            | EngineError::InvalidSearchDepth
            | EngineError::InvalidStep { .. } => ErrorKind::InvalidArgument,
            EngineError::MalformedBoard(_)
            | EngineError::DimensionMismatch { .. }
            | EngineError::GameOver { .. } => ErrorKind::InvalidState,
            EngineError::Cancelled | EngineError::DeadlineExceeded(_) => ErrorKind::Interrupted,
        }
    }
}

/// Errors that can occur when loading a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

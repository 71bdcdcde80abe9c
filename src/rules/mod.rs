//! Game rules for k-in-a-row games
//!
//! This module implements:
//! - Win detection through the last move (any board size, any win length)
//! - Outcome classification (win, draw, in progress)

pub mod outcome;
pub mod win;

// Re-exports for convenient access
pub use outcome::{board_outcome, is_draw, outcome_after_move, Outcome};
pub use win::{
    check_win_length, find_winner, is_winning_move, run_length, winning_line, DIRECTIONS,
    MIN_WIN_LENGTH,
};

pub(crate) use win::has_run_through;

//! Evaluation module for depth-limited search
//!
//! Scores non-terminal leaves by their line patterns (runs measured against
//! the configured win length, open vs. blocked ends).

pub mod heuristic;
pub mod patterns;

pub use heuristic::{Evaluator, LineEvaluator};
pub use patterns::{run_score, RunScore};

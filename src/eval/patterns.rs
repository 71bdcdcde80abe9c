//! Run scores for heuristic evaluation
//!
//! A run is scored by how many pieces it still lacks to reach the win
//! length and by how many of its two ends are open.

/// Pattern scores for evaluation
pub struct RunScore;

impl RunScore {
    /// One short of the win length, both ends open (unstoppable)
    pub const OPEN_ONE_SHORT: i32 = 100_000;
    /// One short, one end open
    pub const CLOSED_ONE_SHORT: i32 = 50_000;

    /// Two short, both ends open
    pub const OPEN_TWO_SHORT: i32 = 10_000;
    /// Two short, one end open.
    /// Well below OPEN_TWO_SHORT: the opponent has a single blocking point.
    pub const CLOSED_TWO_SHORT: i32 = 1_500;

    /// Three short, both ends open
    pub const OPEN_THREE_SHORT: i32 = 1_000;
    /// Three short, one end open
    pub const CLOSED_THREE_SHORT: i32 = 200;

    /// Per-piece value of any longer-range open run
    pub const DISTANT: i32 = 10;
}

/// Score one maximal run.
///
/// `len` is the run length, `open_ends` the number of empty cells bounding
/// it (0-2). Runs with both ends blocked cannot grow and score nothing.
pub fn run_score(len: usize, open_ends: u8, win_length: usize) -> i32 {
    if open_ends == 0 || len == 0 {
        return 0;
    }
    let open = open_ends >= 2;
    match win_length.saturating_sub(len) {
        0 => RunScore::OPEN_ONE_SHORT * 10,
        1 if open => RunScore::OPEN_ONE_SHORT,
        1 => RunScore::CLOSED_ONE_SHORT,
        2 if open => RunScore::OPEN_TWO_SHORT,
        2 => RunScore::CLOSED_TWO_SHORT,
        3 if open => RunScore::OPEN_THREE_SHORT,
        3 => RunScore::CLOSED_THREE_SHORT,
        _ => RunScore::DISTANT * len as i32 * i32::from(open_ends),
    }
}

//! Transposition Table for caching search results
//!
//! Stores negamax scores indexed by Zobrist hash so a position reached
//! through different move orders is searched once.
//!
//! # Example
//!
//! ```
//! use gobang::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 5, 100, EntryType::Exact);
//!
//! assert_eq!(tt.probe(hash, 5, -1000, 1000), Some(100));
//! ```

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth for this entry (`u8::MAX` = searched to the end)
    pub depth: u8,
    /// Negamax score for the side to move
    pub score: i32,
    pub entry_type: EntryType,
}

/// Direct-mapped transposition table.
///
/// Each hash maps to exactly one slot; collisions are resolved with a
/// depth-preferred replacement policy.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Probe the table for a usable score.
    ///
    /// Returns `Some(score)` only when the stored search was at least `depth`
    /// deep and its bound settles the `(alpha, beta)` window.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let idx = (hash as usize) % self.size;
        let entry = self.entries[idx]?;

        if entry.hash != hash || entry.depth < depth {
            return None;
        }

        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Store a position in the table.
    ///
    /// Replaces the slot if it is empty, holds the same position, or holds a
    /// shallower search.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, entry_type: EntryType) {
        let idx = (hash as usize) % self.size;

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact);
        assert_eq!(tt.probe(HASH, 5, -1000, 1000), Some(100));
        assert_eq!(tt.probe(HASH, 3, -1000, 1000), Some(100));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 3, 100, EntryType::Exact);

        // Deeper search must not use a shallow entry
        assert_eq!(tt.probe(HASH, 5, -1000, 1000), None);
    }

    #[test]
    fn test_tt_lower_bound_cutoff() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 200, EntryType::LowerBound);

        assert_eq!(tt.probe(HASH, 5, -1000, 150), Some(200));
        assert_eq!(tt.probe(HASH, 5, -1000, 300), None);
    }

    #[test]
    fn test_tt_upper_bound_cutoff() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 50, EntryType::UpperBound);

        assert_eq!(tt.probe(HASH, 5, 100, 1000), Some(50));
        assert_eq!(tt.probe(HASH, 5, 30, 1000), None);
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1);
        tt.store(HASH, 5, 100, EntryType::Exact);
        assert_eq!(tt.probe(0x9876_5432_1FED_CBA0, 5, -1000, 1000), None);
    }

    #[test]
    fn test_tt_replacement_prefers_depth() {
        let mut tt = TranspositionTable::new(1);
        let other = HASH + tt.size as u64; // same slot, different position

        tt.store(HASH, u8::MAX, 7, EntryType::Exact);
        tt.store(other, 2, 9, EntryType::Exact);
        assert_eq!(tt.probe(HASH, u8::MAX, -1000, 1000), Some(7));
        assert_eq!(tt.probe(other, 2, -1000, 1000), None);

        tt.store(HASH, 1, 3, EntryType::Exact);
        assert_eq!(tt.probe(HASH, 1, -1000, 1000), Some(3));
    }
}

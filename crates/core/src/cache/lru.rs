//! Counter-based Least Recently Used replacement state.
//!
//! Each set keeps one rank per way in `[0, assoc - 1]`, where 0 is the most
//! recently used way and `assoc - 1` the least recently used. Ranks within a
//! set always form a permutation of `[0, assoc - 1]`; the promotion rule
//! preserves this after every access, so victim selection never ties.
//!
//! Invalid ways receive the highest ranks at initialization and lose every
//! subsequent promotion, so a cold set evicts its invalid ways first without
//! any special-case scan.
//!
//! # Performance
//!
//! - `promote()`: O(W) where W is the associativity.
//! - `victim()`: O(W).
//! - Space: O(S × W) ranks for S sets.

/// Per-set LRU ranks for every way in the cache, stored flat.
#[derive(Clone, Debug)]
pub struct RankLru {
    assoc: usize,
    /// Rank of way `w` in set `s` at `s * assoc + w`.
    ranks: Vec<u32>,
}

impl RankLru {
    /// Creates rank state for `sets` sets of `assoc` ways each.
    ///
    /// Way `w` starts at rank `w`: way 0 is MRU, way `assoc - 1` is LRU.
    pub fn new(sets: usize, assoc: usize) -> Self {
        let mut ranks = Vec::with_capacity(sets * assoc);
        for _ in 0..sets {
            ranks.extend(0..assoc as u32);
        }
        Self { assoc, ranks }
    }

    /// Marks `way` most recently used.
    ///
    /// Sets its rank to 0 and increments every rank that was strictly below
    /// its old rank; ranks at or above the old rank are untouched. This is
    /// the partial-increment update that keeps ranks a permutation.
    pub fn promote(&mut self, set: usize, way: usize) {
        let base = set * self.assoc;
        let old = self.ranks[base + way];
        for w in 0..self.assoc {
            if w == way {
                self.ranks[base + w] = 0;
            } else if self.ranks[base + w] < old {
                self.ranks[base + w] += 1;
            }
        }
    }

    /// Selects the victim way for `set`: the way with the maximum rank.
    ///
    /// Ties are impossible while the permutation invariant holds.
    pub fn victim(&self, set: usize) -> usize {
        let base = set * self.assoc;
        let mut victim = 0;
        let mut max = self.ranks[base];
        for w in 1..self.assoc {
            if self.ranks[base + w] > max {
                max = self.ranks[base + w];
                victim = w;
            }
        }
        victim
    }

    /// Returns the ranks of every way in `set`, indexed by way.
    pub fn ranks(&self, set: usize) -> &[u32] {
        let base = set * self.assoc;
        &self.ranks[base..base + self.assoc]
    }
}

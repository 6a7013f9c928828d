//! Cache Level Tests.
//!
//! Organizes the unit tests for the set-associative cache level: the
//! hit/miss core, LRU rank maintenance, write-back behavior, and the
//! stream-buffer prefetch engine.


/// LRU rank permutation invariant and victim selection.
pub mod lru;



use cachesim_core::LevelConfig;

/// Builds a level configuration for tests.
pub fn level(blocksize: u32, size: u32, assoc: u32, pref_n: u32, pref_m: u32) -> LevelConfig {
    LevelConfig {
        blocksize,
        size,
        assoc,
        pref_n,
        pref_m,
    }
}

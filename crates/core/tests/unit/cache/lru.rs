//! LRU Rank Tests.
//!
//! Verifies the counter-based LRU scheme: rank permutation maintenance,
//! deterministic victim selection, and promotion behavior.

use proptest::prelude::*;

use cachesim_core::cache::lru::RankLru;

// ──────────────────────────────────────────────────────────
// Deterministic behavior
// ──────────────────────────────────────────────────────────

/// At initialization way `w` holds rank `w`, so the cold victim is the
/// highest way index.
#[test]
fn cold_victim_is_last_way() {
    let lru = RankLru::new(4, 8);
    for set in 0..4 {
        assert_eq!(lru.victim(set), 7);
        assert_eq!(lru.ranks(set), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }
}

/// Promotion zeroes the touched way and shifts only the strictly-younger
/// ranks up by one.
#[test]
fn promote_partial_increment() {
    let mut lru = RankLru::new(1, 4);
    // Ranks: [0, 1, 2, 3]. Promote way 2 (old rank 2).
    lru.promote(0, 2);
    // Ways 0 and 1 (ranks 0, 1 < 2) increment; way 3 (rank 3) is untouched.
    assert_eq!(lru.ranks(0), &[1, 2, 0, 3]);
    assert_eq!(lru.victim(0), 3);
}

/// Promoting the MRU way is a no-op on every other rank.
#[test]
fn promote_mru_is_stable() {
    let mut lru = RankLru::new(1, 4);
    lru.promote(0, 2);
    let before = lru.ranks(0).to_vec();
    lru.promote(0, 2);
    assert_eq!(lru.ranks(0), &before[..]);
}

/// Sets are independent: promoting in one set never disturbs another.
#[test]
fn sets_are_independent() {
    let mut lru = RankLru::new(2, 4);
    lru.promote(0, 3);
    assert_eq!(lru.ranks(1), &[0, 1, 2, 3]);
}

/// Direct-mapped degenerates to a single way that is always the victim.
#[test]
fn direct_mapped_single_way() {
    let mut lru = RankLru::new(2, 1);
    assert_eq!(lru.victim(0), 0);
    lru.promote(0, 0);
    assert_eq!(lru.victim(0), 0);
}

// ──────────────────────────────────────────────────────────
// Permutation invariant
// ──────────────────────────────────────────────────────────

/// Returns true if `ranks` is a permutation of `0..len`.
fn is_permutation(ranks: &[u32]) -> bool {
    let mut seen = vec![false; ranks.len()];
    for &r in ranks {
        let Some(slot) = seen.get_mut(r as usize) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}

proptest! {
    /// After any sequence of promotions, every set's ranks remain a
    /// permutation of [0, assoc - 1] — checked after every step, not just
    /// at the end.
    #[test]
    fn ranks_stay_a_permutation(
        assoc in 1usize..=8,
        touches in prop::collection::vec((0usize..4, 0usize..8), 1..200),
    ) {
        let mut lru = RankLru::new(4, assoc);
        for (set, way) in touches {
            lru.promote(set, way % assoc);
            for s in 0..4 {
                prop_assert!(is_permutation(lru.ranks(s)));
            }
        }
    }

    /// The promoted way always ends at rank 0, and the victim is always the
    /// unique way at the maximum rank.
    #[test]
    fn promoted_way_is_mru(
        assoc in 1usize..=8,
        touches in prop::collection::vec(0usize..8, 1..100),
    ) {
        let mut lru = RankLru::new(1, assoc);
        for way in touches {
            let way = way % assoc;
            lru.promote(0, way);
            prop_assert_eq!(lru.ranks(0)[way], 0);
            let victim = lru.victim(0);
            prop_assert_eq!(lru.ranks(0)[victim], assoc as u32 - 1);
        }
    }
}

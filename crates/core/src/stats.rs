//! Per-level statistics collection and reporting.
//!
//! This module tracks the hit/miss behavior of each cache level. It provides:
//! 1. **Counters:** Reads, writes, misses, write-backs, prefetches, and
//!    demand requests forwarded to the lower level.
//! 2. **Derived metrics:** Miss rates guarded against empty traces.
//! 3. **Report:** The measurement summary (items a. through q.) including
//!    aggregate memory traffic at the bottom of the hierarchy.

use std::fmt::Write;

use crate::cache::CacheLevel;

/// Counters for one cache level, mutated only by `access`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// Demand read accesses received.
    pub reads: u64,
    /// Demand write accesses received.
    pub writes: u64,
    /// Read misses not served by a stream buffer.
    pub read_misses: u64,
    /// Write misses not served by a stream buffer.
    pub write_misses: u64,
    /// Dirty victims evicted (written back whether or not a lower level exists).
    pub write_backs: u64,
    /// Blocks fetched into stream buffers.
    pub prefetches: u64,
    /// Demand reads forwarded to the lower level on misses.
    pub demand_reads: u64,
}

impl LevelStats {
    /// Total misses charged to this level.
    pub fn total_misses(&self) -> u64 {
        self.read_misses + self.write_misses
    }

    /// Misses divided by accesses, or 0.0 for an empty trace.
    pub fn miss_rate(&self) -> f64 {
        let accesses = self.reads + self.writes;
        if accesses == 0 {
            0.0
        } else {
            self.total_misses() as f64 / accesses as f64
        }
    }

    /// This level's contribution to traffic below it: misses plus
    /// write-backs plus prefetched blocks.
    pub fn outbound_traffic(&self) -> u64 {
        self.total_misses() + self.write_backs + self.prefetches
    }
}

/// Writes the measurement summary for an L1 with an optional L2.
///
/// Mirrors the reference report: items a.-g. cover L1, h.-p. cover L2
/// (zeros when absent), and q. is the aggregate traffic leaving the lowest
/// level for memory. The L2 demand-read figures come from L1's forwarded
/// demand counter; the L2 miss rate is demand read misses over demand reads.
///
/// # Errors
///
/// Propagates formatting failures from `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    l1: &CacheLevel,
    l2: Option<&CacheLevel>,
) -> std::fmt::Result {
    let s1 = l1.stats();
    let s2 = l2.map(CacheLevel::stats).copied().unwrap_or_default();

    writeln!(out, "\n===== Measurements =====")?;
    writeln!(out, "a. L1 reads:                   {}", s1.reads)?;
    writeln!(out, "b. L1 read misses:             {}", s1.read_misses)?;
    writeln!(out, "c. L1 writes:                  {}", s1.writes)?;
    writeln!(out, "d. L1 write misses:            {}", s1.write_misses)?;
    writeln!(out, "e. L1 miss rate:               {:.4}", s1.miss_rate())?;
    writeln!(out, "f. L1 writebacks:              {}", s1.write_backs)?;
    writeln!(out, "g. L1 prefetches:              {}", s1.prefetches)?;

    let l2_demand_miss_rate = if s1.demand_reads == 0 {
        0.0
    } else {
        s2.read_misses as f64 / s1.demand_reads as f64
    };
    writeln!(out, "h. L2 reads (demand):          {}", s1.demand_reads)?;
    writeln!(out, "i. L2 read misses (demand):    {}", s2.read_misses)?;
    writeln!(out, "j. L2 reads (prefetch):        0")?;
    writeln!(out, "k. L2 read misses (prefetch):  0")?;
    writeln!(out, "l. L2 writes:                  {}", s2.writes)?;
    writeln!(out, "m. L2 write misses:            {}", s2.write_misses)?;
    writeln!(out, "n. L2 miss rate:               {l2_demand_miss_rate:.4}")?;
    writeln!(out, "o. L2 writebacks:              {}", s2.write_backs)?;
    writeln!(out, "p. L2 prefetches:              {}", s2.prefetches)?;

    let memory_traffic = if l2.is_some() {
        s2.outbound_traffic()
    } else {
        s1.outbound_traffic()
    };
    writeln!(out, "q. memory traffic:             {memory_traffic}")?;
    Ok(())
}

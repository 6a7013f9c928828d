//! Set-associative cache level.
//!
//! This module implements one level of the memory hierarchy: a
//! set-associative array of ways with write-back, write-allocate semantics,
//! counter-based LRU replacement, and optional stream-buffer prefetching.
//! A hierarchy is built by chaining levels bottom-up; each level owns the
//! level below it and forwards demand misses, write-backs, and prefetch
//! reads downward through the same `access` entry point.

/// Counter-based LRU replacement state.
pub mod lru;

/// Stream-buffer prefetch engine.
pub mod stream;

use tracing::{debug, trace};

use self::lru::RankLru;
use self::stream::StreamBufferSet;
use crate::common::addr::Geometry;
use crate::common::data::AccessKind;
use crate::common::error::ConfigError;
use crate::config::LevelConfig;
use crate::stats::LevelStats;

/// One way within a set: a cache line's metadata.
#[derive(Clone, Copy, Debug, Default)]
struct Way {
    valid: bool,
    dirty: bool,
    tag: u32,
}

/// A single cache level in the hierarchy.
///
/// Exposes one operation, [`CacheLevel::access`], which fully resolves a
/// read or write — including any recursive traffic to the lower level —
/// before returning hit or miss. All counters are mutated only by `access`.
#[derive(Debug)]
pub struct CacheLevel {
    geom: Geometry,
    assoc: usize,
    /// Ways stored flat: way `w` of set `s` at `s * assoc + w`.
    ways: Vec<Way>,
    lru: RankLru,
    streams: Option<StreamBufferSet>,
    lower: Option<Box<CacheLevel>>,
    stats: LevelStats,
}

impl CacheLevel {
    /// Builds a cache level, taking ownership of the level below it.
    ///
    /// Levels are constructed bottom-up: build the last level first with
    /// `lower = None`, then hand it to the level above.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the parameters violate the construction
    /// contract (zero fields, non-power-of-two geometry, size not a multiple
    /// of `blocksize * assoc`).
    pub fn new(config: &LevelConfig, lower: Option<Box<CacheLevel>>) -> Result<Self, ConfigError> {
        let geom = config.geometry()?;
        let sets = geom.num_sets as usize;
        let assoc = config.assoc as usize;
        let streams = if config.pref_n > 0 {
            Some(StreamBufferSet::new(
                config.pref_n as usize,
                config.pref_m as usize,
            ))
        } else {
            None
        };
        Ok(Self {
            geom,
            assoc,
            ways: vec![Way::default(); sets * assoc],
            lru: RankLru::new(sets, assoc),
            streams,
            lower,
            stats: LevelStats::default(),
        })
    }

    /// Performs one read or write access; returns `true` on a hit.
    ///
    /// The four stream-buffer scenarios interact with the cache lookup as
    /// follows:
    /// 1. Miss in both: demand-read from the lower level (counted as a miss
    ///    and a forwarded demand) and spawn a new stream.
    /// 2. Cache miss, stream hit: the block arrives from the buffer — no
    ///    miss count, no forwarded demand — and the buffer refills in
    ///    continuation mode.
    /// 3. Cache hit, stream miss: plain hit.
    /// 4. Hit in both: plain hit, plus a continuation refill to keep the
    ///    buffer in step with the access stream.
    ///
    /// A dirty victim is written back to the lower level before the new
    /// line is installed; installs are write-allocate, so a write miss
    /// installs the line dirty.
    pub fn access(&mut self, addr: u32, kind: AccessKind) -> bool {
        let (tag, index) = self.geom.decompose(addr);
        match kind {
            AccessKind::Read => self.stats.reads += 1,
            AccessKind::Write => self.stats.writes += 1,
        }

        let block = self.geom.block_addr(addr);
        let stream_hit = self.streams.as_mut().and_then(|s| s.probe(block));

        let set = index as usize;
        let base = set * self.assoc;
        for w in 0..self.assoc {
            let way = &mut self.ways[base + w];
            if way.valid && way.tag == tag {
                if kind.is_write() {
                    way.dirty = true;
                }
                self.lru.promote(set, w);
                if let Some(pos) = stream_hit {
                    // Scenario 4: keep the buffer in step with the stream.
                    let fetched = match self.streams.as_mut() {
                        Some(s) => s.fill_continuation(pos, block),
                        None => Vec::new(),
                    };
                    self.issue_prefetches(fetched);
                }
                trace!(addr = %format_args!("{addr:#x}"), ?kind, "hit");
                return true;
            }
        }

        let victim = self.lru.victim(set);
        let vi = base + victim;
        if self.ways[vi].valid && self.ways[vi].dirty {
            let wb_addr = self.geom.reconstruct(self.ways[vi].tag, index);
            debug!(
                addr = %format_args!("{wb_addr:#x}"),
                set, victim, "write-back of dirty victim"
            );
            if let Some(lower) = self.lower.as_mut() {
                let _ = lower.access(wb_addr, AccessKind::Write);
            }
            self.stats.write_backs += 1;
            self.ways[vi].dirty = false;
        }

        if let Some(pos) = stream_hit {
            // Scenario 2: the buffer sources the block; no demand miss.
            let fetched = match self.streams.as_mut() {
                Some(s) => s.fill_continuation(pos, block),
                None => Vec::new(),
            };
            self.issue_prefetches(fetched);
        } else {
            // Scenario 1: demand-read from below and spawn a new stream.
            if let Some(lower) = self.lower.as_mut() {
                let _ = lower.access(addr, AccessKind::Read);
                self.stats.demand_reads += 1;
            }
            if let Some(streams) = self.streams.as_mut() {
                debug!(block = %format_args!("{block:#x}"), "spawning stream");
                let fetched = streams.spawn(block);
                self.issue_prefetches(fetched);
            }
            match kind {
                AccessKind::Read => self.stats.read_misses += 1,
                AccessKind::Write => self.stats.write_misses += 1,
            }
        }

        let way = &mut self.ways[vi];
        way.valid = true;
        way.tag = tag;
        way.dirty = kind.is_write();
        self.lru.promote(set, victim);
        trace!(addr = %format_args!("{addr:#x}"), ?kind, "miss");
        false
    }

    /// Counts `fetched` blocks as prefetches and reads them from below.
    ///
    /// Prefetches are counted even on the lowest level, where there is no
    /// lower level to read from.
    fn issue_prefetches(&mut self, fetched: Vec<u32>) {
        self.stats.prefetches += fetched.len() as u64;
        if let Some(lower) = self.lower.as_mut() {
            for block in fetched {
                let _ = lower.access(self.geom.block_to_addr(block), AccessKind::Read);
            }
        }
    }

    /// Read-only access to this level's counters.
    pub fn stats(&self) -> &LevelStats {
        &self.stats
    }

    /// The level below this one, if any.
    pub fn lower_level(&self) -> Option<&CacheLevel> {
        self.lower.as_deref()
    }

    /// This level's address geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geom
    }

    /// Writes the valid lines of every set, MRU-first, as the reference
    /// contents dump: one row per set, each line as `tag` plus a `D` dirty
    /// marker.
    ///
    /// # Errors
    ///
    /// Propagates formatting failures from `out`.
    pub fn write_contents<W: std::fmt::Write>(
        &self,
        out: &mut W,
        label: &str,
    ) -> std::fmt::Result {
        writeln!(out, "\n===== {label} contents =====")?;
        for set in 0..self.geom.num_sets as usize {
            let base = set * self.assoc;
            let ranks = self.lru.ranks(set);
            let mut rows: Vec<(u32, usize)> = (0..self.assoc)
                .filter(|&w| self.ways[base + w].valid)
                .map(|w| (ranks[w], w))
                .collect();
            rows.sort_unstable();

            write!(out, "set {set:>6}:    ")?;
            for (_, w) in rows {
                let way = &self.ways[base + w];
                write!(out, "{:x} {}   ", way.tag, if way.dirty { 'D' } else { ' ' })?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Writes the valid stream buffers, MRU-first, each as its run of block
    /// addresses from the head.
    ///
    /// Writes nothing when this level has no stream buffers.
    ///
    /// # Errors
    ///
    /// Propagates formatting failures from `out`.
    pub fn write_stream_buffers<W: std::fmt::Write>(&self, out: &mut W) -> std::fmt::Result {
        let Some(streams) = &self.streams else {
            return Ok(());
        };
        writeln!(out, "\n===== Stream Buffer(s) contents =====")?;
        for run in streams.contents() {
            for block in run {
                write!(out, " {block:x} ")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

//! Replay driver: owns the hierarchy and feeds it a trace.
//!
//! The driver builds the levels bottom-up from a [`HierarchyConfig`], then
//! replays records in the exact order received. Every access mutates LRU and
//! stream-buffer state read by subsequent accesses, so reordering is never
//! permitted.

use std::io::BufRead;

use tracing::info;

use crate::cache::CacheLevel;
use crate::common::data::AccessKind;
use crate::common::error::{ConfigError, TraceError};
use crate::config::HierarchyConfig;
use crate::sim::trace::TraceReader;

/// Top-level simulator: the L1 cache, which owns the rest of the chain.
#[derive(Debug)]
pub struct Simulator {
    l1: CacheLevel,
}

impl Simulator {
    /// Builds the hierarchy described by `config`, lowest level first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any level's parameters are invalid.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        let lower = match &config.l2 {
            Some(l2) => Some(Box::new(CacheLevel::new(l2, None)?)),
            None => None,
        };
        Ok(Self {
            l1: CacheLevel::new(&config.l1, lower)?,
        })
    }

    /// Feeds one access to the top of the hierarchy; returns `true` on hit.
    pub fn access(&mut self, addr: u32, kind: AccessKind) -> bool {
        self.l1.access(addr, kind)
    }

    /// Replays an entire trace in order; returns the number of accesses.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError`] on the first malformed record or read failure;
    /// accesses before the failure have already been applied.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> Result<u64, TraceError> {
        let mut count = 0u64;
        for record in TraceReader::new(reader) {
            let record = record?;
            let _ = self.l1.access(record.addr, record.kind);
            count += 1;
        }
        info!(accesses = count, "trace replay complete");
        Ok(count)
    }

    /// The first-level cache.
    pub fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// The second-level cache, if configured.
    pub fn l2(&self) -> Option<&CacheLevel> {
        self.l1.lower_level()
    }
}

//! Trace-driven cache hierarchy simulator library.
//!
//! This crate implements a functional (hit/miss) simulation of a memory
//! hierarchy built from set-associative cache levels. It provides:
//! 1. **Cache model:** Set-associative levels with write-back, write-allocate,
//!    and counter-based LRU replacement.
//! 2. **Prefetching:** Stream buffers holding runs of sequential block
//!    addresses, recycled in MRU order.
//! 3. **Hierarchy:** Levels chained bottom-up; misses, write-backs, and
//!    prefetch traffic propagate to the next lower level.
//! 4. **Simulation:** Trace parsing, replay driver, configuration, and
//!    per-level statistics collection and reporting.

/// Cache level model (sets, ways, LRU ranks, stream buffers).
pub mod cache;
/// Common types (address geometry, access kinds, error taxonomy).
pub mod common;
/// Simulator configuration (defaults, per-level and hierarchy structures).
pub mod config;
/// Simulation driver (trace parsing and replay).
pub mod sim;
/// Per-level statistics collection and reporting.
pub mod stats;

/// A single cache level; chain levels bottom-up via [`CacheLevel::new`].
pub use crate::cache::CacheLevel;
/// Hierarchy configuration; deserialize from JSON or build from CLI parameters.
pub use crate::config::{HierarchyConfig, LevelConfig};
/// Replay driver; owns the hierarchy and feeds it a trace.
pub use crate::sim::Simulator;

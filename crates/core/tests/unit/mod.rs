//! # Unit Components
//!
//! This module is the hub for the simulator's unit tests. It organizes the
//! building blocks under test: address geometry, the cache level and its
//! replacement/prefetch machinery, hierarchy propagation, trace parsing,
//! and statistics.

/// Unit tests for address geometry (decomposition and reconstruction).
pub mod addr;

/// Unit tests for the cache level: hit/miss core, LRU, stream buffers,
/// and write-back behavior.
pub mod cache;

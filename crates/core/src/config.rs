//! Configuration for the cache hierarchy simulator.
//!
//! This module defines the structures used to parameterize a hierarchy. It
//! provides:
//! 1. **Defaults:** Baseline geometry constants used when a field is absent.
//! 2. **Structures:** Per-level parameters and the two-level hierarchy shape.
//! 3. **Validation:** The construction-time contract checks of the model.
//!
//! Configuration is supplied as JSON (`serde_json`) or built directly from
//! CLI parameters; use `HierarchyConfig::default()` for a plain L1.

use serde::Deserialize;

use crate::common::addr::Geometry;
use crate::common::error::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline cache geometry when not explicitly
/// overridden in a JSON configuration.
mod defaults {
    /// Default block (line) size in bytes.
    pub const BLOCKSIZE: u32 = 32;

    /// Default total capacity in bytes (8 KiB).
    pub const SIZE: u32 = 8192;

    /// Default associativity (4 ways per set).
    pub const ASSOC: u32 = 4;
}

/// Parameters for a single cache level.
///
/// Fixed at construction and invariant thereafter. Stream buffers are
/// disabled when `pref_n` is zero; `pref_m` is only meaningful when stream
/// buffers are enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// Block (line) size in bytes. Must be a power of two.
    #[serde(default = "LevelConfig::default_blocksize")]
    pub blocksize: u32,

    /// Total capacity in bytes. Must be a multiple of `blocksize * assoc`.
    #[serde(default = "LevelConfig::default_size")]
    pub size: u32,

    /// Associativity (ways per set).
    #[serde(default = "LevelConfig::default_assoc")]
    pub assoc: u32,

    /// Number of stream buffers (0 disables prefetching).
    #[serde(default)]
    pub pref_n: u32,

    /// Blocks held per stream buffer.
    #[serde(default)]
    pub pref_m: u32,
}

impl LevelConfig {
    /// Returns the default block size in bytes.
    fn default_blocksize() -> u32 {
        defaults::BLOCKSIZE
    }

    /// Returns the default total capacity in bytes.
    fn default_size() -> u32 {
        defaults::SIZE
    }

    /// Returns the default associativity.
    fn default_assoc() -> u32 {
        defaults::ASSOC
    }

    /// Derives and validates the address geometry for this level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the parameters violate the construction
    /// contract (see [`Geometry::new`]).
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.blocksize, self.size, self.assoc)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            blocksize: defaults::BLOCKSIZE,
            size: defaults::SIZE,
            assoc: defaults::ASSOC,
            pref_n: 0,
            pref_m: 0,
        }
    }
}

/// Shape of the whole hierarchy: an L1 and an optional L2 below it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchyConfig {
    /// First-level cache parameters.
    #[serde(default)]
    pub l1: LevelConfig,

    /// Second-level cache parameters, or `None` for a single-level hierarchy.
    #[serde(default)]
    pub l2: Option<LevelConfig>,
}

impl HierarchyConfig {
    /// Validates every level's parameters without constructing the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, L1 first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.l1.geometry()?;
        if let Some(l2) = &self.l2 {
            let _ = l2.geometry()?;
        }
        Ok(())
    }
}

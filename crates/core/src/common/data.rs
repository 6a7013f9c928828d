//! Memory access kind definitions.
//!
//! Classifies every operation fed to a cache level as a read or a write.
//! Demand traffic from the trace, write-backs from upper levels, and
//! prefetch reads all use the same classification.

use serde::Deserialize;

/// The kind of memory access being performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// A read (load) access.
    Read,
    /// A write (store) access.
    Write,
}

impl AccessKind {
    /// Returns `true` if this is a write access.
    #[inline]
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

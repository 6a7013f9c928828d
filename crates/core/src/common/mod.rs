//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by every cache level:
//! 1. **Address Geometry:** Tag/index/offset decomposition of 32-bit addresses.
//! 2. **Access Kinds:** Read/write classification of memory operations.
//! 3. **Error Handling:** Construction-time and trace-parsing error types.

/// Address geometry (tag/index/offset decomposition).
pub mod addr;

/// Memory access kind definitions.
pub mod data;

/// Error types for configuration and trace parsing.
pub mod error;

pub use addr::Geometry;
pub use data::AccessKind;
pub use error::{ConfigError, TraceError};

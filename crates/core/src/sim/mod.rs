//! Simulation driver: trace parsing and replay.
//!
//! The trace is the simulator's only input after construction: a sequence of
//! read/write records replayed in strict order against the hierarchy.

/// Replay driver owning the hierarchy.
pub mod simulator;

/// Address trace parsing.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceReader, TraceRecord};

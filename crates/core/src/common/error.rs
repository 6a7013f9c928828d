//! Error types for the simulator.
//!
//! There are no recoverable runtime failures inside the model: every
//! `access` call deterministically returns hit or miss. The taxonomy covers:
//! 1. **Configuration:** Contract violations caught at construction time.
//! 2. **Trace parsing:** Malformed records and I/O failures while reading
//!    an address trace.

use thiserror::Error;

/// A construction-time configuration contract violation.
///
/// Each variant is fatal: a level built from such parameters would decompose
/// addresses incorrectly, so construction refuses rather than proceeding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter that must be non-zero was zero.
    #[error("{name} must be non-zero")]
    ZeroParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// A parameter that feeds a log2 derivation was not a power of two.
    #[error("{name} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// Total size is not an exact multiple of `blocksize * assoc`.
    #[error("size {size} is not a multiple of blocksize {blocksize} x assoc {assoc}")]
    SizeNotMultiple {
        /// Total capacity in bytes.
        size: u32,
        /// Block size in bytes.
        blocksize: u32,
        /// Associativity.
        assoc: u32,
    },

    /// The index and offset fields leave no tag bits in a 32-bit address.
    #[error("offset ({offset_bits}) + index ({index_bits}) bits exhaust the 32-bit address space")]
    ExceedsAddressSpace {
        /// Offset field width in bits.
        offset_bits: u32,
        /// Index field width in bits.
        index_bits: u32,
    },
}

/// A failure while reading or parsing an address trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The operation tag was neither `r` nor `w`.
    #[error("line {line}: unknown operation {token:?} (expected 'r' or 'w')")]
    BadOperation {
        /// 1-based line number in the trace.
        line: u64,
        /// The offending token.
        token: String,
    },

    /// The address field was missing or not valid hexadecimal.
    #[error("line {line}: bad address {token:?}")]
    BadAddress {
        /// 1-based line number in the trace.
        line: u64,
        /// The offending token.
        token: String,
    },
}

//! Address Geometry Tests.
//!
//! Verifies tag/index/offset field derivation and the decomposition and
//! reconstruction arithmetic that demand lookups, write-backs, and prefetch
//! targets all share.

use cachesim_core::common::addr::Geometry;
use cachesim_core::common::error::ConfigError;

// ──────────────────────────────────────────────────────────
// Field widths
// ──────────────────────────────────────────────────────────

/// 16-byte blocks, 64 bytes total, direct-mapped: 4 sets, 4 offset bits,
/// 2 index bits, 26 tag bits.
#[test]
fn direct_mapped_field_widths() {
    let geom = Geometry::new(16, 64, 1).unwrap();
    assert_eq!(geom.num_sets, 4);
    assert_eq!(geom.offset_bits, 4);
    assert_eq!(geom.index_bits, 2);
    assert_eq!(geom.tag_bits, 26);
}

/// 32-byte blocks, 8 KiB, 4-way: 64 sets, 5 offset bits, 6 index bits.
#[test]
fn set_associative_field_widths() {
    let geom = Geometry::new(32, 8192, 4).unwrap();
    assert_eq!(geom.num_sets, 64);
    assert_eq!(geom.offset_bits, 5);
    assert_eq!(geom.index_bits, 6);
    assert_eq!(geom.tag_bits, 21);
}

/// A single-set (fully associative) cache has zero index bits; the tag is
/// everything above the offset.
#[test]
fn single_set_has_no_index_bits() {
    let geom = Geometry::new(16, 32, 2).unwrap();
    assert_eq!(geom.num_sets, 1);
    assert_eq!(geom.index_bits, 0);
    let (tag, index) = geom.decompose(0x1234_5678);
    assert_eq!(index, 0);
    assert_eq!(tag, 0x1234_5678 >> 4);
}

// ──────────────────────────────────────────────────────────
// Decompose / reconstruct
// ──────────────────────────────────────────────────────────

/// Decomposition extracts the documented fields.
#[test]
fn decompose_extracts_fields() {
    let geom = Geometry::new(16, 64, 1).unwrap();
    // 0x1234_5678: offset = 0x8, index = (0x...567 & 3) = 3, tag = rest.
    let (tag, index) = geom.decompose(0x1234_5678);
    assert_eq!(index, (0x1234_5678 >> 4) & 0x3);
    assert_eq!(tag, 0x1234_5678 >> 6);
}

/// Reconstructing from a decomposed address yields the block-aligned
/// address: the offset field is forced to zero.
#[test]
fn reconstruct_is_block_aligned_inverse() {
    let geom = Geometry::new(32, 8192, 4).unwrap();
    let addr = 0xDEAD_BEEF;
    let (tag, index) = geom.decompose(addr);
    assert_eq!(geom.reconstruct(tag, index), addr & !0x1F);
}

/// Block-address conversion is a shift by the offset width, both ways.
#[test]
fn block_address_round_trip() {
    let geom = Geometry::new(16, 64, 1).unwrap();
    assert_eq!(geom.block_addr(0x123F), 0x123);
    assert_eq!(geom.block_to_addr(0x123), 0x1230);
}

// ──────────────────────────────────────────────────────────
// Construction contract
// ──────────────────────────────────────────────────────────

/// Zero parameters are rejected by name.
#[test]
fn zero_parameters_rejected() {
    assert_eq!(
        Geometry::new(0, 64, 1),
        Err(ConfigError::ZeroParameter { name: "blocksize" })
    );
    assert_eq!(
        Geometry::new(16, 0, 1),
        Err(ConfigError::ZeroParameter { name: "size" })
    );
    assert_eq!(
        Geometry::new(16, 64, 0),
        Err(ConfigError::ZeroParameter { name: "assoc" })
    );
}

/// A non-power-of-two block size cannot feed the log2 derivation.
#[test]
fn non_power_of_two_blocksize_rejected() {
    assert_eq!(
        Geometry::new(24, 96, 1),
        Err(ConfigError::NotPowerOfTwo {
            name: "blocksize",
            value: 24
        })
    );
}

/// Size must divide evenly into ways of blocks.
#[test]
fn size_not_multiple_rejected() {
    assert_eq!(
        Geometry::new(16, 100, 2),
        Err(ConfigError::SizeNotMultiple {
            size: 100,
            blocksize: 16,
            assoc: 2
        })
    );
}

/// A size that divides evenly but yields a non-power-of-two set count is
/// still invalid (3 sets here).
#[test]
fn non_power_of_two_set_count_rejected() {
    assert_eq!(
        Geometry::new(16, 96, 2),
        Err(ConfigError::NotPowerOfTwo {
            name: "num_sets",
            value: 3
        })
    );
}

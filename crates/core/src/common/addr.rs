//! Address geometry for set-associative cache levels.
//!
//! Every level decomposes a 32-bit address into tag, set index, and block
//! offset fields. The field widths are fixed at construction from the block
//! size, total capacity, and associativity. The same decomposition serves
//! three purposes and must stay identical across them:
//! 1. **Demand lookups:** Locating the target set and matching tags.
//! 2. **Write-backs:** Reconstructing a victim's address from its tag and
//!    set index (offset forced to zero — block granularity).
//! 3. **Prefetching:** Converting between full addresses and block addresses.

use crate::common::error::ConfigError;

/// Width of the simulated address space in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Fixed per-level address field widths, computed once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Block (line) size in bytes. Power of two.
    pub blocksize: u32,
    /// Number of sets. Power of two.
    pub num_sets: u32,
    /// Bits used for the byte offset within a block.
    pub offset_bits: u32,
    /// Bits used for the set index.
    pub index_bits: u32,
    /// Bits remaining for the tag.
    pub tag_bits: u32,
}

impl Geometry {
    /// Derives the address geometry for a level.
    ///
    /// # Arguments
    ///
    /// * `blocksize` - Block size in bytes.
    /// * `size` - Total capacity in bytes.
    /// * `assoc` - Associativity (ways per set).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is zero, `size` is not an
    /// exact multiple of `blocksize * assoc`, `blocksize` or the derived set
    /// count is not a power of two, or the index and offset fields together
    /// exhaust the 32-bit address space.
    pub fn new(blocksize: u32, size: u32, assoc: u32) -> Result<Self, ConfigError> {
        if blocksize == 0 {
            return Err(ConfigError::ZeroParameter { name: "blocksize" });
        }
        if size == 0 {
            return Err(ConfigError::ZeroParameter { name: "size" });
        }
        if assoc == 0 {
            return Err(ConfigError::ZeroParameter { name: "assoc" });
        }
        if !blocksize.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: "blocksize",
                value: blocksize,
            });
        }
        let way_bytes = blocksize
            .checked_mul(assoc)
            .ok_or(ConfigError::SizeNotMultiple {
                size,
                blocksize,
                assoc,
            })?;
        if size % way_bytes != 0 {
            return Err(ConfigError::SizeNotMultiple {
                size,
                blocksize,
                assoc,
            });
        }
        let num_sets = size / way_bytes;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: "num_sets",
                value: num_sets,
            });
        }

        let offset_bits = blocksize.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits >= ADDRESS_BITS {
            return Err(ConfigError::ExceedsAddressSpace {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            blocksize,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_BITS - index_bits - offset_bits,
        })
    }

    /// Splits an address into `(tag, set_index)`.
    #[inline]
    pub fn decompose(&self, addr: u32) -> (u32, u32) {
        let index = (addr >> self.offset_bits) & (self.num_sets - 1);
        let tag = addr >> (self.offset_bits + self.index_bits);
        (tag, index)
    }

    /// Rebuilds a block-aligned address from a tag and set index.
    ///
    /// The offset field is zero: write-backs operate at block granularity.
    #[inline]
    pub fn reconstruct(&self, tag: u32, index: u32) -> u32 {
        (tag << (self.offset_bits + self.index_bits)) | (index << self.offset_bits)
    }

    /// Converts a full address to a block address.
    #[inline]
    pub fn block_addr(&self, addr: u32) -> u32 {
        addr >> self.offset_bits
    }

    /// Converts a block address back to a block-aligned full address.
    #[inline]
    pub fn block_to_addr(&self, block: u32) -> u32 {
        block << self.offset_bits
    }
}

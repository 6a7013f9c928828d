//! Stream-buffer prefetch engine.
//!
//! A stream buffer holds a run of consecutive block addresses fetched ahead
//! of demand access. The engine keeps N buffers of M blocks each in an
//! explicit MRU-ordered list of arena handles:
//! 1. **Probe:** Buffers are searched MRU-first for an exact block match;
//!    a hit advances that buffer's head past the matched slot.
//! 2. **Continuation:** After a hit, the buffer is refilled so it again
//!    holds the M blocks following the accessed one, fetching only blocks
//!    not already present.
//! 3. **Spawn:** A demand miss that no buffer covers recycles the buffer at
//!    the MRU-order tail for a brand-new stream, whether or not that buffer
//!    is still mid-stream. This recycle order is observable in the prefetch
//!    statistics and is kept as-is.
//!
//! Fill operations return the newly introduced block addresses; the owning
//! cache level issues the corresponding reads to its lower level and counts
//! them as prefetches.

/// One stream buffer: a circular run of block addresses.
#[derive(Clone, Debug)]
struct StreamBuffer {
    valid: bool,
    /// Slot of the next expected in-sequence block.
    head: usize,
    blocks: Vec<u32>,
}

/// N stream buffers in an MRU-ordered arena.
#[derive(Clone, Debug)]
pub struct StreamBufferSet {
    /// Blocks per buffer (M).
    depth: usize,
    buffers: Vec<StreamBuffer>,
    /// Arena handles in MRU-first order; the tail is recycled for new streams.
    order: Vec<usize>,
}

impl StreamBufferSet {
    /// Creates `count` invalid buffers of `depth` blocks each.
    pub fn new(count: usize, depth: usize) -> Self {
        Self {
            depth,
            buffers: vec![
                StreamBuffer {
                    valid: false,
                    head: 0,
                    blocks: vec![0; depth],
                };
                count
            ],
            order: (0..count).collect(),
        }
    }

    /// Searches every valid buffer, MRU-first, for `block`.
    ///
    /// On a match, advances that buffer's head to one past the matched slot
    /// and returns the buffer's position in MRU order. The order itself is
    /// not changed here; reordering happens on fill.
    pub fn probe(&mut self, block: u32) -> Option<usize> {
        let hit = self.order.iter().enumerate().find_map(|(pos, &id)| {
            let buf = &self.buffers[id];
            if !buf.valid {
                return None;
            }
            buf.blocks.iter().position(|&b| b == block).map(|slot| (pos, id, slot))
        });
        hit.map(|(pos, id, slot)| {
            self.buffers[id].head = (slot + 1) % self.depth;
            pos
        })
    }

    /// Recycles the MRU-order tail buffer for a new stream seeded at `block`.
    ///
    /// All slots are populated with `block + 1 ..= block + M` in order, the
    /// head resets to slot 0, and the buffer moves to the MRU position.
    /// Returns every populated block: a new stream fetches all of them.
    pub fn spawn(&mut self, block: u32) -> Vec<u32> {
        let pos = self.order.len() - 1;
        let id = self.order[pos];
        let buf = &mut self.buffers[id];
        let mut fetched = Vec::with_capacity(self.depth);
        for (i, slot) in buf.blocks.iter_mut().enumerate() {
            *slot = block.wrapping_add(1 + i as u32);
            fetched.push(*slot);
        }
        buf.head = 0;
        buf.valid = true;
        self.touch(pos);
        fetched
    }

    /// Refills the buffer at MRU-order position `pos` to follow `block`.
    ///
    /// Walks the M slots from the head: slot `(head + i) % M` must hold
    /// `block + 1 + i`. Slots already holding the expected block are left
    /// alone; the rest are overwritten and reported as newly fetched, so
    /// repeating a continuation fetches nothing the second time.
    pub fn fill_continuation(&mut self, pos: usize, block: u32) -> Vec<u32> {
        let id = self.order[pos];
        let buf = &mut self.buffers[id];
        let mut fetched = Vec::new();
        for i in 0..self.depth {
            let slot = (buf.head + i) % self.depth;
            let expected = block.wrapping_add(1 + i as u32);
            if buf.blocks[slot] != expected {
                buf.blocks[slot] = expected;
                fetched.push(expected);
            }
        }
        buf.valid = true;
        self.touch(pos);
        fetched
    }

    /// Returns the valid buffers' contents in MRU order, each as the run of
    /// blocks from its head in logical (expected-next-first) order.
    pub fn contents(&self) -> Vec<Vec<u32>> {
        self.order
            .iter()
            .filter_map(|&id| {
                let buf = &self.buffers[id];
                if !buf.valid {
                    return None;
                }
                Some(
                    (0..self.depth)
                        .map(|i| buf.blocks[(buf.head + i) % self.depth])
                        .collect(),
                )
            })
            .collect()
    }

    /// Moves the buffer at MRU-order position `pos` to the front.
    fn touch(&mut self, pos: usize) {
        let id = self.order.remove(pos);
        self.order.insert(0, id);
    }
}

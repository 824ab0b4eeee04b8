// src/pool.rs
//
// Block pools backing a single assembly run. Graph construction probes
// one k-mer per window position across every read, so slots are handed
// out from fixed-size blocks instead of the global allocator. All three
// pools are dropped together when the run's graph is dropped.

use crate::graph::Node;

/// Slot handle for an ingested read. Two reads are distinct iff their
/// handles differ, even when their bytes are identical.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ReadId(u32);

/// Slot handle for an interned k-mer string. One handle per distinct
/// k-mer in the graph, so handle equality doubles as string equality.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct KmerId(u32);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

/// Fixed-width byte slots, `slot_len` bytes each, `per_block` slots per
/// block. Blocks are append-only; a slot's bytes never move once written.
struct BytePool {
    blocks: Vec<Vec<u8>>,
    slot_len: usize,
    per_block: usize,
    len: u32,
}

impl BytePool {
    fn new(slot_len: usize, per_block: usize) -> Self {
        BytePool {
            blocks: Vec::new(),
            slot_len,
            per_block,
            len: 0,
        }
    }

    fn allocate(&mut self, bytes: &[u8]) -> u32 {
        debug_assert_eq!(bytes.len(), self.slot_len);
        let block = self.len as usize / self.per_block;
        if block == self.blocks.len() {
            self.blocks
                .push(Vec::with_capacity(self.per_block * self.slot_len));
        }
        self.blocks[block].extend_from_slice(bytes);
        let id = self.len;
        self.len += 1;
        id
    }

    fn get(&self, id: u32) -> &[u8] {
        let block = id as usize / self.per_block;
        let offset = (id as usize % self.per_block) * self.slot_len;
        &self.blocks[block][offset..offset + self.slot_len]
    }

    /// Rewind the most recent allocation. Only the last handed-out slot
    /// may be rewound; its bytes are discarded and the slot is reissued
    /// by the next `allocate`.
    fn unget(&mut self, id: u32) {
        debug_assert_eq!(id + 1, self.len);
        self.len -= 1;
        let block = self.len as usize / self.per_block;
        let offset = (self.len as usize % self.per_block) * self.slot_len;
        self.blocks[block].truncate(offset);
    }

    fn len(&self) -> usize {
        self.len as usize
    }
}

pub struct ReadPool {
    pool: BytePool,
}

impl ReadPool {
    pub fn new(read_len: usize, per_block: usize) -> Self {
        ReadPool {
            pool: BytePool::new(read_len, per_block),
        }
    }

    pub fn allocate(&mut self, seq: &[u8]) -> ReadId {
        ReadId(self.pool.allocate(seq))
    }

    pub fn get(&self, id: ReadId) -> &[u8] {
        self.pool.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.len() == 0
    }
}

pub struct KmerPool {
    pool: BytePool,
}

impl KmerPool {
    pub fn new(k: usize, per_block: usize) -> Self {
        KmerPool {
            pool: BytePool::new(k, per_block),
        }
    }

    pub fn allocate(&mut self, seq: &[u8]) -> KmerId {
        KmerId(self.pool.allocate(seq))
    }

    pub fn get(&self, id: KmerId) -> &[u8] {
        self.pool.get(id.0)
    }

    /// Rewind a speculative allocation whose k-mer turned out to already
    /// be interned. Must be the most recent allocation.
    pub fn unget(&mut self, id: KmerId) {
        self.pool.unget(id.0);
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.len() == 0
    }
}

pub struct NodePool {
    blocks: Vec<Vec<Node>>,
    per_block: usize,
    len: u32,
}

impl NodePool {
    pub fn new(per_block: usize) -> Self {
        NodePool {
            blocks: Vec::new(),
            per_block,
            len: 0,
        }
    }

    pub fn allocate(&mut self, node: Node) -> NodeId {
        let block = self.len as usize / self.per_block;
        if block == self.blocks.len() {
            self.blocks.push(Vec::with_capacity(self.per_block));
        }
        self.blocks[block].push(node);
        let id = NodeId(self.len);
        self.len += 1;
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        let block = id.0 as usize / self.per_block;
        &self.blocks[block][id.0 as usize % self.per_block]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        let block = id.0 as usize / self.per_block;
        &mut self.blocks[block][id.0 as usize % self.per_block]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[path = "pool_test.rs"]
mod pool_test;

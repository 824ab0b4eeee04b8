// src/graph.rs
//
// De Bruijn graph over interned k-mers. One node per distinct k-mer
// observed in the read set; an edge A -> B records that B followed A at
// adjacent window positions in some read. Nodes, k-mer strings and read
// strings all live in the block pools; the table and adjacency lists
// hold ids only.

use crate::defaults::READ_PROGRESS_INTERVAL;
use crate::pool::{KmerId, KmerPool, NodeId, NodePool, ReadId, ReadPool};
use crate::reads::ReadScanner;
use std::io::{self, Read};

pub struct Node {
    pub kmer: KmerId,
    pub frequency: u32,
    /// First read that created this node. Later observations from a
    /// different read slot flip `has_multiple_unique_reads`; slot
    /// identity is what counts, not read bytes.
    pub contributing_read: ReadId,
    pub has_multiple_unique_reads: bool,
    pub to_nodes: Vec<NodeId>,
    pub from_nodes: Vec<NodeId>,
}

/// djb2 variant over raw k-mer bytes: h = ((h << 5) + h) ^ c, seeded
/// with zero.
pub fn djb2(seq: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &c in seq {
        hash = ((hash << 5).wrapping_add(hash)) ^ c as u64;
    }
    hash
}

const INITIAL_BUCKETS: usize = 1 << 10;

struct Entry {
    kmer: KmerId,
    node: NodeId,
}

/// Hash table keyed by k-mer bytes, separate chaining, power-of-two
/// bucket counts. Keys are interned ids; the pool resolves them to
/// bytes for hashing and equality. Iteration order is a pure function
/// of the insert/remove sequence, which keeps downstream contig output
/// reproducible.
pub struct KmerMap {
    buckets: Vec<Vec<Entry>>,
    len: usize,
}

impl KmerMap {
    fn new() -> Self {
        KmerMap {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    fn bucket(&self, seq: &[u8]) -> usize {
        djb2(seq) as usize & (self.buckets.len() - 1)
    }

    fn get(&self, kmers: &KmerPool, seq: &[u8]) -> Option<NodeId> {
        let bucket = self.bucket(seq);
        self.buckets[bucket]
            .iter()
            .find(|entry| kmers.get(entry.kmer) == seq)
            .map(|entry| entry.node)
    }

    fn insert(&mut self, kmers: &KmerPool, kmer: KmerId, node: NodeId) {
        if self.len >= self.buckets.len() {
            self.grow(kmers);
        }
        let bucket = self.bucket(kmers.get(kmer));
        debug_assert!(self.buckets[bucket]
            .iter()
            .all(|entry| kmers.get(entry.kmer) != kmers.get(kmer)));
        self.buckets[bucket].push(Entry { kmer, node });
        self.len += 1;
    }

    fn remove(&mut self, kmers: &KmerPool, seq: &[u8]) -> Option<NodeId> {
        let bucket = self.bucket(seq);
        let pos = self.buckets[bucket]
            .iter()
            .position(|entry| kmers.get(entry.kmer) == seq)?;
        let entry = self.buckets[bucket].remove(pos);
        self.len -= 1;
        Some(entry.node)
    }

    fn grow(&mut self, kmers: &KmerPool) {
        let new_len = self.buckets.len() * 2;
        let mut buckets: Vec<Vec<Entry>> = (0..new_len).map(|_| Vec::new()).collect();
        for entry in self.buckets.drain(..).flatten() {
            let bucket = djb2(kmers.get(entry.kmer)) as usize & (new_len - 1);
            buckets[bucket].push(entry);
        }
        self.buckets = buckets;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn iter(&self) -> impl Iterator<Item = (KmerId, NodeId)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.kmer, entry.node))
    }
}

pub struct Graph {
    nodes: NodePool,
    kmers: KmerPool,
    reads: ReadPool,
    table: KmerMap,
    k: usize,
    read_len: usize,
}

#[path = "graph_test.rs"]
mod graph_test;

impl Graph {
    pub fn new(k: usize, read_len: usize) -> Self {
        use crate::defaults::{KMERS_PER_BLOCK, NODES_PER_BLOCK, READS_PER_BLOCK};
        debug_assert!(k > 0 && k <= read_len);
        Graph {
            nodes: NodePool::new(NODES_PER_BLOCK),
            kmers: KmerPool::new(k, KMERS_PER_BLOCK),
            reads: ReadPool::new(read_len, READS_PER_BLOCK),
            table: KmerMap::new(),
            k,
            read_len,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id)
    }

    pub fn kmer(&self, id: KmerId) -> &[u8] {
        self.kmers.get(id)
    }

    /// Nodes currently in the table (pruned nodes excluded).
    pub fn node_count(&self) -> usize {
        self.table.len()
    }

    pub fn read_count(&self) -> usize {
        self.reads.len()
    }

    pub fn lookup(&self, seq: &[u8]) -> Option<NodeId> {
        self.table.get(&self.kmers, seq)
    }

    /// Ingest one read: slide the k-mer window across it, interning new
    /// k-mers and bumping frequency on collisions, and link each k-mer
    /// to its predecessor in the read.
    pub fn add_read(&mut self, seq: &[u8]) -> io::Result<()> {
        if seq.len() != self.read_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "read length {} does not match expected length {}",
                    seq.len(),
                    self.read_len
                ),
            ));
        }

        let read = self.reads.allocate(seq);
        let mut prev: Option<NodeId> = None;

        for i in 0..=self.read_len - self.k {
            // Speculative allocation: rewound immediately when the
            // window collides with an interned k-mer, which is the
            // common case once coverage builds up.
            let kmer = self.kmers.allocate(&self.reads.get(read)[i..i + self.k]);

            let curr = match self.table.get(&self.kmers, self.kmers.get(kmer)) {
                Some(existing) => {
                    self.kmers.unget(kmer);
                    let node = self.nodes.get_mut(existing);
                    node.frequency += 1;
                    if !node.has_multiple_unique_reads && node.contributing_read != read {
                        node.has_multiple_unique_reads = true;
                    }
                    existing
                }
                None => {
                    let id = self.nodes.allocate(Node {
                        kmer,
                        frequency: 1,
                        contributing_read: read,
                        has_multiple_unique_reads: false,
                        to_nodes: Vec::new(),
                        from_nodes: Vec::new(),
                    });
                    self.table.insert(&self.kmers, kmer, id);
                    id
                }
            };

            if let Some(prev) = prev {
                self.link_nodes(prev, curr);
            }
            prev = Some(curr);
        }

        Ok(())
    }

    /// Record the edge from -> to, suppressing duplicates on both sides.
    /// Interning makes node-id equality equivalent to k-mer equality.
    fn link_nodes(&mut self, from: NodeId, to: NodeId) {
        if !self.nodes.get(from).to_nodes.contains(&to) {
            self.nodes.get_mut(from).to_nodes.push(to);
        }
        if !self.nodes.get(to).from_nodes.contains(&from) {
            self.nodes.get_mut(to).from_nodes.push(from);
        }
    }

    /// Stream every read in `reader` into the graph. Returns the number
    /// of reads ingested.
    pub fn build_from_reader(&mut self, reader: Box<dyn Read + '_>) -> io::Result<usize> {
        let mut scanner = ReadScanner::new(reader);
        let mut token = Vec::with_capacity(self.read_len);
        let mut count = 0usize;
        while scanner.next_read(&mut token)? {
            self.add_read(&token)?;
            count += 1;
            if count % READ_PROGRESS_INTERVAL == 0 {
                log::info!("Processed {} reads", count);
            }
        }
        log::debug!("Num reads: {}", count);
        log::debug!("Num nodes: {}", self.table.len());
        Ok(count)
    }

    /// Drop weak nodes and repair their neighbors' adjacency lists. A
    /// node is weak when its frequency is below `min_freq`, or when all
    /// its observations came from a single read slot. With
    /// `min_freq == 1` the single-read test is waived so that frequency
    /// alone gates survival.
    ///
    /// Pruned node slots stay in the node pool; only the table entry and
    /// adjacency links go away. Pruning can expose new source nodes
    /// whose only predecessors were weak.
    pub fn prune(&mut self, min_freq: u32) {
        let require_multiple_reads = min_freq > 1;
        let weak: Vec<NodeId> = self
            .table
            .iter()
            .filter(|&(_, id)| {
                let node = self.nodes.get(id);
                node.frequency < min_freq
                    || (require_multiple_reads && !node.has_multiple_unique_reads)
            })
            .map(|(_, id)| id)
            .collect();

        for id in weak {
            let (to_nodes, from_nodes) = {
                let node = self.nodes.get_mut(id);
                (
                    std::mem::take(&mut node.to_nodes),
                    std::mem::take(&mut node.from_nodes),
                )
            };
            for to in to_nodes {
                self.nodes.get_mut(to).from_nodes.retain(|&n| n != id);
            }
            for from in from_nodes {
                self.nodes.get_mut(from).to_nodes.retain(|&n| n != id);
            }
            let kmer = self.nodes.get(id).kmer;
            let removed = self.table.remove(&self.kmers, self.kmers.get(kmer));
            debug_assert!(removed.is_some());
        }
    }

    /// Surviving nodes with no predecessors, in table order. Contig
    /// enumeration starts one traversal per root.
    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.table
            .iter()
            .filter(|&(_, id)| self.nodes.get(id).from_nodes.is_empty())
            .map(|(_, id)| id)
            .collect()
    }
}
